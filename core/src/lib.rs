// src/lib.rs

//! Bazaar: client library for a PGP-enabled token marketplace contract.
//!
//! The crate connects to a wallet provider, reads products, orders and the
//! token balance from the marketplace contract, and submits write operations
//! (create, buy, set PGP key, refund) with the token approval they need.
//!
//!  - `chain`: wallet/contract traits and their JSON-RPC implementation.
//!  - `session`: one-shot wallet connection.
//!  - `state`: the shared application state and its update functions.
//!  - `reader` / `writer`: the marketplace reader and writer.
//!  - `flow`: the async step engine the writer runs its operations on.

pub mod chain;
pub mod error;
pub mod flow;
pub mod model;
pub mod reader;
pub mod session;
pub mod state;
pub mod writer;

// --- Re-exports for the Public API ---

pub use crate::chain::{Marketplace, RpcWallet, Token, TxReceipt, Wallet};
pub use crate::error::{ErrorClass, MarketError, MarketResult};
pub use crate::model::{format_amount, parse_amount, NewProduct, Order, Product, TOKEN_DECIMALS};
pub use crate::session::{Deployment, Session};
pub use crate::state::{Market, MarketView, Notification, NotificationKind, OperationKind};
pub use crate::writer::{OperationPhase, OperationReport, ProductDraft, Writer};
