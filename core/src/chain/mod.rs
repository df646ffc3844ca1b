// bazaar/src/chain/mod.rs

//! Chain-facing seams: the wallet provider, the marketplace contract and the
//! token contract. The rest of the crate only sees these traits; the
//! JSON-RPC backed implementations live in `rpc`, `wallet` and `contracts`.

pub mod abi;
pub mod contracts;
pub mod rpc;
pub mod wallet;

use crate::model::{NewProduct, Order, Product};
use alloy_primitives::{Address, B256, U256};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

pub use contracts::{MarketplaceContract, TokenContract};
pub use rpc::JsonRpcClient;
pub use wallet::RpcWallet;

#[derive(Debug, Error)]
pub enum ChainError {
  /// Network failure or malformed response envelope.
  #[error("transport error: {0}")]
  Transport(String),

  /// The node answered with a JSON-RPC error object.
  #[error("rpc error {code}: {message}")]
  Rpc { code: i64, message: String },

  /// The transaction was mined with a failure status.
  #[error("transaction {tx_hash} reverted")]
  Reverted { tx_hash: B256 },

  /// Return data did not match the declared ABI.
  #[error("failed to decode {what}: {detail}")]
  Decode { what: &'static str, detail: String },
}

impl From<reqwest::Error> for ChainError {
  fn from(err: reqwest::Error) -> Self {
    ChainError::Transport(err.to_string())
  }
}

pub type ChainResult<T> = std::result::Result<T, ChainError>;

/// Receipt of a mined, successful transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxReceipt {
  pub tx_hash: B256,
  pub block_number: Option<u64>,
}

/// The wallet provider: grants account access and hands out contract
/// bindings that send from the accounts it manages.
#[async_trait]
pub trait Wallet: Send + Sync {
  /// Requests account access. May prompt the user and may be refused.
  async fn enable(&self) -> ChainResult<Vec<Address>>;

  fn bind_marketplace(&self, address: Address) -> Arc<dyn Marketplace>;

  fn bind_token(&self, address: Address) -> Arc<dyn Token>;
}

#[async_trait]
pub trait Marketplace: Send + Sync {
  fn address(&self) -> Address;

  async fn products_length(&self) -> ChainResult<u64>;

  async fn read_product(&self, index: u64) -> ChainResult<Product>;

  /// Orders addressed to `account` (the contract keys them by caller).
  async fn read_orders(&self, account: Address) -> ChainResult<Vec<Order>>;

  async fn write_product(&self, from: Address, product: &NewProduct) -> ChainResult<TxReceipt>;

  async fn buy_product(&self, from: Address, index: u64, encrypted_message: &str) -> ChainResult<TxReceipt>;

  async fn set_vendor_pgp(&self, from: Address, key: &str) -> ChainResult<TxReceipt>;

  async fn refund_order(&self, from: Address, index: u64) -> ChainResult<TxReceipt>;
}

#[async_trait]
pub trait Token: Send + Sync {
  fn address(&self) -> Address;

  async fn approve(&self, from: Address, spender: Address, amount: U256) -> ChainResult<TxReceipt>;

  async fn balance_of(&self, owner: Address) -> ChainResult<U256>;
}
