// bazaar/src/error.rs
use crate::chain::ChainError;
use crate::flow::FlowError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MarketError {
  #[error("no wallet provider is available")]
  MissingWallet,

  #[error("wallet authorization failed: {0}")]
  WalletAuthorization(String),

  #[error("wallet session is not connected")]
  SessionUnavailable,

  #[error("another operation is already in progress: {0}")]
  Busy(&'static str),

  #[error("invalid input: {0}")]
  Validation(String),

  #[error("product {0} does not exist")]
  UnknownProduct(u64),

  #[error("order {0} does not exist")]
  UnknownOrder(u64),

  #[error("contract call failed: {0}")]
  Chain(#[from] ChainError),

  #[error("operation flow error: {0}")]
  Flow(#[from] FlowError),
}

/// Coarse failure taxonomy. User-facing text is derived from it; logs carry
/// the full error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
  /// No wallet installed/configured. Fatal to the session.
  MissingWallet,
  /// Account access refused or failed. Recoverable by reconnecting.
  Authorization,
  /// Network or contract call failure. Retry by repeating the action.
  Call,
  /// The transaction was mined but reverted (insufficient funds, stock, ...).
  Revert,
  /// Bad user input caught before touching the chain.
  Input,
  /// Client state prevented the operation (busy, not connected).
  State,
}

impl MarketError {
  pub fn class(&self) -> ErrorClass {
    match self {
      MarketError::MissingWallet => ErrorClass::MissingWallet,
      MarketError::WalletAuthorization(_) => ErrorClass::Authorization,
      MarketError::Chain(ChainError::Reverted { .. }) => ErrorClass::Revert,
      MarketError::Chain(_) => ErrorClass::Call,
      MarketError::Validation(_) | MarketError::UnknownProduct(_) | MarketError::UnknownOrder(_) => ErrorClass::Input,
      MarketError::SessionUnavailable | MarketError::Busy(_) | MarketError::Flow(_) => ErrorClass::State,
    }
  }

  /// Text shown in the notification bar. Chain failures share one generic
  /// message; reverts and transport errors are not told apart.
  pub fn user_message(&self) -> String {
    match self {
      MarketError::MissingWallet => "Please install a wallet provider to use this marketplace".to_string(),
      MarketError::WalletAuthorization(_) => "Wallet access was not granted. Please approve this DApp to use it".to_string(),
      MarketError::SessionUnavailable => "Wallet is not connected. Reload once your wallet is available".to_string(),
      MarketError::Busy(_) => "Another operation is still in progress. Please wait for it to finish".to_string(),
      MarketError::Validation(msg) => format!("Invalid input: {msg}"),
      MarketError::UnknownProduct(index) => format!("Product {index} does not exist"),
      MarketError::UnknownOrder(index) => format!("Order {index} does not exist"),
      MarketError::Chain(_) | MarketError::Flow(_) => "Something went wrong. Please try again".to_string(),
    }
  }
}

pub type MarketResult<T, E = MarketError> = std::result::Result<T, E>;
