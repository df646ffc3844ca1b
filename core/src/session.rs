// bazaar/src/session.rs

//! Wallet session: account access plus the two contract bindings every
//! later operation goes through.

use crate::chain::{Marketplace, Token, Wallet};
use crate::error::{MarketError, MarketResult};
use alloy_primitives::{address, Address};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Fixed contract addresses the front-end talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deployment {
  pub marketplace: Address,
  pub token: Address,
}

impl Default for Deployment {
  /// The Alfajores testnet marketplace and its cUSD token.
  fn default() -> Self {
    Self {
      marketplace: address!("398486Fd366Ed4eE766929BC9a70F6Cc09938878"),
      token: address!("874069Fa1Eb16D44d622F2e0Ca25eeA172369bC1"),
    }
  }
}

#[derive(Clone)]
pub struct Session {
  pub account: Address,
  pub deployment: Deployment,
  pub marketplace: Arc<dyn Marketplace>,
  pub token: Arc<dyn Token>,
}

impl std::fmt::Debug for Session {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Session")
      .field("account", &self.account)
      .field("deployment", &self.deployment)
      .finish_non_exhaustive()
  }
}

impl Session {
  /// Connects once; there is no retry. `wallet` is `None` when no provider
  /// is installed.
  #[instrument(name = "session::connect", skip(wallet))]
  pub async fn connect(wallet: Option<Arc<dyn Wallet>>, deployment: Deployment) -> MarketResult<Session> {
    let Some(wallet) = wallet else {
      warn!("No wallet provider detected.");
      return Err(MarketError::MissingWallet);
    };

    let accounts = wallet
      .enable()
      .await
      .map_err(|e| MarketError::WalletAuthorization(e.to_string()))?;
    let account = accounts
      .first()
      .copied()
      .ok_or_else(|| MarketError::WalletAuthorization("wallet exposed no accounts".to_string()))?;

    info!(%account, marketplace = %deployment.marketplace, token = %deployment.token, "Wallet session established.");
    Ok(Session {
      account,
      deployment,
      marketplace: wallet.bind_marketplace(deployment.marketplace),
      token: wallet.bind_token(deployment.token),
    })
  }
}
