// bazaar/src/chain/wallet.rs

use super::contracts::{MarketplaceContract, TokenContract};
use super::rpc::JsonRpcClient;
use super::{ChainResult, Marketplace, Token, Wallet};
use alloy_primitives::Address;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// A wallet reached over JSON-RPC. The node holds the keys and signs
/// `eth_sendTransaction` for the accounts it exposes.
pub struct RpcWallet {
  client: Arc<JsonRpcClient>,
}

impl RpcWallet {
  pub fn new(url: impl Into<String>, receipt_poll_interval: Duration) -> Self {
    Self {
      client: Arc::new(JsonRpcClient::new(url, receipt_poll_interval)),
    }
  }
}

#[async_trait]
impl Wallet for RpcWallet {
  async fn enable(&self) -> ChainResult<Vec<Address>> {
    self.client.request_accounts().await
  }

  fn bind_marketplace(&self, address: Address) -> Arc<dyn Marketplace> {
    Arc::new(MarketplaceContract::new(self.client.clone(), address))
  }

  fn bind_token(&self, address: Address) -> Arc<dyn Token> {
    Arc::new(TokenContract::new(self.client.clone(), address))
  }
}
