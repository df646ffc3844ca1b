// bazaar/src/chain/rpc.rs

//! Minimal Ethereum JSON-RPC client over HTTP. Covers what the marketplace
//! needs: account access, read calls, and sending transactions until mined.

use super::{ChainError, ChainResult, TxReceipt};
use alloy_primitives::{Address, Bytes, B256, U64};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::{debug, instrument, trace};

/// JSON-RPC "method not found".
pub const METHOD_NOT_FOUND: i64 = -32601;

const NO_PARAMS: [u8; 0] = [];

#[derive(Serialize)]
struct RpcRequest<'a, P: Serialize> {
  jsonrpc: &'static str,
  id: u64,
  method: &'a str,
  params: P,
}

#[derive(Deserialize)]
struct RpcResponse<R> {
  result: Option<R>,
  error: Option<RpcErrorObject>,
}

#[derive(Deserialize)]
struct RpcErrorObject {
  code: i64,
  message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CallRequest {
  #[serde(skip_serializing_if = "Option::is_none")]
  from: Option<Address>,
  to: Address,
  data: Bytes,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawReceipt {
  transaction_hash: B256,
  block_number: Option<U64>,
  status: Option<U64>,
}

pub struct JsonRpcClient {
  http: reqwest::Client,
  url: String,
  next_id: AtomicU64,
  poll_interval: Duration,
}

impl JsonRpcClient {
  pub fn new(url: impl Into<String>, poll_interval: Duration) -> Self {
    Self {
      http: reqwest::Client::new(),
      url: url.into(),
      next_id: AtomicU64::new(1),
      poll_interval,
    }
  }

  /// Issues a request whose result may legitimately be `null`.
  async fn request_opt<P, R>(&self, method: &str, params: P) -> ChainResult<Option<R>>
  where
    P: Serialize,
    R: DeserializeOwned,
  {
    let id = self.next_id.fetch_add(1, Ordering::Relaxed);
    trace!(id, method, "rpc request");
    let body = RpcRequest {
      jsonrpc: "2.0",
      id,
      method,
      params,
    };
    let response: RpcResponse<R> = self
      .http
      .post(&self.url)
      .json(&body)
      .send()
      .await?
      .error_for_status()?
      .json()
      .await?;

    if let Some(err) = response.error {
      return Err(ChainError::Rpc {
        code: err.code,
        message: err.message,
      });
    }
    Ok(response.result)
  }

  async fn request<P, R>(&self, method: &str, params: P) -> ChainResult<R>
  where
    P: Serialize,
    R: DeserializeOwned,
  {
    self
      .request_opt(method, params)
      .await?
      .ok_or_else(|| ChainError::Transport(format!("{method} returned no result")))
  }

  /// `eth_requestAccounts`, falling back to `eth_accounts` on nodes that do
  /// not implement the permission request.
  #[instrument(skip(self), fields(url = %self.url))]
  pub async fn request_accounts(&self) -> ChainResult<Vec<Address>> {
    match self.request("eth_requestAccounts", NO_PARAMS).await {
      Err(ChainError::Rpc { code, .. }) if code == METHOD_NOT_FOUND => {
        debug!("eth_requestAccounts unsupported, falling back to eth_accounts");
        self.request("eth_accounts", NO_PARAMS).await
      }
      other => other,
    }
  }

  /// Read-only `eth_call` against the latest block.
  pub async fn call(&self, from: Option<Address>, to: Address, data: Vec<u8>) -> ChainResult<Bytes> {
    let req = CallRequest {
      from,
      to,
      data: data.into(),
    };
    self.request("eth_call", (req, "latest")).await
  }

  /// `eth_sendTransaction` signed by the wallet, then waits for the receipt.
  /// There is no timeout: a transaction that never gets mined stalls here.
  #[instrument(skip(self, data), fields(%from, %to))]
  pub async fn send_transaction(&self, from: Address, to: Address, data: Vec<u8>) -> ChainResult<TxReceipt> {
    let req = CallRequest {
      from: Some(from),
      to,
      data: data.into(),
    };
    let tx_hash: B256 = self.request("eth_sendTransaction", (req,)).await?;
    debug!(%tx_hash, "transaction submitted, waiting for receipt");

    loop {
      let receipt: Option<RawReceipt> = self.request_opt("eth_getTransactionReceipt", (tx_hash,)).await?;
      if let Some(receipt) = receipt {
        return receipt_outcome(receipt);
      }
      tokio::time::sleep(self.poll_interval).await;
    }
  }
}

fn receipt_outcome(receipt: RawReceipt) -> ChainResult<TxReceipt> {
  if receipt.status == Some(U64::ZERO) {
    return Err(ChainError::Reverted {
      tx_hash: receipt.transaction_hash,
    });
  }
  Ok(TxReceipt {
    tx_hash: receipt.transaction_hash,
    block_number: receipt.block_number.map(|n| n.to::<u64>()),
  })
}
