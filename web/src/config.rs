// bazaar_web/src/config.rs

use crate::errors::{AppError, Result};
use alloy_primitives::Address;
use bazaar::{Deployment, TOKEN_DECIMALS};
use dotenvy::dotenv;
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Largest decimals value whose scale factor `10^decimals` fits in a `U256`.
pub const MAX_TOKEN_DECIMALS: u8 = 77;

#[derive(Debug, Clone)]
pub struct AppConfig {
  pub server_host: String,
  pub server_port: u16,

  /// JSON-RPC endpoint of the wallet node. `None` behaves like a browser
  /// without a wallet extension.
  pub wallet_rpc_url: Option<String>,
  pub deployment: Deployment,
  pub receipt_poll: Duration,

  pub token_symbol: String,
  pub token_decimals: u8,
  /// Block explorer base; owner identicons link to its address pages.
  pub explorer_url: String,
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present
    Self::from_lookup(|name| env::var(name).ok())
  }

  /// Builds the config from any variable source; unset variables fall back
  /// to the Alfajores deployment defaults.
  pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
    let get_or = |name: &str, default: &str| lookup(name).unwrap_or_else(|| default.to_string());
    let defaults = Deployment::default();

    let server_host = get_or("SERVER_HOST", "127.0.0.1");
    let server_port = parse_var("SERVER_PORT", &get_or("SERVER_PORT", "8080"))?;

    let wallet_rpc_url = lookup("WALLET_RPC_URL").filter(|url| !url.trim().is_empty());
    let deployment = Deployment {
      marketplace: match lookup("MARKETPLACE_ADDRESS") {
        Some(raw) => parse_address("MARKETPLACE_ADDRESS", &raw)?,
        None => defaults.marketplace,
      },
      token: match lookup("TOKEN_ADDRESS") {
        Some(raw) => parse_address("TOKEN_ADDRESS", &raw)?,
        None => defaults.token,
      },
    };
    let receipt_poll = Duration::from_millis(parse_var("RECEIPT_POLL_MS", &get_or("RECEIPT_POLL_MS", "1000"))?);

    let token_symbol = get_or("TOKEN_SYMBOL", "cUSD");
    let token_decimals: u8 = parse_var("TOKEN_DECIMALS", &get_or("TOKEN_DECIMALS", &TOKEN_DECIMALS.to_string()))?;
    if token_decimals > MAX_TOKEN_DECIMALS {
      return Err(AppError::Config(format!(
        "Invalid TOKEN_DECIMALS: {token_decimals} exceeds the maximum of {MAX_TOKEN_DECIMALS}"
      )));
    }
    let explorer_url = get_or("EXPLORER_URL", "https://alfajores-blockscout.celo-testnet.org")
      .trim_end_matches('/')
      .to_string();

    tracing::info!(
      wallet = wallet_rpc_url.is_some(),
      marketplace = %deployment.marketplace,
      token = %deployment.token,
      "Application configuration loaded successfully."
    );

    Ok(Self {
      server_host,
      server_port,
      wallet_rpc_url,
      deployment,
      receipt_poll,
      token_symbol,
      token_decimals,
      explorer_url,
    })
  }

  /// Explorer page listing the transactions of `address`.
  pub fn explorer_address_url(&self, address: &Address) -> String {
    format!("{}/address/{}/transactions", self.explorer_url, address)
  }
}

fn parse_var<T: FromStr>(name: &str, raw: &str) -> Result<T>
where
  T::Err: std::fmt::Display,
{
  raw
    .trim()
    .parse::<T>()
    .map_err(|e| AppError::Config(format!("Invalid {name}: {e}")))
}

fn parse_address(name: &str, raw: &str) -> Result<Address> {
  Address::from_str(raw.trim()).map_err(|e| AppError::Config(format!("Invalid {name} '{raw}': {e}")))
}
