// bazaar_web/src/state.rs
use crate::config::AppConfig;
use actix_web::rt::task::JoinHandle;
use bazaar::chain::{RpcWallet, Wallet};
use bazaar::reader;
use bazaar::{Market, Notification, Session, Writer};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
  pub market: Market,
  pub writer: Writer,
  pub config: Arc<AppConfig>,
}

impl AppState {
  pub fn new(market: Market, config: Arc<AppConfig>) -> Self {
    Self {
      writer: Writer::new(market.clone()),
      market,
      config,
    }
  }
}

/// Shows the loading notice and runs [`connect_and_load`] in the background,
/// so a wallet that never answers cannot keep the server from listening.
pub fn spawn_startup(market: Market, config: Arc<AppConfig>) -> JoinHandle<()> {
  market.notify(Notification::progress("Loading..."));
  actix_web::rt::spawn(async move { connect_and_load(&market, &config).await })
}

/// One wallet connection attempt, then the first read of the marketplace.
/// Failures end up in the notification bar; the server keeps serving either way.
async fn connect_and_load(market: &Market, config: &AppConfig) {
  let wallet = config
    .wallet_rpc_url
    .as_ref()
    .map(|url| Arc::new(RpcWallet::new(url.clone(), config.receipt_poll)) as Arc<dyn Wallet>);

  let session = match Session::connect(wallet, config.deployment).await {
    Ok(session) => session,
    Err(e) => {
      tracing::error!(error = %e, class = ?e.class(), "Wallet connection failed.");
      market.notify(Notification::warning(e.user_message()));
      return;
    }
  };
  market.set_session(session);

  match reader::refresh_all(market).await {
    Ok(()) => market.clear_notification(),
    Err(e) => market.notify(Notification::warning(e.user_message())),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use bazaar::NotificationKind;

  #[actix_web::test]
  async fn startup_runs_in_background_and_reports_missing_wallet() {
    let config = Arc::new(AppConfig::from_lookup(|_| None).unwrap());
    let market = Market::new(config.token_decimals);

    let startup = spawn_startup(market.clone(), config);
    let loading = market.notification().unwrap();
    assert_eq!(loading.kind, NotificationKind::Progress);
    assert_eq!(loading.text, "⌛ Loading...");

    startup.await.unwrap();
    let note = market.notification().unwrap();
    assert_eq!(note.kind, NotificationKind::Warning);
    assert!(!market.is_connected());
  }
}
