// bazaar/src/reader.rs

//! Marketplace Reader: pulls products, orders and the token balance from the
//! chain into the application state.

use crate::error::MarketResult;
use crate::model::{format_amount, Order, Product};
use crate::state::Market;
use futures_util::future::try_join_all;
use tracing::{info, instrument, warn};

/// Reads the product count, then every product concurrently. The list in
/// `market` is replaced only when all reads succeeded; a single failure
/// leaves the previous list untouched.
#[instrument(name = "reader::fetch_products", skip(market), err(Display))]
pub async fn fetch_products(market: &Market) -> MarketResult<Vec<Product>> {
  let session = market.session()?;
  let count = session.marketplace.products_length().await?;

  let reads = (0..count).map(|index| {
    let marketplace = session.marketplace.clone();
    async move { marketplace.read_product(index).await }
  });
  // try_join_all keeps input order, so the list stays in index order
  let products = try_join_all(reads).await?;

  info!(count = products.len(), "Fetched products.");
  market.replace_products(products.clone());
  Ok(products)
}

/// Reads the active account's orders in one call and drops empty entries.
#[instrument(name = "reader::fetch_orders", skip(market), err(Display))]
pub async fn fetch_orders(market: &Market) -> MarketResult<Vec<Order>> {
  let session = market.session()?;
  let orders: Vec<Order> = session
    .marketplace
    .read_orders(session.account)
    .await?
    .into_iter()
    .filter(|order| !order.is_empty())
    .collect();

  info!(count = orders.len(), "Fetched orders.");
  market.replace_orders(orders.clone());
  Ok(orders)
}

/// Reads the token balance and stores it formatted to two decimals.
#[instrument(name = "reader::fetch_balance", skip(market), err(Display))]
pub async fn fetch_balance(market: &Market) -> MarketResult<String> {
  let session = market.session()?;
  let raw = session.token.balance_of(session.account).await?;
  let formatted = format_amount(raw, market.decimals());
  market.set_balance(formatted.clone());
  Ok(formatted)
}

/// Balance, products, then orders. Every part runs even if an earlier one
/// failed; the first error is returned.
pub async fn refresh_all(market: &Market) -> MarketResult<()> {
  let results = [
    fetch_balance(market).await.map(drop),
    fetch_products(market).await.map(drop),
    fetch_orders(market).await.map(drop),
  ];
  let mut first_err = None;
  for result in results {
    if let Err(e) = result {
      warn!(error = %e, class = ?e.class(), "Refresh step failed.");
      first_err.get_or_insert(e);
    }
  }
  match first_err {
    Some(e) => Err(e),
    None => Ok(()),
  }
}
