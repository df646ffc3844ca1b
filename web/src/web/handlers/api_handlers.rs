// bazaar_web/src/web/handlers/api_handlers.rs

use actix_web::{web, HttpResponse};
use bazaar::{MarketError, Product};
use serde::Serialize;
use serde_json::json;
use tracing::instrument;

use crate::errors::AppError;
use crate::state::AppState;

pub async fn health_check_handler(app_state: web::Data<AppState>) -> HttpResponse {
  HttpResponse::Ok().json(json!({
    "status": "ok",
    "connected": app_state.market.is_connected(),
    "busy": app_state.market.in_flight().is_some(),
  }))
}

#[derive(Serialize, Debug)]
pub struct ProductResponse {
  #[serde(flatten)]
  pub product: Product,
  /// Price formatted with the token decimals, e.g. `"1.50"`.
  pub display_price: String,
  pub in_stock: bool,
}

/// JSON view of the last product read.
#[instrument(name = "handler::list_products", skip(app_state))]
pub async fn list_products_handler(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
  if !app_state.market.is_connected() {
    return Err(MarketError::SessionUnavailable.into());
  }
  let decimals = app_state.config.token_decimals;
  let products: Vec<ProductResponse> = app_state
    .market
    .snapshot()
    .products
    .into_iter()
    .map(|product| ProductResponse {
      display_price: product.display_price(decimals),
      in_stock: product.in_stock(),
      product,
    })
    .collect();
  Ok(HttpResponse::Ok().json(json!({ "products": products, "symbol": app_state.config.token_symbol })))
}
