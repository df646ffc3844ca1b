// bazaar_web/src/web/handlers/market_handlers.rs

//! Form posts for the four write operations. The writer turns failures into
//! a notification, so every handler answers with a redirect to the page.

use actix_web::{web, HttpResponse};
use bazaar::{MarketResult, OperationReport, ProductDraft};
use serde::Deserialize;
use tracing::{debug, instrument};

use super::page_handlers::redirect_home;
use crate::state::AppState;

#[derive(Deserialize, Debug)]
pub struct NewProductForm {
  pub name: String,
  #[serde(default)]
  pub image: String,
  #[serde(default)]
  pub description: String,
  pub price: String,
  pub stock: String,
}

impl From<NewProductForm> for ProductDraft {
  fn from(form: NewProductForm) -> Self {
    ProductDraft {
      name: form.name,
      image: form.image,
      description: form.description,
      price: form.price,
      stock: form.stock,
    }
  }
}

#[derive(Deserialize, Debug)]
pub struct BuyForm {
  #[serde(default)]
  pub encrypted_message: String,
}

#[derive(Deserialize, Debug)]
pub struct PgpForm {
  pub pgp_key: String,
}

fn finish(result: MarketResult<OperationReport>) -> HttpResponse {
  match result {
    Ok(report) => debug!(operation = report.kind.label(), phase = ?report.final_phase(), "Operation finished."),
    Err(e) => debug!(error = %e, "Operation ended with error; notification set."),
  }
  redirect_home()
}

#[instrument(name = "handler::create_product", skip(app_state, form))]
pub async fn create_product_handler(app_state: web::Data<AppState>, form: web::Form<NewProductForm>) -> HttpResponse {
  finish(app_state.writer.create_product(form.into_inner().into()).await)
}

#[instrument(name = "handler::buy_product", skip(app_state, form))]
pub async fn buy_product_handler(
  app_state: web::Data<AppState>,
  path: web::Path<u64>,
  form: web::Form<BuyForm>,
) -> HttpResponse {
  let index = path.into_inner();
  finish(app_state.writer.buy_product(index, form.into_inner().encrypted_message).await)
}

#[instrument(name = "handler::set_pgp_key", skip(app_state, form))]
pub async fn set_pgp_key_handler(app_state: web::Data<AppState>, form: web::Form<PgpForm>) -> HttpResponse {
  finish(app_state.writer.set_pgp_key(form.into_inner().pgp_key).await)
}

#[instrument(name = "handler::refund_order", skip(app_state))]
pub async fn refund_order_handler(app_state: web::Data<AppState>, path: web::Path<u64>) -> HttpResponse {
  finish(app_state.writer.refund_order(path.into_inner()).await)
}
