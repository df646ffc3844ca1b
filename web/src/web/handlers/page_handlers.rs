// bazaar_web/src/web/handlers/page_handlers.rs

use actix_web::{http::header, web, HttpResponse};
use bazaar::{reader, Notification, OperationKind};
use tracing::{info, instrument};

use crate::state::AppState;
use crate::views;

/// 303 back to the marketplace page; used after every form post.
pub fn redirect_home() -> HttpResponse {
  HttpResponse::SeeOther()
    .insert_header((header::LOCATION, "/"))
    .finish()
}

#[instrument(name = "handler::index", skip(app_state))]
pub async fn index_handler(app_state: web::Data<AppState>) -> HttpResponse {
  let view = app_state.market.snapshot();
  let page = views::marketplace_page(&view, &app_state.config);
  HttpResponse::Ok()
    .content_type("text/html; charset=utf-8")
    .body(page.into_string())
}

/// Re-runs the reader under the operation guard. Skipped while a write is
/// in flight; the write refreshes on its own when it completes.
#[instrument(name = "handler::refresh", skip(app_state))]
pub async fn refresh_handler(app_state: web::Data<AppState>) -> HttpResponse {
  let market = &app_state.market;
  let _guard = match market.begin_operation(OperationKind::Refresh) {
    Ok(guard) => guard,
    Err(e) => {
      info!(error = %e, "Refresh skipped, operation in flight.");
      return redirect_home();
    }
  };
  match reader::refresh_all(market).await {
    Ok(()) => info!("Marketplace refreshed."),
    Err(e) => market.notify(Notification::warning(e.user_message())),
  }
  redirect_home()
}
