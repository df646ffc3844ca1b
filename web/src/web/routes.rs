// bazaar_web/src/web/routes.rs

use actix_web::web;

use crate::web::handlers::{api_handlers, market_handlers, page_handlers};

// Called from `main.rs` (and the handler tests) to mount every route.
pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  cfg
    .route("/", web::get().to(page_handlers::index_handler))
    .route("/refresh", web::post().to(page_handlers::refresh_handler))
    .route("/products", web::post().to(market_handlers::create_product_handler))
    .route("/products/{index}/buy", web::post().to(market_handlers::buy_product_handler))
    .route("/pgp", web::post().to(market_handlers::set_pgp_key_handler))
    .route("/orders/{index}/refund", web::post().to(market_handlers::refund_order_handler))
    .service(
      web::scope("/api/v1")
        .route("/health", web::get().to(api_handlers::health_check_handler))
        .route("/products", web::get().to(api_handlers::list_products_handler)),
    );
}
