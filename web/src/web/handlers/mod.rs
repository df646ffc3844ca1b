// bazaar_web/src/web/handlers/mod.rs

pub mod api_handlers;
pub mod market_handlers;
pub mod page_handlers;
