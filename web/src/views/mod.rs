// bazaar_web/src/views/mod.rs

//! Server-rendered HTML. Every view is a pure function of a `MarketView`
//! snapshot, so a page shows one consistent state.

pub mod forms;
pub mod identicon;
pub mod layout;
pub mod orders;
pub mod products;

pub use layout::marketplace_page;
