// bazaar/src/model/mod.rs

//! Records decoded from the marketplace contract.

pub mod order;
pub mod product;
pub mod units;

pub use order::Order;
pub use product::{NewProduct, Product};
pub use units::{format_amount, parse_amount, TOKEN_DECIMALS};
