// bazaar/src/model/product.rs

use super::units::format_amount;
use alloy_primitives::{Address, U256};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Product {
  /// Position in contract storage; also the id used by `buyProduct`.
  pub index: u64,
  pub owner: Address,
  pub name: String,
  pub image: String,
  pub description: String,
  /// Vendor's public PGP key. The contract stores an empty string when unset.
  pub pgp: Option<String>,
  /// Price in the token's smallest unit.
  pub price: U256,
  pub stock: u64,
}

impl Product {
  pub fn in_stock(&self) -> bool {
    self.stock > 0
  }

  pub fn display_price(&self, decimals: u8) -> String {
    format_amount(self.price, decimals)
  }
}

/// Input of the `writeProduct` call, already scaled to smallest units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
  pub name: String,
  pub image: String,
  pub description: String,
  pub price: U256,
  pub stock: u64,
}
