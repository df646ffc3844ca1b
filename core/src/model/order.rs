// bazaar/src/model/order.rs

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Order {
  /// Position in the contract's order list; the id `refundOrder` takes.
  pub index: u64,
  /// Buyer's message, encrypted client-side to the vendor's PGP key. Opaque here.
  pub encrypted_message: String,
  /// `Product::index` of the purchased product.
  pub product_id: u64,
}

impl Order {
  /// The contract returns zeroed slots for cleared orders.
  pub fn is_empty(&self) -> bool {
    self.encrypted_message.trim().is_empty()
  }
}
