// bazaar_web/src/views/orders.rs

use bazaar::{Order, Product};
use maud::{html, Markup};

pub const NO_ORDERS_TEXT: &str = "You have received no orders";

/// Orders addressed to the connected vendor, each with a refund action.
pub fn orders_section(orders: &[Order], products: &[Product], busy: bool) -> Markup {
  html! {
    section #my-orders {
      h2 { "My orders" }
      div #orders-desc {
        @if orders.is_empty() {
          p.empty { (NO_ORDERS_TEXT) }
        } @else {
          ul.orders {
            @for order in orders {
              (order_entry(order, products.iter().find(|p| p.index == order.product_id), busy))
            }
          }
        }
      }
    }
  }
}

fn order_entry(order: &Order, product: Option<&Product>, busy: bool) -> Markup {
  html! {
    li.order id=(format!("order-{}", order.index)) {
      h3 {
        "Order #" (order.index) " for "
        @match product {
          Some(product) => { (product.name) },
          None => { "product #" (order.product_id) },
        }
      }
      pre.message { (order.encrypted_message) }
      form.refund method="post" action=(format!("/orders/{}/refund", order.index)) {
        button.btn.refundBtn type="submit" disabled[busy] { "Refund" }
      }
    }
  }
}
