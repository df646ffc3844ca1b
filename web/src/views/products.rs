// bazaar_web/src/views/products.rs

use super::identicon::identicon;
use crate::config::AppConfig;
use bazaar::Product;
use maud::{html, Markup};

/// One card per product, in the order given (contract index order).
pub fn product_grid(products: &[Product], config: &AppConfig, busy: bool) -> Markup {
  html! {
    section #marketplace.grid {
      @for product in products {
        (product_card(product, config, busy))
      }
    }
  }
}

/// The purchase button is disabled while another operation runs and
/// replaced by an inert "Out of Stock" button when stock is zero.
pub fn product_card(product: &Product, config: &AppConfig, busy: bool) -> Markup {
  let price = product.display_price(config.token_decimals);
  html! {
    article.card.product id=(format!("product-{}", product.index)) {
      div.card-image {
        img src=(product.image) alt=(product.name);
        span.badge.stock { (product.stock) " In Stock" }
        a.owner href=(config.explorer_address_url(&product.owner)) target="_blank" rel="noopener"
          title=(product.owner.to_string()) {
          (identicon(&product.owner))
        }
      }
      div.card-body {
        h2.card-title { (product.name) }
        p.card-text { (product.description) }
        @match &product.pgp {
          Some(key) => {
            details.pgp {
              summary { "Seller's PGP public key" }
              pre { (key) }
            }
          },
          None => {
            p.pgp.missing { "Seller has not supplied PGP key" }
          },
        }
        form.buy method="post" action=(format!("/products/{}/buy", product.index)) {
          textarea name="encrypted_message" rows="4"
            placeholder="Shipping details, encrypted with the seller's PGP key" {}
          @if product.in_stock() {
            button.btn.buyBtn type="submit" disabled[busy] {
              "Buy for " (price) " " (config.token_symbol)
            }
          } @else {
            button.btn.buyBtn.disabled type="button" disabled { "Out of Stock" }
          }
        }
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use alloy_primitives::{Address, U256};

  fn config() -> AppConfig {
    AppConfig::from_lookup(|_| None).unwrap()
  }

  fn lamp(stock: u64) -> Product {
    Product {
      index: 4,
      owner: Address::ZERO,
      name: "Lamp".into(),
      image: "https://img.example/lamp.png".into(),
      description: "Warm light".into(),
      pgp: None,
      price: U256::from(1_500_000_000_000_000_000u128),
      stock,
    }
  }

  #[test]
  fn in_stock_card_offers_purchase_at_display_price() {
    let html = product_card(&lamp(3), &config(), false).into_string();
    assert!(html.contains("Buy for 1.50 cUSD"));
    assert!(html.contains("3 In Stock"));
    assert!(html.contains("action=\"/products/4/buy\""));
    assert!(html.contains("Seller has not supplied PGP key"));
    assert!(!html.contains("Out of Stock"));
  }

  #[test]
  fn sold_out_card_disables_purchase() {
    let html = product_card(&lamp(0), &config(), false).into_string();
    assert!(html.contains("Out of Stock"));
    assert!(html.contains("disabled"));
    assert!(!html.contains("Buy for"));
  }

  #[test]
  fn vendor_key_is_shown_when_present() {
    let mut product = lamp(1);
    product.pgp = Some("-----BEGIN PGP PUBLIC KEY BLOCK-----".into());
    let html = product_card(&product, &config(), false).into_string();
    assert!(html.contains("BEGIN PGP PUBLIC KEY BLOCK"));
    assert!(!html.contains("Seller has not supplied PGP key"));
  }

  #[test]
  fn busy_market_disables_buy_buttons() {
    let html = product_card(&lamp(2), &config(), true).into_string();
    assert!(html.contains("disabled"));
  }

  #[test]
  fn grid_keeps_index_order() {
    let mut products = Vec::new();
    for (index, name) in ["Alpha", "Beta", "Gamma"].iter().enumerate() {
      let mut p = lamp(1);
      p.index = index as u64;
      p.name = name.to_string();
      products.push(p);
    }
    let html = product_grid(&products, &config(), false).into_string();
    assert_eq!(html.matches("<article").count(), 3);
    let alpha = html.find("Alpha").unwrap();
    let beta = html.find("Beta").unwrap();
    let gamma = html.find("Gamma").unwrap();
    assert!(alpha < beta && beta < gamma);
  }
}
