// bazaar_web/src/views/forms.rs

use maud::{html, Markup};

pub fn new_product_form(token_symbol: &str, busy: bool) -> Markup {
  html! {
    details #newProductBtn.new-product {
      summary.btn { "Add product" }
      form method="post" action="/products" {
        input type="text" name="name" placeholder="Product name" required;
        input type="url" name="image" placeholder="Image URL";
        textarea name="description" rows="3" placeholder="Description" {}
        input type="text" name="price" inputmode="decimal" placeholder=(format!("Price in {token_symbol}")) required;
        input type="number" name="stock" min="0" step="1" placeholder="Stock" required;
        button.btn type="submit" disabled[busy] { "Add product" }
      }
    }
  }
}

pub fn pgp_form(busy: bool) -> Markup {
  html! {
    section #pgp-section {
      h2 { "Your PGP public key" }
      p { "Buyers encrypt their shipping details with this key." }
      form method="post" action="/pgp" {
        textarea name="pgp_key" rows="6" placeholder="-----BEGIN PGP PUBLIC KEY BLOCK-----" required {}
        button.btn type="submit" disabled[busy] { "Set PGP key" }
      }
    }
  }
}

pub fn refresh_form(busy: bool) -> Markup {
  html! {
    form.refresh method="post" action="/refresh" {
      button.btn type="submit" disabled[busy] { "Refresh" }
    }
  }
}
