// bazaar_web/src/views/layout.rs

use super::forms::{new_product_form, pgp_form, refresh_form};
use super::orders::orders_section;
use super::products::product_grid;
use crate::config::AppConfig;
use bazaar::{MarketView, Notification, NotificationKind};
use maud::{html, Markup, PreEscaped, DOCTYPE};

const STYLE: &str = r#"
* { margin: 0; padding: 0; box-sizing: border-box; }
body { font-family: system-ui, -apple-system, sans-serif; background: #f6f6f4; color: #222; line-height: 1.5; }
.container { max-width: 1200px; margin: 0 auto; padding: 2rem; }
.header { display: flex; justify-content: space-between; align-items: center; margin-bottom: 1.5rem; }
.header .brand { font-size: 1.5rem; font-weight: bold; }
.alert { padding: 0.75rem 1rem; margin-bottom: 1.5rem; border-radius: 4px; background: #fff; border: 1px solid #ddd; }
.alert.hidden { display: none; }
.alert.progress { border-color: #4a9eff; }
.alert.success { border-color: #2e9e5b; }
.alert.warning { border-color: #d9822b; }
.grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(280px, 1fr)); gap: 1.5rem; margin-bottom: 2rem; }
.card { background: #fff; border-radius: 6px; overflow: hidden; box-shadow: 0 1px 3px rgba(0,0,0,.1); }
.card-image { position: relative; }
.card-image img { width: 100%; height: 200px; object-fit: cover; display: block; }
.card-image .badge { position: absolute; top: 0.75rem; right: 0.75rem; background: #fff; padding: 0.25rem 0.75rem; border-radius: 0 4px 4px 0; }
.card-image .owner { position: absolute; bottom: -24px; left: 1rem; }
.identicon { border-radius: 50%; border: 2px solid #fff; }
.card-body { padding: 2rem 1rem 1rem; display: flex; flex-direction: column; gap: 0.5rem; }
pre { white-space: pre-wrap; word-break: break-all; font-size: 0.75rem; background: #f0f0f0; padding: 0.5rem; }
textarea, input { width: 100%; padding: 0.5rem; border: 1px solid #ccc; border-radius: 4px; font: inherit; }
.btn { padding: 0.6rem 1rem; border: 1px solid #222; background: #fff; border-radius: 4px; cursor: pointer; width: 100%; }
.btn:disabled, .btn.disabled { opacity: 0.5; cursor: not-allowed; }
section { margin-bottom: 2rem; }
form { display: flex; flex-direction: column; gap: 0.5rem; }
.new-product { margin-bottom: 2rem; }
.orders { list-style: none; display: flex; flex-direction: column; gap: 1rem; }
"#;

pub fn notification_bar(notification: Option<&Notification>) -> Markup {
  html! {
    @match notification {
      Some(n) => {
        div #notification class=(format!("alert {}", kind_class(n.kind))) role="alert" { (n.text) }
      },
      None => {
        div #notification.alert.hidden role="alert" {}
      },
    }
  }
}

fn kind_class(kind: NotificationKind) -> &'static str {
  match kind {
    NotificationKind::Progress => "progress",
    NotificationKind::Success => "success",
    NotificationKind::Warning => "warning",
  }
}

/// The whole marketplace: balance, notification bar, products, the vendor
/// forms and received orders.
pub fn marketplace_page(view: &MarketView, config: &AppConfig) -> Markup {
  html! {
    (DOCTYPE)
    html lang="en" {
      head {
        meta charset="utf-8";
        meta name="viewport" content="width=device-width, initial-scale=1";
        title { "PGP Bazaar" }
        style { (PreEscaped(STYLE)) }
      }
      body {
        div.container {
          nav.header {
            span.brand { "PGP Bazaar" }
            span {
              "Balance: "
              span #balance { (view.balance.as_deref().unwrap_or("0.00")) }
              " " (config.token_symbol)
            }
          }
          (notification_bar(view.notification.as_ref()))
          @if let Some(account) = view.account {
            p.account { "Connected as " code { (account.to_string()) } }
          }
          (refresh_form(view.busy))
          main {
            (product_grid(&view.products, config, view.busy))
            (new_product_form(&config.token_symbol, view.busy))
            (pgp_form(view.busy))
            (orders_section(&view.orders, &view.products, view.busy))
          }
        }
      }
    }
  }
}
