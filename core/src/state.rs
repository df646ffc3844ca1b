// bazaar/src/state.rs

//! Application state passed explicitly to the reader, the writer and the
//! render layer, with the update functions that mutate it.

use crate::error::{MarketError, MarketResult};
use crate::flow::Shared;
use crate::model::{Order, Product, TOKEN_DECIMALS};
use crate::session::Session;
use alloy_primitives::Address;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
  Progress,
  Success,
  Warning,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
  pub kind: NotificationKind,
  pub text: String,
}

impl Notification {
  pub fn progress(text: impl AsRef<str>) -> Self {
    Self {
      kind: NotificationKind::Progress,
      text: format!("⌛ {}", text.as_ref()),
    }
  }

  pub fn success(text: impl AsRef<str>) -> Self {
    Self {
      kind: NotificationKind::Success,
      text: format!("🎉 {}", text.as_ref()),
    }
  }

  pub fn warning(text: impl AsRef<str>) -> Self {
    Self {
      kind: NotificationKind::Warning,
      text: format!("⚠️ {}.", text.as_ref()),
    }
  }
}

/// Operations that take the in-flight guard: the four writes and a manual refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
  CreateProduct,
  BuyProduct,
  SetPgpKey,
  RefundOrder,
  /// Manual re-read of the marketplace; holds the guard so no write interleaves.
  Refresh,
}

impl OperationKind {
  pub fn label(&self) -> &'static str {
    match self {
      OperationKind::CreateProduct => "create product",
      OperationKind::BuyProduct => "buy product",
      OperationKind::SetPgpKey => "set PGP key",
      OperationKind::RefundOrder => "refund order",
      OperationKind::Refresh => "refresh",
    }
  }
}

#[derive(Debug, Default)]
pub struct MarketState {
  pub session: Option<Session>,
  pub products: Vec<Product>,
  pub orders: Vec<Order>,
  /// Formatted token balance, `None` until first fetched.
  pub balance: Option<String>,
  pub notification: Option<Notification>,
  pub in_flight: Option<OperationKind>,
}

/// Read-only copy of the state handed to the render layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketView {
  pub account: Option<Address>,
  pub products: Vec<Product>,
  pub orders: Vec<Order>,
  pub balance: Option<String>,
  pub notification: Option<Notification>,
  pub busy: bool,
  pub decimals: u8,
}

/// Cloneable handle on the shared application state.
#[derive(Clone)]
pub struct Market {
  state: Shared<MarketState>,
  decimals: u8,
}

impl Default for Market {
  fn default() -> Self {
    Self::new(TOKEN_DECIMALS)
  }
}

impl Market {
  pub fn new(decimals: u8) -> Self {
    Self {
      state: Shared::default(),
      decimals,
    }
  }

  pub fn decimals(&self) -> u8 {
    self.decimals
  }

  pub fn set_session(&self, session: Session) {
    self.state.write().session = Some(session);
  }

  pub fn session(&self) -> MarketResult<Session> {
    self.state.read().session.clone().ok_or(MarketError::SessionUnavailable)
  }

  pub fn is_connected(&self) -> bool {
    self.state.read().session.is_some()
  }

  pub fn replace_products(&self, products: Vec<Product>) {
    debug!(count = products.len(), "Replacing product list.");
    self.state.write().products = products;
  }

  pub fn replace_orders(&self, orders: Vec<Order>) {
    debug!(count = orders.len(), "Replacing order list.");
    self.state.write().orders = orders;
  }

  pub fn set_balance(&self, balance: String) {
    self.state.write().balance = Some(balance);
  }

  pub fn notify(&self, notification: Notification) {
    self.state.write().notification = Some(notification);
  }

  pub fn clear_notification(&self) {
    self.state.write().notification = None;
  }

  pub fn notification(&self) -> Option<Notification> {
    self.state.read().notification.clone()
  }

  pub fn product(&self, index: u64) -> Option<Product> {
    self.state.map_read(|s| &s.products).iter().find(|p| p.index == index).cloned()
  }

  pub fn order(&self, index: u64) -> Option<Order> {
    self.state.map_read(|s| &s.orders).iter().find(|o| o.index == index).cloned()
  }

  pub fn in_flight(&self) -> Option<OperationKind> {
    self.state.read().in_flight
  }

  /// Marks `kind` as in flight. Fails with `Busy` while another operation
  /// holds the guard; the check and the mark happen under one write lock.
  pub fn begin_operation(&self, kind: OperationKind) -> MarketResult<OperationGuard> {
    self.state.update(|s| match s.in_flight {
      Some(current) => Err(MarketError::Busy(current.label())),
      None => {
        s.in_flight = Some(kind);
        Ok(())
      }
    })?;
    Ok(OperationGuard {
      state: self.state.clone(),
      kind,
    })
  }

  pub fn snapshot(&self) -> MarketView {
    let s = self.state.read();
    MarketView {
      account: s.session.as_ref().map(|session| session.account),
      products: s.products.clone(),
      orders: s.orders.clone(),
      balance: s.balance.clone(),
      notification: s.notification.clone(),
      busy: s.in_flight.is_some(),
      decimals: self.decimals,
    }
  }
}

/// Releases the in-flight mark when dropped, returning the market to idle.
pub struct OperationGuard {
  state: Shared<MarketState>,
  kind: OperationKind,
}

impl OperationGuard {
  pub fn kind(&self) -> OperationKind {
    self.kind
  }
}

impl Drop for OperationGuard {
  fn drop(&mut self) {
    let mut s = self.state.write();
    if s.in_flight == Some(self.kind) {
      s.in_flight = None;
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn second_operation_is_rejected_while_first_in_flight() {
    let market = Market::default();
    let guard = market.begin_operation(OperationKind::BuyProduct).unwrap();
    assert!(market.snapshot().busy);
    let err = market.begin_operation(OperationKind::RefundOrder).err().unwrap();
    assert!(matches!(err, MarketError::Busy("buy product")));
    drop(guard);
    assert!(market.in_flight().is_none());
    assert!(market.begin_operation(OperationKind::RefundOrder).is_ok());
  }

  #[test]
  fn write_is_rejected_while_refresh_holds_the_guard() {
    let market = Market::default();
    let refresh = market.begin_operation(OperationKind::Refresh).unwrap();
    let err = market.begin_operation(OperationKind::BuyProduct).err().unwrap();
    assert!(matches!(err, MarketError::Busy("refresh")));
    drop(refresh);
    assert!(market.begin_operation(OperationKind::BuyProduct).is_ok());
  }

  #[test]
  fn notifications_carry_status_markers() {
    assert_eq!(Notification::progress("Loading...").text, "⌛ Loading...");
    assert_eq!(Notification::warning("Oops").text, "⚠️ Oops.");
    assert_eq!(Notification::success("Done.").kind, NotificationKind::Success);
  }

  #[test]
  fn order_lookup_uses_contract_index() {
    let market = Market::default();
    market.replace_orders(vec![Order {
      index: 3,
      encrypted_message: "m".into(),
      product_id: 4,
    }]);
    assert_eq!(market.order(3).map(|o| o.product_id), Some(4));
    assert!(market.order(0).is_none());
  }
}
