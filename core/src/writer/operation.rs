// bazaar/src/writer/operation.rs

//! Data carried through a write operation's flow.

use crate::chain::TxReceipt;
use crate::model::NewProduct;
use crate::session::Session;
use crate::state::{Market, OperationKind};
use alloy_primitives::U256;

/// Product form input as typed by the vendor; price is a display amount.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductDraft {
  pub name: String,
  pub image: String,
  pub description: String,
  pub price: String,
  pub stock: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteRequest {
  CreateProduct(ProductDraft),
  BuyProduct { index: u64, encrypted_message: String },
  SetPgpKey { key: String },
  RefundOrder { index: u64 },
}

impl WriteRequest {
  pub fn kind(&self) -> OperationKind {
    match self {
      WriteRequest::CreateProduct(_) => OperationKind::CreateProduct,
      WriteRequest::BuyProduct { .. } => OperationKind::BuyProduct,
      WriteRequest::SetPgpKey { .. } => OperationKind::SetPgpKey,
      WriteRequest::RefundOrder { .. } => OperationKind::RefundOrder,
    }
  }
}

/// The validated contract call a request turns into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreparedCall {
  WriteProduct(NewProduct),
  BuyProduct { index: u64, encrypted_message: String },
  SetVendorPgp { key: String },
  RefundOrder { index: u64 },
}

/// A validated request: the call to send, the payment to approve first and
/// the notification texts for each stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
  pub call: PreparedCall,
  /// `None` when no payment is involved and approval is skipped.
  pub payment: Option<U256>,
  pub progress: String,
  /// Shown once approval went through, while the payment itself is sent.
  pub awaiting: Option<String>,
  pub success: String,
}

/// `Idle → Approving → Sending → {Succeeded | Failed}`. Operations without
/// payment skip `Approving`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationPhase {
  Idle,
  Approving,
  Sending,
  Succeeded,
  Failed,
}

/// Flow context of one write operation.
pub struct OperationCtx {
  pub market: Market,
  pub session: Session,
  pub plan: Plan,
  pub phases: Vec<OperationPhase>,
  pub approval: Option<TxReceipt>,
  pub receipt: Option<TxReceipt>,
  pub refreshed: bool,
}

impl OperationCtx {
  pub fn new(market: Market, session: Session, plan: Plan) -> Self {
    Self {
      market,
      session,
      plan,
      phases: vec![OperationPhase::Idle],
      approval: None,
      receipt: None,
      refreshed: false,
    }
  }

  pub fn phase(&self) -> OperationPhase {
    self.phases.last().copied().unwrap_or(OperationPhase::Idle)
  }

  pub(crate) fn enter(&mut self, phase: OperationPhase) {
    self.phases.push(phase);
  }
}

/// What a finished operation reports back to its caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationReport {
  pub kind: OperationKind,
  pub phases: Vec<OperationPhase>,
  pub approval: Option<TxReceipt>,
  pub receipt: TxReceipt,
  /// `false` when the follow-up refresh failed; the write itself succeeded.
  pub refreshed: bool,
}

impl OperationReport {
  pub fn final_phase(&self) -> OperationPhase {
    self.phases.last().copied().unwrap_or(OperationPhase::Idle)
  }
}
