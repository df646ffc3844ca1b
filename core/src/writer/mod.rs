// bazaar/src/writer/mod.rs

//! Marketplace Writer.
//!
//! Every write runs the same flow over an `OperationCtx`:
//!
//! | step       | before            | on                   | after          |
//! |------------|-------------------|----------------------|----------------|
//! | `approve`  |                   | token `approve`      |                |
//! | `send`     | "awaiting" notice | contract call        |                |
//! | `complete` |                   | success notification | reader refresh |
//!
//! `approve` is skipped when the plan carries no payment. Input validation
//! and price lookup happen in [`plan`] before the flow starts, while the
//! operation guard is already held.

pub mod operation;
pub mod plan;

pub use operation::{OperationCtx, OperationPhase, OperationReport, Plan, PreparedCall, ProductDraft, WriteRequest};
pub use plan::EMPTY_MESSAGE_PLACEHOLDER;

use crate::error::{MarketError, MarketResult};
use crate::flow::{Flow, FlowControl, FlowError, FlowOutcome, Shared, SkipCondition};
use crate::reader;
use crate::state::{Market, Notification, OperationKind};
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

type OperationFlow = Flow<OperationCtx, MarketError>;

/// Runs write operations against the session stored in `market`. Cloning is
/// cheap; clones share the flow and the phase record.
#[derive(Clone)]
pub struct Writer {
  market: Market,
  flow: Arc<OperationFlow>,
  last_phases: Shared<Vec<OperationPhase>>,
}

impl Writer {
  pub fn new(market: Market) -> Self {
    Self {
      market,
      flow: Arc::new(operation_flow()),
      last_phases: Shared::default(),
    }
  }

  pub fn market(&self) -> &Market {
    &self.market
  }

  /// Phases walked by the most recent operation that got past the guard,
  /// including the terminal `Succeeded`/`Failed`.
  pub fn last_phases(&self) -> Vec<OperationPhase> {
    self.last_phases.read().clone()
  }

  pub async fn create_product(&self, draft: ProductDraft) -> MarketResult<OperationReport> {
    self.execute(WriteRequest::CreateProduct(draft)).await
  }

  pub async fn buy_product(&self, index: u64, encrypted_message: impl Into<String>) -> MarketResult<OperationReport> {
    self
      .execute(WriteRequest::BuyProduct {
        index,
        encrypted_message: encrypted_message.into(),
      })
      .await
  }

  pub async fn set_pgp_key(&self, key: impl Into<String>) -> MarketResult<OperationReport> {
    self.execute(WriteRequest::SetPgpKey { key: key.into() }).await
  }

  pub async fn refund_order(&self, index: u64) -> MarketResult<OperationReport> {
    self.execute(WriteRequest::RefundOrder { index }).await
  }

  /// Guard, plan, flow. A `Busy` rejection returns before anything else
  /// happens and leaves the running operation's notification in place;
  /// every other failure becomes a warning notification.
  #[instrument(name = "writer::execute", skip(self, request), fields(operation = request.kind().label()))]
  pub async fn execute(&self, request: WriteRequest) -> MarketResult<OperationReport> {
    let kind = request.kind();
    let _guard = self.market.begin_operation(kind).map_err(|e| {
      warn!(error = %e, "Operation rejected.");
      e
    })?;

    let ctx = match self.prepare(request) {
      Ok(ctx) => ctx,
      Err(e) => {
        self.last_phases.update(|p| *p = vec![OperationPhase::Idle, OperationPhase::Failed]);
        return Err(self.fail(kind, e));
      }
    };

    let result = match self.flow.run(ctx.clone()).await {
      Ok(outcome) => self.report(kind, &ctx, outcome),
      Err(e) => Err(e),
    };
    if result.is_err() {
      ctx.update(|c| c.enter(OperationPhase::Failed));
    }
    let phases = ctx.read().phases.clone();
    self.last_phases.update(|p| *p = phases);

    match result {
      Ok(report) => {
        info!(tx = %report.receipt.tx_hash, refreshed = report.refreshed, "Operation succeeded.");
        Ok(report)
      }
      Err(e) => Err(self.fail(kind, e)),
    }
  }

  fn prepare(&self, request: WriteRequest) -> MarketResult<Shared<OperationCtx>> {
    let session = self.market.session()?;
    let plan = plan::plan(&self.market, request)?;
    self.market.notify(Notification::progress(&plan.progress));
    Ok(Shared::new(OperationCtx::new(self.market.clone(), session, plan)))
  }

  fn report(&self, kind: OperationKind, ctx: &Shared<OperationCtx>, outcome: FlowOutcome) -> MarketResult<OperationReport> {
    let c = ctx.read();
    match (outcome, &c.receipt) {
      (FlowOutcome::Completed, Some(receipt)) => Ok(OperationReport {
        kind,
        phases: c.phases.clone(),
        approval: c.approval.clone(),
        receipt: receipt.clone(),
        refreshed: c.refreshed,
      }),
      _ => Err(
        FlowError::Incomplete {
          flow_name: self.flow.name().to_string(),
        }
        .into(),
      ),
    }
  }

  fn fail(&self, kind: OperationKind, err: MarketError) -> MarketError {
    error!(operation = kind.label(), class = ?err.class(), error = %err, "Operation failed.");
    self.market.notify(Notification::warning(err.user_message()));
    err
  }
}

fn operation_flow() -> OperationFlow {
  let without_payment: SkipCondition<OperationCtx> = Arc::new(|c: &OperationCtx| c.plan.payment.is_none());
  let mut flow = OperationFlow::new(
    "write_operation",
    &[
      ("approve", false, Some(without_payment)),
      ("send", false, None),
      ("complete", false, None),
    ],
  );
  flow.on("approve", approve_payment);
  flow.before("send", announce_send);
  flow.on("send", send_call);
  flow.on("complete", mark_succeeded);
  flow.after("complete", refresh_market);
  flow
}

async fn approve_payment(ctx: Shared<OperationCtx>) -> MarketResult<FlowControl> {
  let (session, amount) = ctx.update(|c| {
    c.enter(OperationPhase::Approving);
    (c.session.clone(), c.plan.payment.unwrap_or_default())
  });
  let spender = session.marketplace.address();
  info!(%spender, %amount, "Requesting payment approval.");

  let receipt = session.token.approve(session.account, spender, amount).await?;
  ctx.update(|c| c.approval = Some(receipt));
  Ok(FlowControl::Continue)
}

async fn announce_send(ctx: Shared<OperationCtx>) -> MarketResult<FlowControl> {
  let (market, awaiting) = {
    let c = ctx.read();
    (c.market.clone(), c.plan.awaiting.clone())
  };
  if let Some(text) = awaiting {
    market.notify(Notification::progress(text));
  }
  Ok(FlowControl::Continue)
}

async fn send_call(ctx: Shared<OperationCtx>) -> MarketResult<FlowControl> {
  let (session, call) = ctx.update(|c| {
    c.enter(OperationPhase::Sending);
    (c.session.clone(), c.plan.call.clone())
  });
  let from = session.account;
  let marketplace = &session.marketplace;

  let receipt = match &call {
    PreparedCall::WriteProduct(product) => marketplace.write_product(from, product).await?,
    PreparedCall::BuyProduct {
      index,
      encrypted_message,
    } => marketplace.buy_product(from, *index, encrypted_message).await?,
    PreparedCall::SetVendorPgp { key } => marketplace.set_vendor_pgp(from, key).await?,
    PreparedCall::RefundOrder { index } => marketplace.refund_order(from, *index).await?,
  };
  info!(tx = %receipt.tx_hash, block = ?receipt.block_number, "Transaction mined.");
  ctx.update(|c| c.receipt = Some(receipt));
  Ok(FlowControl::Continue)
}

async fn mark_succeeded(ctx: Shared<OperationCtx>) -> MarketResult<FlowControl> {
  let (market, text) = ctx.update(|c| {
    c.enter(OperationPhase::Succeeded);
    (c.market.clone(), c.plan.success.clone())
  });
  market.notify(Notification::success(text));
  Ok(FlowControl::Continue)
}

/// Runs once per successful write. A failed refresh keeps the success
/// notification; the stale lists stay until the next refresh.
async fn refresh_market(ctx: Shared<OperationCtx>) -> MarketResult<FlowControl> {
  let market = ctx.read().market.clone();
  let refreshed = match reader::refresh_all(&market).await {
    Ok(()) => true,
    Err(e) => {
      warn!(error = %e, "Refresh after write failed.");
      false
    }
  };
  ctx.update(|c| c.refreshed = refreshed);
  Ok(FlowControl::Continue)
}
