// bazaar/src/flow/control.rs

//! Signals for controlling flow execution and the outcome of a flow run.

/// Signal from a handler indicating whether the flow should continue or stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowControl {
  /// Continue with the remaining handlers and steps.
  Continue,
  /// Halt the flow. No further handlers in the current step or later steps run.
  Stop,
}

/// Outcome of a full flow execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowOutcome {
  /// Every non-skipped step ran to completion.
  Completed,
  /// A handler returned `FlowControl::Stop`.
  Stopped,
}
