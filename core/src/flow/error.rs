// bazaar/src/flow/error.rs
use thiserror::Error;

/// Framework-level failures of the flow engine itself. Handler failures are
/// carried in the flow's own error type, which must be `From<FlowError>`.
#[derive(Debug, Error)]
pub enum FlowError {
  #[error("Handler missing for non-optional step: {step_name}")]
  HandlerMissing { step_name: String },

  #[error("Flow '{flow_name}' ended before producing its result")]
  Incomplete { flow_name: String },
}
