// bazaar/src/flow/execution.rs

//! `Flow::run()`: executes steps and their handlers in order.

use super::control::{FlowControl, FlowOutcome};
use super::definition::{Flow, Handler};
use super::error::FlowError;
use super::shared::Shared;
use tracing::{event, info_span, Instrument, Level};

enum HandlersResult<Err> {
  Continue,
  Stop,
  Failed(Err),
}

async fn run_handlers<T, Err>(phase: &'static str, handlers: Option<&Vec<Handler<T, Err>>>, ctx: &Shared<T>) -> HandlersResult<Err>
where
  T: 'static + Send + Sync,
  Err: std::error::Error + Send + Sync + 'static,
{
  let Some(handlers) = handlers else {
    return HandlersResult::Continue;
  };
  for (handler_idx, handler_fn) in handlers.iter().enumerate() {
    match handler_fn(ctx.clone()).await {
      Ok(FlowControl::Continue) => {}
      Ok(FlowControl::Stop) => {
        event!(Level::INFO, phase, handler_index = handler_idx, "Flow stopped by handler.");
        return HandlersResult::Stop;
      }
      Err(e) => {
        event!(Level::ERROR, phase, handler_index = handler_idx, error = %e, "Handler failed.");
        return HandlersResult::Failed(e);
      }
    }
  }
  HandlersResult::Continue
}

impl<T, Err> Flow<T, Err>
where
  T: 'static + Send + Sync,
  Err: std::error::Error + From<FlowError> + Send + Sync + 'static,
{
  /// Executes the flow against the shared context `ctx`.
  ///
  /// Handler errors are returned as-is. A non-optional step without any
  /// handler yields `FlowError::HandlerMissing` converted into `Err`.
  pub async fn run(&self, ctx: Shared<T>) -> Result<FlowOutcome, Err> {
    event!(Level::DEBUG, flow = %self.name, num_steps = self.steps.len(), "Flow execution starting.");

    for (step_idx, step_def) in self.steps.iter().enumerate() {
      let step_name = step_def.name.as_str();
      let span = info_span!("flow_step", flow = %self.name, step_name, step_index = step_idx);

      let outcome = async {
        if step_def.should_skip(&ctx) {
          event!(Level::DEBUG, "Step skipped due to 'skip_if' condition.");
          return Ok(None);
        }

        let before = self.before.get(step_name).filter(|v| !v.is_empty());
        let on = self.on.get(step_name).filter(|v| !v.is_empty());
        let after = self.after.get(step_name).filter(|v| !v.is_empty());

        if before.is_none() && on.is_none() && after.is_none() {
          if step_def.optional {
            event!(Level::DEBUG, "Optional step has no handlers, skipping.");
            return Ok(None);
          }
          event!(Level::ERROR, "Non-optional step has no handlers.");
          return Err(Err::from(FlowError::HandlerMissing {
            step_name: step_def.name.clone(),
          }));
        }

        for (phase, handlers) in [("before", before), ("on", on), ("after", after)] {
          match run_handlers(phase, handlers, &ctx).await {
            HandlersResult::Continue => {}
            HandlersResult::Stop => return Ok(Some(FlowOutcome::Stopped)),
            HandlersResult::Failed(e) => return Err(e),
          }
        }
        event!(Level::DEBUG, "Step finished.");
        Ok(None)
      }
      .instrument(span)
      .await?;

      if let Some(stopped) = outcome {
        return Ok(stopped);
      }
    }

    event!(Level::DEBUG, flow = %self.name, "Flow execution completed.");
    Ok(FlowOutcome::Completed)
  }
}
