// bazaar/src/flow/step.rs

use super::Shared;

/// Predicate evaluated before a step runs; `true` skips the step.
pub type SkipCondition<T> = std::sync::Arc<dyn Fn(&T) -> bool + Send + Sync + 'static>;

/// Definition of a flow step: its name, whether it may lack handlers, and an
/// optional skip predicate over the flow context.
#[derive(Clone)]
pub struct StepDef<T: 'static + Send + Sync> {
  pub name: String,
  pub optional: bool,
  pub skip_if: Option<SkipCondition<T>>,
}

impl<T: 'static + Send + Sync> StepDef<T> {
  pub(crate) fn should_skip(&self, ctx: &Shared<T>) -> bool {
    match &self.skip_if {
      Some(cond) => {
        let guard = ctx.read();
        cond(&guard)
      }
      None => false,
    }
  }
}

impl<T: 'static + Send + Sync> std::fmt::Debug for StepDef<T> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("StepDef")
      .field("name", &self.name)
      .field("optional", &self.optional)
      .field("skip_if_present", &self.skip_if.is_some())
      .finish()
  }
}
