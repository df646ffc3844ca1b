// bazaar/src/flow/mod.rs

//! A small async step engine. Write operations are expressed as flows of
//! named steps, each with `before`/`on`/`after` handlers over a shared
//! context, with early stop and skip predicates.

pub mod control;
pub mod definition;
pub mod error;
pub mod execution;
pub mod shared;
pub mod step;

pub use control::{FlowControl, FlowOutcome};
pub use definition::{Flow, Handler};
pub use error::FlowError;
pub use shared::Shared;
pub use step::{SkipCondition, StepDef};
