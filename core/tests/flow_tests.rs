// tests/flow_tests.rs
mod common;

use bazaar::flow::{Flow, FlowControl, FlowOutcome, Shared, SkipCondition};
use common::*;
use serial_test::serial;
use std::sync::Arc;

#[tokio::test]
#[serial]
async fn test_flow_runs_steps_in_order() {
  setup_tracing();
  let mut flow = Flow::<TestContext, TestError>::new(
    "ordered",
    &[("step1", false, None), ("step2", false, None), ("step3", false, None)],
  );
  flow.on("step1", create_simple_handler("step1", " S1"));
  flow.on("step2", create_simple_handler("step2", " S2"));
  flow.on("step3", create_simple_handler("step3", " S3"));
  assert_eq!(flow.step_names().collect::<Vec<_>>(), vec!["step1", "step2", "step3"]);

  let ctx = Shared::new(TestContext::default());
  let result = flow.run(ctx.clone()).await;

  assert_eq!(result, Ok(FlowOutcome::Completed));
  let guard = ctx.read();
  assert_eq!(guard.counter, 3);
  assert_eq!(guard.message, " S1 S2 S3");
  assert_eq!(guard.steps_executed, vec!["step1", "step2", "step3"]);
}

#[tokio::test]
#[serial]
async fn test_before_on_after_run_in_phase_order() {
  setup_tracing();
  let mut flow = Flow::<TestContext, TestError>::new("phases", &[("only", false, None)]);
  flow.after("only", create_simple_handler("after", "C"));
  flow.on("only", create_simple_handler("on", "B"));
  flow.before("only", create_simple_handler("before", "A"));

  let ctx = Shared::new(TestContext::default());
  flow.run(ctx.clone()).await.unwrap();

  assert_eq!(ctx.read().message, "ABC");
}

#[tokio::test]
#[serial]
async fn test_flow_stops_on_control_stop() {
  setup_tracing();
  let mut flow = Flow::<TestContext, TestError>::new(
    "stopping",
    &[("stepA", false, None), ("stopStep", false, None), ("stepC", false, None)],
  );
  flow.on("stepA", create_simple_handler("stepA", "A"));
  flow.on("stopStep", create_simple_handler("stopStep", "S"));
  flow.after("stopStep", create_simple_handler("never_after", "X"));
  flow.on("stepC", create_simple_handler("stepC", "C"));

  let ctx = Shared::new(TestContext {
    should_stop_at: Some("stopStep".to_string()),
    ..Default::default()
  });
  let result = flow.run(ctx.clone()).await;

  assert_eq!(result, Ok(FlowOutcome::Stopped));
  let guard = ctx.read();
  assert_eq!(guard.message, "AS");
  assert_eq!(guard.steps_executed, vec!["stepA", "stopStep"]);
}

#[tokio::test]
#[serial]
async fn test_flow_propagates_handler_error() {
  setup_tracing();
  let mut flow = Flow::<TestContext, TestError>::new(
    "failing",
    &[("good_step", false, None), ("bad_step", false, None), ("another_step", false, None)],
  );
  flow.on("good_step", create_simple_handler("good_step", "Good"));
  flow.on("bad_step", create_failing_handler("bad_step", "I am a bad step!"));
  flow.on("another_step", create_simple_handler("another_step", "NeverRun"));

  let ctx = Shared::new(TestContext::default());
  let result = flow.run(ctx.clone()).await;

  assert_eq!(result, Err(TestError::Handler("I am a bad step!".to_string())));
  assert_eq!(ctx.read().steps_executed, vec!["good_step", "bad_step"]);
}

#[tokio::test]
#[serial]
async fn test_skip_condition_bypasses_step() {
  setup_tracing();
  let skip_middle: SkipCondition<TestContext> = Arc::new(|c: &TestContext| c.skip_middle);
  let mut flow = Flow::<TestContext, TestError>::new(
    "skipping",
    &[("first", false, None), ("middle", false, Some(skip_middle)), ("last", false, None)],
  );
  flow.on("first", create_simple_handler("first", "1"));
  flow.on("middle", create_simple_handler("middle", "2"));
  flow.on("last", create_simple_handler("last", "3"));

  let skipped = Shared::new(TestContext {
    skip_middle: true,
    ..Default::default()
  });
  flow.run(skipped.clone()).await.unwrap();
  assert_eq!(skipped.read().message, "13");

  let full = Shared::new(TestContext::default());
  flow.run(full.clone()).await.unwrap();
  assert_eq!(full.read().message, "123");
}

#[tokio::test]
#[serial]
async fn test_missing_handler_on_required_step_is_an_error() {
  setup_tracing();
  let mut flow = Flow::<TestContext, TestError>::new("gaps", &[("optional", true, None), ("required", false, None)]);
  flow.before("optional", |_ctx: Shared<TestContext>| async { Ok::<_, TestError>(FlowControl::Continue) });

  let result = flow.run(Shared::new(TestContext::default())).await;
  match result {
    Err(TestError::Flow(msg)) => assert!(msg.contains("required"), "unexpected message: {msg}"),
    other => panic!("expected a flow error, got {other:?}"),
  }
}

#[test]
#[should_panic(expected = "step 'ghost' is not defined")]
fn test_registering_unknown_step_panics() {
  let mut flow = Flow::<TestContext, TestError>::new("strict", &[("real", false, None)]);
  flow.on("ghost", create_simple_handler("ghost", ""));
}
