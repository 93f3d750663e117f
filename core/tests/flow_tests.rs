// tests/flow_tests.rs

mod common;

use common::{failing_handler, recording_handler, setup_tracing, TestContext, TestError};
use std::sync::Arc;
use stepflow::{Flow, FlowControl, FlowOutcome, SharedContext};

fn three_step_flow() -> Flow<TestContext, TestError> {
  let mut flow = Flow::<TestContext, TestError>::new(&[
    ("first", false, None),
    ("second", false, None),
    ("third", false, None),
  ]);
  flow.on("first", recording_handler("first", "a"));
  flow.on("second", recording_handler("second", "b"));
  flow.on("third", recording_handler("third", "c"));
  flow
}

#[tokio::test]
async fn steps_run_in_declaration_order() {
  setup_tracing();
  let flow = three_step_flow();
  let ctx = SharedContext::new(TestContext::default());

  let outcome = flow.run(ctx.clone()).await.unwrap();

  assert_eq!(outcome, FlowOutcome::Completed);
  let guard = ctx.read();
  assert_eq!(guard.counter, 3);
  assert_eq!(guard.message, "abc");
  assert_eq!(guard.steps_executed, vec!["first", "second", "third"]);
}

#[tokio::test]
async fn halt_skips_remaining_steps() {
  setup_tracing();
  let flow = three_step_flow();
  let ctx = SharedContext::new(TestContext {
    halt_at: Some("second".to_string()),
    ..Default::default()
  });

  let outcome = flow.run(ctx.clone()).await.unwrap();

  assert_eq!(outcome, FlowOutcome::Halted);
  let guard = ctx.read();
  assert_eq!(guard.steps_executed, vec!["first", "second"]);
  assert_eq!(guard.message, "ab");
}

#[tokio::test]
async fn handler_error_propagates_and_stops_the_run() {
  setup_tracing();
  let mut flow = Flow::<TestContext, TestError>::new(&[("ok", false, None), ("boom", false, None), ("never", false, None)]);
  flow.on("ok", recording_handler("ok", "x"));
  flow.on("boom", failing_handler("boom", "exploded"));
  flow.on("never", recording_handler("never", "y"));
  let ctx = SharedContext::new(TestContext::default());

  let err = flow.run(ctx.clone()).await.unwrap_err();

  assert_eq!(err, TestError::Handler("exploded".to_string()));
  let guard = ctx.read();
  assert_eq!(guard.steps_executed, vec!["ok", "boom"]);
}

#[tokio::test]
async fn skip_condition_bypasses_step() {
  setup_tracing();
  let skip_second: Option<stepflow::SkipCondition<TestContext>> =
    Some(Arc::new(|ctx: SharedContext<TestContext>| ctx.read().counter >= 1));
  let mut flow =
    Flow::<TestContext, TestError>::new(&[("first", false, None), ("second", false, skip_second), ("third", false, None)]);
  flow.on("first", recording_handler("first", "a"));
  flow.on("second", recording_handler("second", "b"));
  flow.on("third", recording_handler("third", "c"));
  let ctx = SharedContext::new(TestContext::default());

  let outcome = flow.run(ctx.clone()).await.unwrap();

  assert_eq!(outcome, FlowOutcome::Completed);
  assert_eq!(ctx.read().steps_executed, vec!["first", "third"]);
}

#[tokio::test]
async fn optional_step_without_handlers_is_skipped() {
  setup_tracing();
  let mut flow = Flow::<TestContext, TestError>::new(&[("first", false, None), ("maybe", true, None)]);
  flow.on("first", recording_handler("first", "a"));
  let ctx = SharedContext::new(TestContext::default());

  let outcome = flow.run(ctx.clone()).await.unwrap();

  assert_eq!(outcome, FlowOutcome::Completed);
  assert_eq!(ctx.read().steps_executed, vec!["first"]);
}

#[tokio::test]
async fn required_step_without_handlers_is_a_fault() {
  setup_tracing();
  let mut flow = Flow::<TestContext, TestError>::new(&[("first", false, None), ("empty", false, None)]);
  flow.on("first", recording_handler("first", "a"));
  let ctx = SharedContext::new(TestContext::default());

  let err = flow.run(ctx).await.unwrap_err();

  match err {
    TestError::Engine(msg) => assert!(msg.contains("HandlerMissing"), "unexpected fault: {msg}"),
    other => panic!("expected engine fault, got {other:?}"),
  }
}

#[tokio::test]
async fn phases_run_before_on_after_within_a_step() {
  setup_tracing();
  let mut flow = Flow::<TestContext, TestError>::new(&[("only", false, None)]);
  flow.after("only", recording_handler("only:after", "3"));
  flow.before("only", recording_handler("only:before", "1"));
  flow.on("only", recording_handler("only:on", "2"));
  let ctx = SharedContext::new(TestContext::default());

  flow.run(ctx.clone()).await.unwrap();

  let guard = ctx.read();
  assert_eq!(guard.message, "123");
  assert_eq!(guard.steps_executed, vec!["only:before", "only:on", "only:after"]);
}

#[tokio::test]
async fn inserted_and_removed_steps_change_execution() {
  setup_tracing();
  let mut flow = three_step_flow();
  flow.insert_after_step("first", "first_and_a_half", false, None);
  flow.on("first_and_a_half", recording_handler("first_and_a_half", "+"));
  flow.insert_before_step("first", "zeroth", false, None);
  flow.on("zeroth", recording_handler("zeroth", "0"));
  flow.remove_step("second");
  let ctx = SharedContext::new(TestContext::default());

  flow.run(ctx.clone()).await.unwrap();

  assert_eq!(ctx.read().steps_executed, vec!["zeroth", "first", "first_and_a_half", "third"]);
  assert_eq!(ctx.read().message, "0a+c");
}

#[tokio::test]
async fn set_optional_and_set_skip_condition_apply() {
  setup_tracing();
  let mut flow = Flow::<TestContext, TestError>::new(&[("first", false, None), ("second", false, None)]);
  flow.on("first", recording_handler("first", "a"));
  flow.on("second", recording_handler("second", "b"));
  // "second" now skips whenever "first" already ran.
  flow.set_skip_condition(
    "second",
    Some(Arc::new(|ctx: SharedContext<TestContext>| ctx.read().counter >= 1)),
  );
  // An empty step demoted to optional no longer faults.
  flow.insert_after_step("second", "trailing", false, None);
  flow.set_optional("trailing", true);
  let ctx = SharedContext::new(TestContext::default());

  let outcome = flow.run(ctx.clone()).await.unwrap();

  assert_eq!(outcome, FlowOutcome::Completed);
  assert_eq!(ctx.read().steps_executed, vec!["first"]);
}

#[test]
#[should_panic(expected = "not found in flow definition")]
fn registering_on_unknown_step_panics() {
  let mut flow = Flow::<TestContext, TestError>::new(&[("first", false, None)]);
  flow.on("no_such_step", recording_handler("no_such_step", "x"));
}
