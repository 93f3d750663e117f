// tests/registry_tests.rs

mod common;

use common::{recording_handler, setup_tracing, OtherTestContext, TestContext, TestError};
use stepflow::{Flow, FlowControl, FlowOutcome, FlowRegistry, SharedContext};

#[tokio::test]
async fn registry_dispatches_by_context_type() {
  setup_tracing();
  let registry = FlowRegistry::<TestError>::new();

  let mut flow = Flow::<TestContext, TestError>::new(&[("only", false, None)]);
  flow.on("only", recording_handler("only", "ran"));
  registry.register(flow);

  let ctx = SharedContext::new(TestContext::default());
  let outcome = registry.run(ctx.clone()).await.unwrap();

  assert_eq!(outcome, FlowOutcome::Completed);
  assert_eq!(ctx.read().message, "ran");
}

#[tokio::test]
async fn unregistered_context_type_is_an_error() {
  setup_tracing();
  let registry = FlowRegistry::<TestError>::new();

  let ctx = SharedContext::new(TestContext::default());
  let err = registry.run(ctx).await.unwrap_err();

  match err {
    TestError::Engine(msg) => assert!(msg.contains("NotRegistered"), "unexpected fault: {msg}"),
    other => panic!("expected engine fault, got {other:?}"),
  }
}

#[tokio::test]
async fn flows_for_different_context_types_coexist() {
  setup_tracing();
  let registry = FlowRegistry::<TestError>::new();

  let mut numbered = Flow::<TestContext, TestError>::new(&[("only", false, None)]);
  numbered.on("only", recording_handler("only", "numbered"));
  registry.register(numbered);

  let mut tagged = Flow::<OtherTestContext, TestError>::new(&[("tag", false, None)]);
  tagged.on("tag", |ctx: SharedContext<OtherTestContext>| async move {
    ctx.write().tag = "tagged".to_string();
    Ok::<_, TestError>(FlowControl::Continue)
  });
  registry.register(tagged);

  let numbered_ctx = SharedContext::new(TestContext::default());
  let tagged_ctx = SharedContext::new(OtherTestContext::default());

  registry.run(numbered_ctx.clone()).await.unwrap();
  registry.run(tagged_ctx.clone()).await.unwrap();

  assert_eq!(numbered_ctx.read().message, "numbered");
  assert_eq!(tagged_ctx.read().tag, "tagged");
}

#[tokio::test]
async fn re_registering_replaces_the_previous_flow() {
  setup_tracing();
  let registry = FlowRegistry::<TestError>::new();

  let mut first = Flow::<TestContext, TestError>::new(&[("only", false, None)]);
  first.on("only", recording_handler("only", "old"));
  registry.register(first);

  let mut second = Flow::<TestContext, TestError>::new(&[("only", false, None)]);
  second.on("only", recording_handler("only", "new"));
  registry.register(second);

  let ctx = SharedContext::new(TestContext::default());
  registry.run(ctx.clone()).await.unwrap();

  assert_eq!(ctx.read().message, "new");
}
