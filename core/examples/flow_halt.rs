// core/examples/flow_halt.rs

//! Halting a flow from a handler: a guard step inspects the context and
//! stops the run cleanly, without an error, when there is nothing to do.

use stepflow::{Flow, FlowControl, FlowError, FlowOutcome, SharedContext};
use tracing::info;

#[derive(Clone, Debug, Default)]
struct DispatchContext {
  pending_items: Vec<String>,
  dispatched: usize,
}

#[tokio::main]
async fn main() -> Result<(), FlowError> {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

  info!("--- Flow Halt Example ---");

  let mut flow = Flow::<DispatchContext, FlowError>::new(&[
    ("check_queue", false, None),
    ("dispatch_items", false, None),
  ]);

  flow.on("check_queue", |ctx: SharedContext<DispatchContext>| async move {
    if ctx.read().pending_items.is_empty() {
      info!("Nothing pending, halting the run.");
      return Ok::<_, FlowError>(FlowControl::Halt);
    }
    Ok(FlowControl::Continue)
  });

  flow.on("dispatch_items", |ctx: SharedContext<DispatchContext>| async move {
    let mut data = ctx.write();
    data.dispatched = data.pending_items.len();
    data.pending_items.clear();
    info!("Dispatched {} item(s).", data.dispatched);
    Ok::<_, FlowError>(FlowControl::Continue)
  });

  // An empty queue halts at the guard step.
  let empty_ctx = SharedContext::new(DispatchContext::default());
  let outcome = flow.run(empty_ctx.clone()).await?;
  assert_eq!(outcome, FlowOutcome::Halted);
  assert_eq!(empty_ctx.read().dispatched, 0);

  // A loaded queue runs to completion.
  let loaded_ctx = SharedContext::new(DispatchContext {
    pending_items: vec!["a".to_string(), "b".to_string()],
    dispatched: 0,
  });
  let outcome = flow.run(loaded_ctx.clone()).await?;
  assert_eq!(outcome, FlowOutcome::Completed);
  assert_eq!(loaded_ctx.read().dispatched, 2);

  Ok(())
}
