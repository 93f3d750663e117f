// core/examples/basic_flow.rs

use stepflow::{Flow, FlowControl, FlowError, FlowOutcome, SharedContext};
use tracing::info;

// The context data shared by every handler of the flow.
#[derive(Clone, Debug, Default)]
struct BasicContext {
  message_log: Vec<String>,
  counter: i32,
}

// This example uses FlowError directly as the handler error type. Real
// applications usually define their own:
//   #[derive(Debug, thiserror::Error)]
//   enum MyError { #[error("engine: {0}")] Flow(#[from] FlowError), /* ... */ }

#[tokio::main]
async fn main() -> Result<(), FlowError> {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

  info!("--- Basic Flow Example ---");

  let mut flow = Flow::<BasicContext, FlowError>::new(&[
    ("step_alpha", false, None), // Step name, optional, skip_if
    ("step_beta", false, None),
    ("step_gamma", false, None),
  ]);

  flow.on("step_alpha", |ctx: SharedContext<BasicContext>| async move {
    let mut data = ctx.write();
    data.counter += 1;
    let msg = format!("Alpha executed: counter = {}", data.counter);
    info!("{}", msg);
    data.message_log.push(msg);
    Ok::<_, FlowError>(FlowControl::Continue)
  });

  flow.on("step_beta", |ctx: SharedContext<BasicContext>| async move {
    let mut data = ctx.write();
    data.counter *= 2;
    let msg = format!("Beta executed: counter = {}", data.counter);
    info!("{}", msg);
    data.message_log.push(msg);
    Ok::<_, FlowError>(FlowControl::Continue)
  });

  flow.on("step_gamma", |ctx: SharedContext<BasicContext>| async move {
    let mut data = ctx.write();
    data.counter -= 1;
    let msg = format!("Gamma executed: counter = {}", data.counter);
    info!("{}", msg);
    data.message_log.push(msg);
    Ok::<_, FlowError>(FlowControl::Continue)
  });

  let ctx = SharedContext::new(BasicContext {
    message_log: Vec::new(),
    counter: 5,
  });

  info!("Starting flow execution...");
  let outcome = flow.run(ctx.clone()).await?;

  match outcome {
    FlowOutcome::Completed => info!("Flow completed successfully!"),
    FlowOutcome::Halted => info!("Flow was halted early."),
  }

  let final_state = ctx.read();
  info!("Final counter value: {}", final_state.counter);
  for log_entry in &final_state.message_log {
    info!("- {}", log_entry);
  }

  // Expected: (5+1)*2 - 1 = 11
  assert_eq!(final_state.counter, 11);
  assert_eq!(final_state.message_log.len(), 3);

  Ok(())
}
