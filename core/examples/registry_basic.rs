// core/examples/registry_basic.rs

//! Registering flows for two different context types and letting the
//! registry dispatch on the type of the context alone.

use stepflow::{Flow, FlowControl, FlowError, FlowRegistry, SharedContext};
use tracing::info;

#[derive(Clone, Debug, Default)]
struct GreetingContext {
  name: String,
  greeting: Option<String>,
}

#[derive(Clone, Debug, Default)]
struct SumContext {
  values: Vec<i64>,
  sum: i64,
}

#[tokio::main]
async fn main() -> Result<(), FlowError> {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

  info!("--- Flow Registry Example ---");

  // AppErr defaults to FlowError; applications usually plug in their own
  // error enum here.
  let registry = FlowRegistry::new();

  let mut greeting_flow = Flow::<GreetingContext, FlowError>::new(&[("compose", false, None)]);
  greeting_flow.on("compose", |ctx: SharedContext<GreetingContext>| async move {
    let mut data = ctx.write();
    data.greeting = Some(format!("Hello, {}!", data.name));
    Ok::<_, FlowError>(FlowControl::Continue)
  });
  registry.register(greeting_flow);

  let mut sum_flow = Flow::<SumContext, FlowError>::new(&[("accumulate", false, None)]);
  sum_flow.on("accumulate", |ctx: SharedContext<SumContext>| async move {
    let mut data = ctx.write();
    data.sum = data.values.iter().sum();
    Ok::<_, FlowError>(FlowControl::Continue)
  });
  registry.register(sum_flow);

  // The registry picks the flow from the context type.
  let greeting_ctx = SharedContext::new(GreetingContext {
    name: "stepflow".to_string(),
    greeting: None,
  });
  registry.run(greeting_ctx.clone()).await?;
  info!("{}", greeting_ctx.read().greeting.as_deref().unwrap_or("<none>"));

  let sum_ctx = SharedContext::new(SumContext {
    values: vec![1, 2, 3, 4],
    sum: 0,
  });
  registry.run(sum_ctx.clone()).await?;
  info!("sum = {}", sum_ctx.read().sum);

  assert_eq!(greeting_ctx.read().greeting.as_deref(), Some("Hello, stepflow!"));
  assert_eq!(sum_ctx.read().sum, 10);

  Ok(())
}
