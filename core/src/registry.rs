// src/registry.rs

//! The [`FlowRegistry`]: a type-keyed collection of flows.
//!
//! Flows are stored erased and keyed by the `TypeId` of their context data
//! type, so `registry.run(ctx)` dispatches on the type of `ctx` alone. The
//! registry surfaces both engine faults and handler errors through one
//! application-chosen error type `AppErr`.

use crate::context::SharedContext;
use crate::control::FlowOutcome;
use crate::error::FlowError;
use crate::flow::Flow;

use async_trait::async_trait;
use parking_lot::Mutex;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::{event, Level};

/// Type-erased execution of one registered flow.
#[async_trait]
trait ErasedFlowRunner<AppErr>: Send + Sync
where
  AppErr: std::error::Error + Send + Sync + 'static,
{
  /// `ctx_obj` must hold a `SharedContext<TData>` for the runner's `TData`.
  async fn run_erased(&self, ctx_obj: Box<dyn Any + Send>) -> Result<FlowOutcome, AppErr>;
}

struct FlowHolder<TData, HandlerErr, AppErr>
where
  TData: 'static + Send + Sync,
  HandlerErr: std::error::Error + From<FlowError> + Send + Sync + 'static,
  AppErr: std::error::Error + From<HandlerErr> + From<FlowError> + Send + Sync + 'static,
{
  flow: Arc<Flow<TData, HandlerErr>>,
  _app_err: PhantomData<fn() -> AppErr>,
}

#[async_trait]
impl<TData, HandlerErr, AppErr> ErasedFlowRunner<AppErr> for FlowHolder<TData, HandlerErr, AppErr>
where
  TData: 'static + Send + Sync,
  HandlerErr: std::error::Error + From<FlowError> + Send + Sync + 'static,
  AppErr: std::error::Error + From<HandlerErr> + From<FlowError> + Send + Sync + 'static,
{
  async fn run_erased(&self, ctx_obj: Box<dyn Any + Send>) -> Result<FlowOutcome, AppErr> {
    let ctx = match ctx_obj.downcast::<SharedContext<TData>>() {
      Ok(boxed) => *boxed,
      Err(_) => {
        let expected_type = std::any::type_name::<SharedContext<TData>>().to_string();
        event!(Level::ERROR, %expected_type, "context object type mismatch at dispatch");
        return Err(AppErr::from(FlowError::ContextMismatch { expected_type }));
      }
    };
    self.flow.run(ctx).await.map_err(AppErr::from)
  }
}

/// Registry of flows, keyed by context data type.
///
/// `AppErr` is the error type `run` returns; it must be `From<FlowError>`
/// to carry registry-level faults (unknown context type, dispatch
/// mismatch) and `From<HandlerErr>` for each registered flow's handler
/// error type.
pub struct FlowRegistry<AppErr = FlowError>
where
  AppErr: std::error::Error + From<FlowError> + Send + Sync + 'static,
{
  flows: Mutex<HashMap<TypeId, Arc<dyn ErasedFlowRunner<AppErr>>>>,
}

impl<AppErr> FlowRegistry<AppErr>
where
  AppErr: std::error::Error + From<FlowError> + Send + Sync + 'static,
{
  pub fn new() -> Self {
    Self {
      flows: Mutex::new(HashMap::new()),
    }
  }

  /// Registers a flow for its context type, replacing any previous flow
  /// registered for the same type.
  pub fn register<TData, HandlerErr>(&self, flow: Flow<TData, HandlerErr>)
  where
    TData: 'static + Send + Sync,
    HandlerErr: std::error::Error + From<FlowError> + Send + Sync + 'static,
    AppErr: From<HandlerErr>,
  {
    event!(Level::DEBUG, context_type = %std::any::type_name::<TData>(), "registering flow");
    let holder = FlowHolder::<TData, HandlerErr, AppErr> {
      flow: Arc::new(flow),
      _app_err: PhantomData,
    };
    self.flows.lock().insert(TypeId::of::<TData>(), Arc::new(holder));
  }

  /// Runs the flow registered for `TData` against `ctx`.
  pub async fn run<TData>(&self, ctx: SharedContext<TData>) -> Result<FlowOutcome, AppErr>
  where
    TData: 'static + Send + Sync,
  {
    let runner = {
      let flows = self.flows.lock();
      flows.get(&TypeId::of::<TData>()).cloned()
    };

    let runner = runner.ok_or_else(|| {
      let context_type = std::any::type_name::<TData>().to_string();
      event!(Level::ERROR, %context_type, "no flow registered for context type");
      AppErr::from(FlowError::NotRegistered { context_type })
    })?;

    let ctx_obj: Box<dyn Any + Send> = Box::new(ctx);
    runner.run_erased(ctx_obj).await
  }
}

impl<AppErr> Default for FlowRegistry<AppErr>
where
  AppErr: std::error::Error + From<FlowError> + Send + Sync + 'static,
{
  fn default() -> Self {
    Self::new()
  }
}
