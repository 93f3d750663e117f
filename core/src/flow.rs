// src/flow.rs

//! The [`Flow`] type: construction, hook registration, structural
//! mutation, and execution.

use crate::context::SharedContext;
use crate::control::{FlowControl, FlowOutcome};
use crate::error::FlowError;
use crate::step::{SkipCondition, StepSpec};

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use tracing::{event, span, Level};

/// A registered step handler: an async function over the run's shared
/// context, resolving to a control signal or the flow's error type.
pub type Handler<TData, Err> = Box<
  dyn Fn(SharedContext<TData>) -> Pin<Box<dyn Future<Output = Result<FlowControl, Err>> + Send>>
    + Send
    + Sync,
>;

/// An ordered sequence of named steps over a shared context type `TData`.
///
/// `Err` is the error type the flow's handlers return. It must be
/// `From<FlowError>` so engine faults (a non-optional step without
/// handlers, registry dispatch problems) surface through the same channel
/// as handler failures.
pub struct Flow<TData, Err>
where
  TData: 'static + Send + Sync,
  Err: std::error::Error + From<FlowError> + Send + Sync + 'static,
{
  pub(crate) steps: Vec<StepSpec<TData>>,

  // Handlers per phase, keyed by step name.
  pub(crate) before: HashMap<String, Vec<Handler<TData, Err>>>,
  pub(crate) on: HashMap<String, Vec<Handler<TData, Err>>>,
  pub(crate) after: HashMap<String, Vec<Handler<TData, Err>>>,
}

impl<TData, Err> Flow<TData, Err>
where
  TData: 'static + Send + Sync,
  Err: std::error::Error + From<FlowError> + Send + Sync + 'static,
{
  /// Creates a flow from `(name, optional, skip_if)` step declarations.
  pub fn new(step_specs: &[(&str, bool, Option<SkipCondition<TData>>)]) -> Self {
    let steps = step_specs
      .iter()
      .map(|(name, optional, skip_if)| StepSpec {
        name: (*name).to_string(),
        optional: *optional,
        skip_if: skip_if.clone(),
      })
      .collect();

    Self {
      steps,
      before: HashMap::new(),
      on: HashMap::new(),
      after: HashMap::new(),
    }
  }

  // A missing step name at registration time is a programming error
  // (typo in a step name), not a runtime fault.
  pub(crate) fn ensure_step_exists(&self, step_name: &str) {
    if !self.steps.iter().any(|s| s.name == step_name) {
      panic!("stepflow setup error: step '{}' not found in flow definition", step_name);
    }
  }

  fn ensure_step_absent(&self, step_name: &str) {
    if self.steps.iter().any(|s| s.name == step_name) {
      panic!("stepflow setup error: step '{}' already exists in flow definition", step_name);
    }
  }

  // --- Structural mutation ---

  pub fn insert_before_step<S: Into<String>>(
    &mut self,
    existing_step_name: &str,
    new_step_name: S,
    optional: bool,
    skip_if: Option<SkipCondition<TData>>,
  ) {
    self.ensure_step_exists(existing_step_name);
    let idx = self
      .steps
      .iter()
      .position(|s| s.name == existing_step_name)
      .unwrap_or_else(|| unreachable!("existence checked above"));
    let name: String = new_step_name.into();
    self.ensure_step_absent(&name);
    self.steps.insert(idx, StepSpec { name, optional, skip_if });
  }

  pub fn insert_after_step<S: Into<String>>(
    &mut self,
    existing_step_name: &str,
    new_step_name: S,
    optional: bool,
    skip_if: Option<SkipCondition<TData>>,
  ) {
    self.ensure_step_exists(existing_step_name);
    let idx = self
      .steps
      .iter()
      .position(|s| s.name == existing_step_name)
      .unwrap_or_else(|| unreachable!("existence checked above"));
    let name: String = new_step_name.into();
    self.ensure_step_absent(&name);
    self.steps.insert(idx + 1, StepSpec { name, optional, skip_if });
  }

  /// Removes a step and every handler attached to it. Removing an unknown
  /// step is a no-op.
  pub fn remove_step(&mut self, step_name: &str) {
    if let Some(idx) = self.steps.iter().position(|s| s.name == step_name) {
      self.steps.remove(idx);
      self.before.remove(step_name);
      self.on.remove(step_name);
      self.after.remove(step_name);
    }
  }

  pub fn set_optional(&mut self, step_name: &str, optional: bool) {
    self.ensure_step_exists(step_name);
    if let Some(step) = self.steps.iter_mut().find(|s| s.name == step_name) {
      step.optional = optional;
    }
  }

  pub fn set_skip_condition(&mut self, step_name: &str, skip_if: Option<SkipCondition<TData>>) {
    self.ensure_step_exists(step_name);
    if let Some(step) = self.steps.iter_mut().find(|s| s.name == step_name) {
      step.skip_if = skip_if;
    }
  }

  // --- Hook registration ---

  /// Registers a `before` handler for a step. The handler's error type
  /// converts into the flow's `Err`.
  pub fn before<F, E>(&mut self, step_name: &str, handler_fn: impl Fn(SharedContext<TData>) -> F + Send + Sync + 'static)
  where
    F: Future<Output = Result<FlowControl, E>> + Send + 'static,
    E: Into<Err> + Send + Sync + 'static,
  {
    self.ensure_step_exists(step_name);
    self
      .before
      .entry(step_name.to_string())
      .or_default()
      .push(Self::erase(handler_fn));
  }

  /// Registers an `on` handler for a step.
  pub fn on<F, E>(&mut self, step_name: &str, handler_fn: impl Fn(SharedContext<TData>) -> F + Send + Sync + 'static)
  where
    F: Future<Output = Result<FlowControl, E>> + Send + 'static,
    E: Into<Err> + Send + Sync + 'static,
  {
    self.ensure_step_exists(step_name);
    self
      .on
      .entry(step_name.to_string())
      .or_default()
      .push(Self::erase(handler_fn));
  }

  /// Registers an `after` handler for a step.
  pub fn after<F, E>(&mut self, step_name: &str, handler_fn: impl Fn(SharedContext<TData>) -> F + Send + Sync + 'static)
  where
    F: Future<Output = Result<FlowControl, E>> + Send + 'static,
    E: Into<Err> + Send + Sync + 'static,
  {
    self.ensure_step_exists(step_name);
    self
      .after
      .entry(step_name.to_string())
      .or_default()
      .push(Self::erase(handler_fn));
  }

  fn erase<F, E>(handler_fn: impl Fn(SharedContext<TData>) -> F + Send + Sync + 'static) -> Handler<TData, Err>
  where
    F: Future<Output = Result<FlowControl, E>> + Send + 'static,
    E: Into<Err> + Send + Sync + 'static,
  {
    Box::new(move |ctx| {
      let fut = handler_fn(ctx);
      Box::pin(async move { fut.await.map_err(Into::into) })
    })
  }

  // --- Execution ---

  /// Runs the flow against `ctx`.
  ///
  /// Steps execute in declaration order; within a step the phases run
  /// `before`, `on`, `after`. A handler returning [`FlowControl::Halt`]
  /// ends the run with [`FlowOutcome::Halted`]; a handler error ends it
  /// with that error. A non-optional step with no handlers in any phase is
  /// a [`FlowError::HandlerMissing`] fault.
  pub async fn run(&self, ctx: SharedContext<TData>) -> Result<FlowOutcome, Err> {
    event!(Level::DEBUG, flow_context_type = %std::any::type_name::<TData>(), num_steps = self.steps.len(), "flow run starting");

    for (step_idx, step) in self.steps.iter().enumerate() {
      let step_span = span!(Level::INFO, "flow_step", step_name = %step.name, step_index = step_idx, optional = step.optional);
      let _guard = step_span.enter();

      if let Some(skip_if) = &step.skip_if {
        if skip_if(ctx.clone()) {
          event!(Level::DEBUG, "step skipped by skip_if condition");
          continue;
        }
      }

      let phases = [
        ("before", self.before.get(step.name.as_str())),
        ("on", self.on.get(step.name.as_str())),
        ("after", self.after.get(step.name.as_str())),
      ];

      if phases.iter().all(|(_, hs)| hs.map_or(true, |v| v.is_empty())) {
        if step.optional {
          event!(Level::DEBUG, "optional step has no handlers, skipping");
          continue;
        }
        event!(Level::ERROR, "non-optional step has no handlers");
        return Err(Err::from(FlowError::HandlerMissing {
          step_name: step.name.clone(),
        }));
      }

      for (phase, handlers) in phases {
        let Some(handlers) = handlers else { continue };
        for handler_fn in handlers {
          match handler_fn(ctx.clone()).await {
            Ok(FlowControl::Continue) => {}
            Ok(FlowControl::Halt) => {
              event!(Level::INFO, phase, "flow halted by handler");
              return Ok(FlowOutcome::Halted);
            }
            Err(e) => {
              event!(Level::ERROR, phase, error = %e, "handler failed");
              return Err(e);
            }
          }
        }
      }
    }

    event!(Level::DEBUG, "flow run completed");
    Ok(FlowOutcome::Completed)
  }
}
