// src/step.rs

//! The definition of a single step within a flow.

use crate::context::SharedContext;
use std::sync::Arc;

/// Condition evaluated against the run's context before a step executes.
/// Returning `true` skips the step.
pub type SkipCondition<T> = Arc<dyn Fn(SharedContext<T>) -> bool + Send + Sync + 'static>;

/// A step's declaration: its name, whether it may legally have no
/// handlers, and an optional skip condition.
pub struct StepSpec<T: 'static + Send + Sync> {
  pub name: String,
  pub optional: bool,
  pub skip_if: Option<SkipCondition<T>>,
}

// Manual Clone: a derive would demand `T: Clone`, which the Arc'd
// condition does not need.
impl<T: 'static + Send + Sync> Clone for StepSpec<T> {
  fn clone(&self) -> Self {
    Self {
      name: self.name.clone(),
      optional: self.optional,
      skip_if: self.skip_if.clone(),
    }
  }
}

impl<T: 'static + Send + Sync> std::fmt::Debug for StepSpec<T> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("StepSpec")
      .field("name", &self.name)
      .field("optional", &self.optional)
      .field("skip_if_present", &self.skip_if.is_some())
      .finish()
  }
}
