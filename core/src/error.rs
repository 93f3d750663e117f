// src/error.rs

use thiserror::Error;

/// Faults raised by the engine itself, as opposed to errors returned by
/// user handlers (those carry the flow's own `Err` type).
#[derive(Debug, Error)]
pub enum FlowError {
  #[error("step not found in flow definition: {step_name}")]
  StepNotFound { step_name: String },

  #[error("non-optional step '{step_name}' has no handlers")]
  HandlerMissing { step_name: String },

  #[error("no flow registered for context type {context_type}")]
  NotRegistered { context_type: String },

  #[error("context type mismatch during dispatch (expected {expected_type})")]
  ContextMismatch { expected_type: String },

  #[error("internal engine error: {0}")]
  Internal(String),
}
