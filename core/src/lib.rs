// src/lib.rs

//! stepflow: a small ASYNC step-flow engine for Rust.
//!
//! A [`Flow`] is an ordered list of named steps. Each step can carry
//! `before`/`on`/`after` handlers, an `optional` marker, and a skip
//! condition evaluated against the run's shared context. Handlers are
//! asynchronous, receive a [`SharedContext`] clone, and steer execution by
//! returning [`FlowControl::Continue`] or [`FlowControl::Halt`].
//!
//! Flows for different context types are collected in a [`FlowRegistry`],
//! which dispatches a run to the flow registered for the context's type
//! and surfaces engine faults through an application-chosen error type.

pub mod context;
pub mod control;
pub mod error;
pub mod flow;
pub mod registry;
pub mod step;

// --- Re-exports for the public API ---

pub use crate::context::SharedContext;
pub use crate::control::{FlowControl, FlowOutcome};
pub use crate::error::FlowError;
pub use crate::flow::{Flow, Handler};
pub use crate::registry::FlowRegistry;
pub use crate::step::{SkipCondition, StepSpec};
