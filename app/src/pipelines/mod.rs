// app/src/pipelines/mod.rs

//! Flow definitions for every multi-step operation the storefront runs:
//! cart mutation, checkout, the payment return leg, and the payment
//! webhook.

use crate::errors::AppError;
use std::sync::Arc;
use stepflow::FlowRegistry;

pub mod cart_flow;
pub mod checkout_flow;
pub mod contexts;
pub mod order_return_flow;
pub mod webhook_flow;

/// Registers every flow with the registry. Called once at startup.
pub fn register_all_flows(flows: &Arc<FlowRegistry<AppError>>) {
  tracing::info!("Registering flows...");

  cart_flow::register_add_to_cart_flow(flows);
  cart_flow::register_update_cart_flow(flows);
  checkout_flow::register_checkout_flow(flows);
  order_return_flow::register_order_return_flow(flows);
  webhook_flow::register_payment_webhook_flow(flows);

  tracing::info!("All application flows registered.");
}
