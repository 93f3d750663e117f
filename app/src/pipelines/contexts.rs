// app/src/pipelines/contexts.rs

//! Context data structs for the application's flows. Handlers receive
//! these wrapped in `stepflow::SharedContext`; each flow is keyed in the
//! registry by its context type.

use crate::cart::CartTotals;
use crate::models::OrderStatus;
use crate::services::payment::{CheckoutSessionRequest, GatewaySession};
use crate::state::AppState;

/// One cart "add" attempt: merge a quantity into the session's cart.
#[derive(Clone)]
pub struct AddToCartData {
  pub app_state: AppState,
  pub session_token: String,
  pub product_id: i64,
  /// Raw `qty` form value; `None` when the field was absent.
  pub raw_quantity: Option<String>,
  pub quantity: Option<i64>,
  /// Quantity stored after the merge; `None` when the merge removed the
  /// entry.
  pub stored_quantity: Option<i64>,
}

impl AddToCartData {
  pub fn new(app_state: AppState, session_token: String, product_id: i64, raw_quantity: Option<String>) -> Self {
    Self {
      app_state,
      session_token,
      product_id,
      raw_quantity,
      quantity: None,
      stored_quantity: None,
    }
  }
}

/// One bulk quantity-update submission from the cart page.
#[derive(Clone)]
pub struct UpdateCartData {
  pub app_state: AppState,
  pub session_token: String,
  /// `(product_id, raw value)` pairs from the `qty_<id>` form fields.
  pub raw_updates: Vec<(i64, String)>,
  pub remaining_entries: Option<usize>,
}

impl UpdateCartData {
  pub fn new(app_state: AppState, session_token: String, raw_updates: Vec<(i64, String)>) -> Self {
    Self {
      app_state,
      session_token,
      raw_updates,
      remaining_entries: None,
    }
  }
}

/// One checkout attempt, from cart snapshot to the gateway redirect.
#[derive(Clone)]
pub struct CheckoutData {
  pub app_state: AppState,
  pub session_token: String,
  pub totals: Option<CartTotals>,
  pub session_request: Option<CheckoutSessionRequest>,
  pub gateway_session: Option<GatewaySession>,
  pub order_id: Option<i64>,
  /// Where the HTTP layer should send the customer when the flow ends.
  pub redirect_to: Option<String>,
  /// Flash-style notice code appended to the redirect target.
  pub notice: Option<&'static str>,
}

impl CheckoutData {
  pub fn new(app_state: AppState, session_token: String) -> Self {
    Self {
      app_state,
      session_token,
      totals: None,
      session_request: None,
      gateway_session: None,
      order_id: None,
      redirect_to: None,
      notice: None,
    }
  }
}

/// The customer arriving back on the success callback.
#[derive(Clone)]
pub struct OrderReturnData {
  pub app_state: AppState,
  pub session_token: String,
  pub gateway_session_id: Option<String>,
  /// Retrieved for display only; `None` both when no id came back and
  /// when retrieval failed.
  pub gateway_session: Option<GatewaySession>,
}

impl OrderReturnData {
  pub fn new(app_state: AppState, session_token: String, gateway_session_id: Option<String>) -> Self {
    Self {
      app_state,
      session_token,
      gateway_session_id,
      gateway_session: None,
    }
  }
}

/// One payment-processor webhook delivery.
#[derive(Clone)]
pub struct PaymentWebhookData {
  pub app_state: AppState,
  pub event_type: String,
  pub gateway_session_id: String,
  pub target_status: Option<OrderStatus>,
  pub order_updated: bool,
}

impl PaymentWebhookData {
  pub fn new(app_state: AppState, event_type: String, gateway_session_id: String) -> Self {
    Self {
      app_state,
      event_type,
      gateway_session_id,
      target_status: None,
      order_updated: false,
    }
  }
}
