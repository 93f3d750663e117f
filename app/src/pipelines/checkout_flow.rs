// app/src/pipelines/checkout_flow.rs

//! The checkout orchestrator: snapshot the cart, build the payment
//! session request, hand off to the gateway, and record the pending
//! order. An empty cart and a gateway refusal both halt the flow with a
//! safe redirect instead of an error; the customer is never stranded on a
//! failed page.

use crate::cart;
use crate::errors::AppError;
use crate::pipelines::contexts::CheckoutData;
use crate::services::payment::{CheckoutSessionRequest, LineItem, SESSION_ID_PLACEHOLDER};
use std::sync::Arc;
use stepflow::{Flow, FlowControl, FlowRegistry, SharedContext};
use tracing::{info, warn};

pub fn register_checkout_flow(flows: &Arc<FlowRegistry<AppError>>) {
  let mut flow = Flow::<CheckoutData, AppError>::new(&[
    ("load_cart_lines", false, None),
    ("build_session_request", false, None),
    ("create_gateway_session", false, None),
    ("record_pending_order", false, None),
  ]);

  // Snapshot and price the cart. No resolvable lines means there is
  // nothing to charge: bounce home without touching the gateway or the
  // orders table.
  flow.on("load_cart_lines", |ctx: SharedContext<CheckoutData>| async move {
    let (app_state, token) = {
      let guard = ctx.read();
      (guard.app_state.clone(), guard.session_token.clone())
    };

    let cart = app_state.carts.load(&token);
    let totals = cart::totals(&cart, &app_state.catalog()).await.map_err(AppError::Sqlx)?;

    if totals.is_empty() {
      info!("checkout attempted with no resolvable cart lines");
      let mut guard = ctx.write();
      guard.redirect_to = Some("/".to_string());
      guard.notice = Some("cart-empty");
      return Ok::<_, AppError>(FlowControl::Halt);
    }

    info!(total = totals.total, lines = totals.lines.len(), "cart priced for checkout");
    ctx.write().totals = Some(totals);
    Ok(FlowControl::Continue)
  });

  // One line item per cart line, priced in minor units. The catalog price
  // is a whole-unit integer, so the scaling is a fixed × 100.
  flow.on("build_session_request", |ctx: SharedContext<CheckoutData>| async move {
    let (config, totals) = {
      let guard = ctx.read();
      let totals = guard
        .totals
        .clone()
        .ok_or_else(|| AppError::Internal("cart totals missing after load step".to_string()))?;
      (guard.app_state.config.clone(), totals)
    };

    let line_items = totals
      .lines
      .iter()
      .map(|line| LineItem {
        currency: config.currency.clone(),
        unit_amount: line.product.price * 100,
        name: line.product.title.clone(),
        description: line.product.description.clone().unwrap_or_default(),
        quantity: line.quantity,
      })
      .collect();

    let request = CheckoutSessionRequest::one_time(
      line_items,
      format!(
        "{}/order_success?session_id={}",
        config.app_base_url, SESSION_ID_PLACEHOLDER
      ),
      format!("{}/payment_redirect", config.app_base_url),
    );

    ctx.write().session_request = Some(request);
    Ok::<_, AppError>(FlowControl::Continue)
  });

  // The gateway call is the one external dependency of the whole flow.
  // Refusal leaves no partial order behind; the customer gets the cart
  // page back with a retry notice.
  flow.on("create_gateway_session", |ctx: SharedContext<CheckoutData>| async move {
    let (gateway, request) = {
      let guard = ctx.read();
      let request = guard
        .session_request
        .clone()
        .ok_or_else(|| AppError::Internal("session request missing after build step".to_string()))?;
      (guard.app_state.gateway.clone(), request)
    };

    match gateway.create_session(request).await {
      Ok(session) => {
        info!(gateway_session_id = %session.id, "payment session created");
        ctx.write().gateway_session = Some(session);
        Ok::<_, AppError>(FlowControl::Continue)
      }
      Err(e) => {
        warn!(error = %e, "gateway refused the payment session; recovering to the cart page");
        let mut guard = ctx.write();
        guard.redirect_to = Some("/cart".to_string());
        guard.notice = Some("payment-unavailable");
        Ok(FlowControl::Halt)
      }
    }
  });

  // Persist the pending order keyed by the gateway's session id, then
  // send the customer to the hosted page.
  flow.on("record_pending_order", |ctx: SharedContext<CheckoutData>| async move {
    let (orders, session, total) = {
      let guard = ctx.read();
      let session = guard
        .gateway_session
        .clone()
        .ok_or_else(|| AppError::Internal("gateway session missing after create step".to_string()))?;
      let total = guard
        .totals
        .as_ref()
        .map(|t| t.total)
        .ok_or_else(|| AppError::Internal("cart totals missing after load step".to_string()))?;
      (guard.app_state.orders(), session, total)
    };

    let order = orders
      .insert_pending(&session.id, total * 100)
      .await
      .map_err(AppError::Sqlx)?;
    info!(order_id = order.id, gateway_session_id = %session.id, "pending order recorded");

    let mut guard = ctx.write();
    guard.order_id = Some(order.id);
    guard.redirect_to = Some(session.url);
    Ok::<_, AppError>(FlowControl::Continue)
  });

  flows.register(flow);
  info!("Checkout flow registered.");
}
