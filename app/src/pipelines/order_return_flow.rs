// app/src/pipelines/order_return_flow.rs

//! The return leg of a checkout: the customer lands back on the success
//! callback. Session retrieval is display-only and failure-tolerant; the
//! cart clear is unconditional. Payment completion is not verified on
//! this leg; the webhook owns the durable order status.

use crate::errors::AppError;
use crate::pipelines::contexts::OrderReturnData;
use std::sync::Arc;
use stepflow::{Flow, FlowControl, FlowRegistry, SharedContext, SkipCondition};
use tracing::{info, warn};

pub fn register_order_return_flow(flows: &Arc<FlowRegistry<AppError>>) {
  let skip_without_id: Option<SkipCondition<OrderReturnData>> =
    Some(Arc::new(|ctx: SharedContext<OrderReturnData>| {
      ctx.read().gateway_session_id.is_none()
    }));

  let mut flow = Flow::<OrderReturnData, AppError>::new(&[
    ("retrieve_gateway_session", true, skip_without_id),
    ("clear_cart", false, None),
  ]);

  // Best effort only. A session the gateway cannot resolve simply means
  // there are no details to show.
  flow.on("retrieve_gateway_session", |ctx: SharedContext<OrderReturnData>| async move {
    let (gateway, session_id) = {
      let guard = ctx.read();
      (guard.app_state.gateway.clone(), guard.gateway_session_id.clone())
    };
    let Some(session_id) = session_id else {
      return Ok::<_, AppError>(FlowControl::Continue);
    };

    match gateway.retrieve_session(&session_id).await {
      Ok(session) => {
        info!(gateway_session_id = %session.id, "gateway session retrieved for display");
        ctx.write().gateway_session = Some(session);
      }
      Err(e) => {
        warn!(gateway_session_id = %session_id, error = %e, "gateway session retrieval failed; showing no details");
      }
    }
    Ok(FlowControl::Continue)
  });

  // Unconditional, whatever came of the retrieval above.
  flow.on("clear_cart", |ctx: SharedContext<OrderReturnData>| async move {
    let (carts, token) = {
      let guard = ctx.read();
      (guard.app_state.carts.clone(), guard.session_token.clone())
    };
    carts.clear(&token);
    info!("cart cleared after return from payment");
    Ok::<_, AppError>(FlowControl::Continue)
  });

  flows.register(flow);
  info!("Order-return flow registered.");
}
