// app/src/pipelines/webhook_flow.rs

//! Payment-processor webhook processing: the one place an order record
//! moves past `pending`.

use crate::errors::AppError;
use crate::models::OrderStatus;
use crate::pipelines::contexts::PaymentWebhookData;
use std::sync::Arc;
use stepflow::{Flow, FlowControl, FlowRegistry, SharedContext, SkipCondition};
use tracing::{info, warn};

pub fn register_payment_webhook_flow(flows: &Arc<FlowRegistry<AppError>>) {
  let skip_unclassified: Option<SkipCondition<PaymentWebhookData>> =
    Some(Arc::new(|ctx: SharedContext<PaymentWebhookData>| {
      ctx.read().target_status.is_none()
    }));

  let mut flow = Flow::<PaymentWebhookData, AppError>::new(&[
    ("classify_event", false, None),
    ("apply_status_change", false, skip_unclassified),
  ]);

  // Unknown event types are acknowledged, not failed: failing would make
  // the processor retry a delivery we will never handle.
  flow.on("classify_event", |ctx: SharedContext<PaymentWebhookData>| async move {
    let event_type = { ctx.read().event_type.clone() };
    let target_status = match event_type.as_str() {
      "checkout.session.completed" => Some(OrderStatus::Paid),
      "checkout.session.expired" | "checkout.session.failed" => Some(OrderStatus::Failed),
      other => {
        info!(event_type = other, "ignoring unhandled webhook event type");
        None
      }
    };
    ctx.write().target_status = target_status;
    Ok::<_, AppError>(FlowControl::Continue)
  });

  flow.on("apply_status_change", |ctx: SharedContext<PaymentWebhookData>| async move {
    let (orders, session_id, status) = {
      let guard = ctx.read();
      let status = guard
        .target_status
        .ok_or_else(|| AppError::Internal("webhook status missing after classify step".to_string()))?;
      (guard.app_state.orders(), guard.gateway_session_id.clone(), status)
    };

    let updated = orders
      .set_status_by_gateway_session(&session_id, status)
      .await
      .map_err(AppError::Sqlx)?;
    if updated == 0 {
      warn!(gateway_session_id = %session_id, "webhook referenced an unknown payment session");
    } else {
      info!(gateway_session_id = %session_id, ?status, "order status updated from webhook");
    }

    ctx.write().order_updated = updated > 0;
    Ok::<_, AppError>(FlowControl::Continue)
  });

  flows.register(flow);
  info!("Payment-webhook flow registered.");
}
