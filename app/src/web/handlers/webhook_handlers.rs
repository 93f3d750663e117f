// app/src/web/handlers/webhook_handlers.rs

//! The payment-processor webhook endpoint.
//!
//! Deliveries are acknowledged with 200 even when they change nothing
//! (unknown event types, unknown session ids): a non-2xx answer would
//! make the processor retry a delivery this service will never handle.

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::instrument;

use stepflow::SharedContext;

use crate::errors::AppError;
use crate::pipelines::contexts::PaymentWebhookData;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PaymentWebhookPayload {
  pub event_type: String,
  pub session_id: String,
}

#[instrument(name = "handler::payment_webhook", skip_all, fields(event_type = %payload.event_type))]
pub async fn payment_webhook_handler(
  app_state: web::Data<AppState>,
  payload: web::Json<PaymentWebhookPayload>,
) -> Result<HttpResponse, AppError> {
  let payload = payload.into_inner();
  let ctx = SharedContext::new(PaymentWebhookData::new(
    app_state.get_ref().clone(),
    payload.event_type,
    payload.session_id,
  ));
  app_state.flows.run(ctx.clone()).await?;

  let processed = ctx.read().order_updated;
  Ok(HttpResponse::Ok().json(json!({ "received": true, "processed": processed })))
}
