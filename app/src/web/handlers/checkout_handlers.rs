// app/src/web/handlers/checkout_handlers.rs

//! The checkout surface: preview, the hand-off to the payment gateway's
//! hosted page, and both legs of the redirect back (cancel and success).

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::instrument;

use stepflow::SharedContext;

use crate::cart::{self, CartMap};
use crate::errors::AppError;
use crate::pipelines::contexts::{CheckoutData, OrderReturnData};
use crate::state::AppState;
use crate::web::handlers::see_other;
use crate::web::session::{session_cookie, CartSession};

/// Preview of what checkout would charge. An empty cart has nothing to
/// preview and bounces home.
#[instrument(name = "handler::checkout_preview", skip_all)]
pub async fn checkout_preview_handler(
  app_state: web::Data<AppState>,
  session: CartSession,
) -> Result<HttpResponse, AppError> {
  let cart = match session.existing() {
    Some(token) => app_state.carts.load(token),
    None => CartMap::new(),
  };
  let totals = cart::totals(&cart, &app_state.catalog()).await?;
  if totals.is_empty() {
    return Ok(see_other("/", Some("cart-empty"), None));
  }
  Ok(HttpResponse::Ok().json(totals))
}

/// Runs the checkout flow. Wherever the flow lands (the gateway's hosted
/// page, or a recovery target for an empty cart or a gateway refusal),
/// the answer is a 303.
#[instrument(name = "handler::start_checkout", skip_all)]
pub async fn start_checkout_handler(
  app_state: web::Data<AppState>,
  session: CartSession,
) -> Result<HttpResponse, AppError> {
  let (token, minted) = session.token_or_mint();
  let ctx = SharedContext::new(CheckoutData::new(app_state.get_ref().clone(), token.clone()));
  app_state.flows.run(ctx.clone()).await?;

  let guard = ctx.read();
  let location = guard
    .redirect_to
    .clone()
    .ok_or_else(|| AppError::Internal("checkout flow finished without a destination".to_string()))?;
  Ok(see_other(&location, guard.notice, minted.then(|| session_cookie(&token))))
}

/// Cancel callback from the gateway. The cart was never cleared on the
/// way out, so it is still intact for a retry.
#[instrument(name = "handler::payment_redirect", skip_all)]
pub async fn payment_redirect_handler() -> HttpResponse {
  HttpResponse::Ok().json(json!({
    "status": "payment-not-completed",
    "message": "The payment was not completed. Your cart is unchanged.",
  }))
}

#[derive(Debug, Deserialize)]
pub struct OrderSuccessQuery {
  pub session_id: Option<String>,
}

/// Success callback from the gateway. Session details are best-effort
/// display data; the cart clear happens regardless.
#[instrument(name = "handler::order_success", skip_all, fields(session_id = query.session_id.as_deref().unwrap_or("")))]
pub async fn order_success_handler(
  app_state: web::Data<AppState>,
  query: web::Query<OrderSuccessQuery>,
  session: CartSession,
) -> Result<HttpResponse, AppError> {
  // A missing cookie means there is no cart to clear; a throwaway token
  // keeps the flow uniform.
  let (token, _) = session.token_or_mint();
  let ctx = SharedContext::new(OrderReturnData::new(
    app_state.get_ref().clone(),
    token,
    query.into_inner().session_id,
  ));
  app_state.flows.run(ctx.clone()).await?;

  let gateway_session = ctx.read().gateway_session.clone();
  Ok(HttpResponse::Ok().json(json!({
    "status": "order-received",
    "gateway_session": gateway_session,
  })))
}
