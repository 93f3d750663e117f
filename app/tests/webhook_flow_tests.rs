// tests/webhook_flow_tests.rs

mod common;

use common::mock_gateway_state;
use stepflow::{FlowOutcome, SharedContext};
use storefront::models::OrderStatus;
use storefront::pipelines::contexts::PaymentWebhookData;

#[tokio::test]
async fn completed_event_flips_exactly_the_matching_order_to_paid() {
  let state = mock_gateway_state().await;
  let orders = state.orders();
  orders.insert_pending("sess_alpha", 130_000).await.unwrap();
  orders.insert_pending("sess_beta", 25_000).await.unwrap();

  let ctx = SharedContext::new(PaymentWebhookData::new(
    state.clone(),
    "checkout.session.completed".to_string(),
    "sess_alpha".to_string(),
  ));
  state.flows.run(ctx.clone()).await.expect("webhook flow");

  assert!(ctx.read().order_updated);
  let alpha = orders.find_by_gateway_session("sess_alpha").await.unwrap().unwrap();
  let beta = orders.find_by_gateway_session("sess_beta").await.unwrap().unwrap();
  assert_eq!(alpha.status, OrderStatus::Paid);
  assert_eq!(beta.status, OrderStatus::Pending);
}

#[tokio::test]
async fn expired_and_failed_events_mark_the_order_failed() {
  let state = mock_gateway_state().await;
  let orders = state.orders();
  orders.insert_pending("sess_alpha", 1_000).await.unwrap();

  let ctx = SharedContext::new(PaymentWebhookData::new(
    state.clone(),
    "checkout.session.expired".to_string(),
    "sess_alpha".to_string(),
  ));
  state.flows.run(ctx).await.expect("webhook flow");

  let alpha = orders.find_by_gateway_session("sess_alpha").await.unwrap().unwrap();
  assert_eq!(alpha.status, OrderStatus::Failed);
}

#[tokio::test]
async fn unknown_session_id_is_acknowledged_without_error() {
  let state = mock_gateway_state().await;

  let ctx = SharedContext::new(PaymentWebhookData::new(
    state.clone(),
    "checkout.session.completed".to_string(),
    "sess_nobody_knows".to_string(),
  ));
  let outcome = state.flows.run(ctx.clone()).await.expect("webhook flow");

  assert_eq!(outcome, FlowOutcome::Completed);
  assert!(!ctx.read().order_updated);
}

#[tokio::test]
async fn unknown_event_type_changes_nothing() {
  let state = mock_gateway_state().await;
  let orders = state.orders();
  orders.insert_pending("sess_alpha", 1_000).await.unwrap();

  let ctx = SharedContext::new(PaymentWebhookData::new(
    state.clone(),
    "invoice.created".to_string(),
    "sess_alpha".to_string(),
  ));
  let outcome = state.flows.run(ctx.clone()).await.expect("webhook flow");

  assert_eq!(outcome, FlowOutcome::Completed);
  assert!(!ctx.read().order_updated);
  let alpha = orders.find_by_gateway_session("sess_alpha").await.unwrap().unwrap();
  assert_eq!(alpha.status, OrderStatus::Pending);
}
