// app/src/services/payment.rs

//! The hosted payment processor, seen through the narrow interface the
//! checkout flow needs: create a session, retrieve a session.

use async_trait::async_trait;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::errors::{AppError, Result as AppResult};

/// Literal the gateway replaces with the issued session id when building
/// the success callback.
pub const SESSION_ID_PLACEHOLDER: &str = "{SESSION_ID}";

/// A priced, quantified product reference sent to the processor.
#[derive(Debug, Clone, Serialize)]
pub struct LineItem {
  pub currency: String,
  /// Minor currency units (whole-unit price × 100).
  pub unit_amount: i64,
  pub name: String,
  pub description: String,
  pub quantity: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckoutSessionRequest {
  /// Always "payment": one-time charges only, no subscriptions.
  pub mode: String,
  pub line_items: Vec<LineItem>,
  /// Carries [`SESSION_ID_PLACEHOLDER`] for the gateway to substitute.
  pub success_url: String,
  pub cancel_url: String,
}

impl CheckoutSessionRequest {
  pub fn one_time(line_items: Vec<LineItem>, success_url: String, cancel_url: String) -> Self {
    Self {
      mode: "payment".to_string(),
      line_items,
      success_url,
      cancel_url,
    }
  }
}

/// A processor-issued, short-lived handle for one attempted payment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewaySession {
  pub id: String,
  /// The hosted page the customer is redirected to.
  pub url: String,
}

/// The processor interface. A single request/response call each way; no
/// timeout or retry policy lives at this seam.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
  async fn create_session(&self, request: CheckoutSessionRequest) -> AppResult<GatewaySession>;

  async fn retrieve_session(&self, session_id: &str) -> AppResult<GatewaySession>;
}

/// In-process stand-in for the hosted processor: validates the request,
/// issues `sess_*` handles, and remembers them for retrieval.
pub struct MockGateway {
  hosted_base: String,
  sessions: Mutex<HashMap<String, GatewaySession>>,
}

impl MockGateway {
  pub fn new(hosted_base: impl Into<String>) -> Self {
    Self {
      hosted_base: hosted_base.into(),
      sessions: Mutex::new(HashMap::new()),
    }
  }
}

#[async_trait]
impl PaymentGateway for MockGateway {
  #[instrument(name = "gateway::create_session", skip_all, fields(line_items = request.line_items.len()))]
  async fn create_session(&self, request: CheckoutSessionRequest) -> AppResult<GatewaySession> {
    if request.line_items.is_empty() {
      return Err(AppError::Payment("A payment session needs at least one line item.".to_string()));
    }
    for item in &request.line_items {
      if item.unit_amount <= 0 || item.quantity <= 0 {
        return Err(AppError::Payment(format!(
          "Rejected line item '{}': non-positive amount or quantity.",
          item.name
        )));
      }
    }

    tokio::time::sleep(std::time::Duration::from_millis(25)).await; // Simulate network latency

    let id = format!("sess_{}", Uuid::new_v4().simple());
    let session = GatewaySession {
      id: id.clone(),
      url: format!("{}/pay/{}", self.hosted_base, id),
    };

    info!(session_id = %session.id, "payment session created");
    self.sessions.lock().insert(id, session.clone());
    Ok(session)
  }

  #[instrument(name = "gateway::retrieve_session", skip(self))]
  async fn retrieve_session(&self, session_id: &str) -> AppResult<GatewaySession> {
    tokio::time::sleep(std::time::Duration::from_millis(10)).await;

    self
      .sessions
      .lock()
      .get(session_id)
      .cloned()
      .ok_or_else(|| AppError::Payment(format!("Unknown payment session: {session_id}")))
  }
}
