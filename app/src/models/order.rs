// app/src/models/order.rs

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{FromRow, Type as SqlxType};

/// Lifecycle of an order record. Created `Pending` the moment a payment
/// session is requested; only the payment webhook moves it further.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, SqlxType)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
  Pending,
  Paid,
  Failed,
}

/// Persisted evidence that a checkout was initiated, independent of the
/// payment outcome.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Order {
  pub id: i64,
  pub gateway_session_id: Option<String>,
  /// Minor currency units (cart total × 100), matching the unit the
  /// gateway's line items are priced in.
  pub amount_cents: i64,
  pub status: OrderStatus,
  pub created_at: DateTime<Utc>,
}
