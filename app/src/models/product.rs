// app/src/models/product.rs

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Product {
  pub id: i64,
  pub title: String,
  pub slug: String,
  pub description: Option<String>,
  /// Whole currency units. Minor-unit scaling (× 100) happens only where
  /// a line item is built for the payment gateway.
  pub price: i64,
  pub image: Option<String>,
  pub category_id: Option<i64>,
  pub is_available: bool,
  pub created_at: DateTime<Utc>,
}
