// app/src/store/orders.rs

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::instrument;

use crate::models::{Order, OrderStatus};

const ORDER_COLUMNS: &str = "id, gateway_session_id, amount_cents, status, created_at";

/// Append-style store of checkout attempts. Rows are created `pending`
/// when a payment session is requested and only ever move forward via
/// [`set_status_by_gateway_session`]; nothing deletes them.
///
/// [`set_status_by_gateway_session`]: OrderStore::set_status_by_gateway_session
#[derive(Clone)]
pub struct OrderStore {
  pool: SqlitePool,
}

impl OrderStore {
  pub fn new(pool: SqlitePool) -> Self {
    Self { pool }
  }

  #[instrument(name = "orders::insert_pending", skip(self))]
  pub async fn insert_pending(&self, gateway_session_id: &str, amount_cents: i64) -> Result<Order, sqlx::Error> {
    sqlx::query_as(&format!(
      "INSERT INTO orders (gateway_session_id, amount_cents, status, created_at) \
       VALUES (?, ?, ?, ?) RETURNING {ORDER_COLUMNS}"
    ))
    .bind(gateway_session_id)
    .bind(amount_cents)
    .bind(OrderStatus::Pending)
    .bind(Utc::now())
    .fetch_one(&self.pool)
    .await
  }

  #[instrument(name = "orders::find_by_gateway_session", skip(self))]
  pub async fn find_by_gateway_session(&self, gateway_session_id: &str) -> Result<Option<Order>, sqlx::Error> {
    sqlx::query_as(&format!(
      "SELECT {ORDER_COLUMNS} FROM orders WHERE gateway_session_id = ?"
    ))
    .bind(gateway_session_id)
    .fetch_optional(&self.pool)
    .await
  }

  /// Returns the number of rows moved; 0 means the session id matched no
  /// order.
  #[instrument(name = "orders::set_status_by_gateway_session", skip(self))]
  pub async fn set_status_by_gateway_session(
    &self,
    gateway_session_id: &str,
    status: OrderStatus,
  ) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("UPDATE orders SET status = ? WHERE gateway_session_id = ?")
      .bind(status)
      .bind(gateway_session_id)
      .execute(&self.pool)
      .await?;
    Ok(result.rows_affected())
  }

  /// Newest-first listing for the admin dashboard.
  #[instrument(name = "orders::list_recent", skip(self))]
  pub async fn list_recent(&self) -> Result<Vec<Order>, sqlx::Error> {
    sqlx::query_as(&format!("SELECT {ORDER_COLUMNS} FROM orders ORDER BY created_at DESC, id DESC"))
      .fetch_all(&self.pool)
      .await
  }
}
