// app/src/store/mod.rs

//! Persistence layer: the relational catalog/order stores and the
//! in-memory, session-keyed cart repository.

pub mod cart;
pub mod catalog;
pub mod orders;

pub use cart::CartRepository;
pub use catalog::CatalogStore;
pub use orders::OrderStore;

use sqlx::SqlitePool;

/// Applies the embedded schema. Every statement is idempotent, so calling
/// this on an already-bootstrapped database is a no-op.
pub async fn ensure_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
  sqlx::raw_sql(include_str!("../../db/schema.sql")).execute(pool).await?;
  Ok(())
}
