// app/src/state.rs

use crate::config::AppConfig;
use crate::errors::AppError;
use crate::services::payment::PaymentGateway;
use crate::store::{CartRepository, CatalogStore, OrderStore};
use sqlx::SqlitePool;
use std::sync::Arc;
use stepflow::FlowRegistry;

#[derive(Clone)]
pub struct AppState {
  pub db_pool: SqlitePool,
  pub flows: Arc<FlowRegistry<AppError>>,
  pub config: Arc<AppConfig>,
  pub carts: Arc<CartRepository>,
  pub gateway: Arc<dyn PaymentGateway>,
}

impl AppState {
  pub fn catalog(&self) -> CatalogStore {
    CatalogStore::new(self.db_pool.clone())
  }

  pub fn orders(&self) -> OrderStore {
    OrderStore::new(self.db_pool.clone())
  }
}
