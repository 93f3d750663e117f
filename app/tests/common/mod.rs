// tests/common/mod.rs
#![allow(dead_code)] // Shared across multiple test binaries; not all use everything.

use async_trait::async_trait;
use parking_lot::Mutex;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use std::sync::Arc;
use stepflow::FlowRegistry;

use storefront::config::AppConfig;
use storefront::errors::{AppError, Result as AppResult};
use storefront::pipelines;
use storefront::services::payment::{CheckoutSessionRequest, GatewaySession, MockGateway, PaymentGateway};
use storefront::state::AppState;
use storefront::store::{self, CartRepository};

pub const HOSTED_BASE: &str = "https://checkout.mock-gateway.test";

pub fn test_config() -> AppConfig {
  AppConfig {
    server_host: "127.0.0.1".to_string(),
    server_port: 0,
    database_url: "sqlite::memory:".to_string(),
    app_base_url: "http://storefront.test".to_string(),
    currency: "inr".to_string(),
    gateway_hosted_base: HOSTED_BASE.to_string(),
  }
}

/// One-connection in-memory pool: every connection of a `sqlite::memory:`
/// pool sees its own empty database, so the pool must never open a second
/// one.
pub async fn test_pool() -> SqlitePool {
  let pool = SqlitePoolOptions::new()
    .max_connections(1)
    .connect("sqlite::memory:")
    .await
    .expect("in-memory sqlite");
  store::ensure_schema(&pool).await.expect("schema bootstrap");
  pool
}

pub async fn test_state(gateway: Arc<dyn PaymentGateway>) -> AppState {
  let flows = Arc::new(FlowRegistry::new());
  pipelines::register_all_flows(&flows);
  AppState {
    db_pool: test_pool().await,
    flows,
    config: Arc::new(test_config()),
    carts: Arc::new(CartRepository::new()),
    gateway,
  }
}

pub async fn mock_gateway_state() -> AppState {
  test_state(Arc::new(MockGateway::new(HOSTED_BASE))).await
}

/// Seeds a product and returns its id.
pub async fn seed_product(state: &AppState, title: &str, slug: &str, price: i64) -> i64 {
  state
    .catalog()
    .insert_product(title, slug, price, None, None, None)
    .await
    .expect("seed product")
    .id
}

/// Gateway double that refuses every session and counts the attempts.
pub struct RefusingGateway {
  pub create_attempts: Mutex<u32>,
}

impl RefusingGateway {
  pub fn new() -> Arc<Self> {
    Arc::new(Self {
      create_attempts: Mutex::new(0),
    })
  }
}

#[async_trait]
impl PaymentGateway for RefusingGateway {
  async fn create_session(&self, _request: CheckoutSessionRequest) -> AppResult<GatewaySession> {
    *self.create_attempts.lock() += 1;
    Err(AppError::Payment("gateway offline".to_string()))
  }

  async fn retrieve_session(&self, session_id: &str) -> AppResult<GatewaySession> {
    Err(AppError::Payment(format!("Unknown payment session: {session_id}")))
  }
}
