// app/src/main.rs

use actix_web::{web, App, HttpServer};
use sqlx::sqlite::SqlitePoolOptions;
use std::sync::Arc;
use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan;

use stepflow::FlowRegistry;
use storefront::config::AppConfig;
use storefront::pipelines;
use storefront::services::payment::MockGateway;
use storefront::state::AppState;
use storefront::store::{self, CartRepository};
use storefront::web::configure_app_routes;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
  tracing_subscriber::fmt()
    .with_max_level(Level::INFO)
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env()) // Allow RUST_LOG override
    .with_span_events(FmtSpan::CLOSE)
    .init();

  tracing::info!("Starting storefront server...");

  let config = match AppConfig::from_env() {
    Ok(cfg) => Arc::new(cfg),
    Err(e) => {
      tracing::error!(error = %e, "Failed to load application configuration.");
      std::process::exit(1);
    }
  };

  let db_pool = match SqlitePoolOptions::new().connect(&config.database_url).await {
    Ok(pool) => {
      tracing::info!("Connected to the database.");
      pool
    }
    Err(e) => {
      tracing::error!(error = %e, "Failed to connect to the database.");
      std::process::exit(1);
    }
  };

  if let Err(e) = store::ensure_schema(&db_pool).await {
    tracing::error!(error = %e, "Failed to bootstrap the database schema.");
    std::process::exit(1);
  }

  let flows = Arc::new(FlowRegistry::new());
  pipelines::register_all_flows(&flows);

  let app_state = AppState {
    db_pool,
    flows,
    config: config.clone(),
    carts: Arc::new(CartRepository::new()),
    gateway: Arc::new(MockGateway::new(config.gateway_hosted_base.clone())),
  };

  let server_address = format!("{}:{}", config.server_host, config.server_port);
  tracing::info!("Binding server to {}...", server_address);

  HttpServer::new(move || {
    App::new()
      .app_data(web::Data::new(app_state.clone()))
      .wrap(tracing_actix_web::TracingLogger::default())
      .configure(configure_app_routes)
  })
  .bind(&server_address)?
  .run()
  .await
}
