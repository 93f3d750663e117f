// app/src/web/handlers/catalog_handlers.rs

//! Read-only catalog browsing: home, search, category and product pages.

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::instrument;

use crate::errors::AppError;
use crate::state::AppState;

pub async fn health_handler() -> HttpResponse {
  HttpResponse::Ok().json(json!({ "status": "ok" }))
}

#[instrument(name = "handler::home", skip_all)]
pub async fn home_handler(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
  let catalog = app_state.catalog();
  let products = catalog.list_all().await?;
  let categories = catalog.list_categories().await?;
  Ok(HttpResponse::Ok().json(json!({ "products": products, "categories": categories })))
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
  pub q: Option<String>,
}

/// An absent or blank query is an empty result set, not an error.
#[instrument(name = "handler::search", skip_all, fields(query = query.q.as_deref().unwrap_or("")))]
pub async fn search_handler(
  app_state: web::Data<AppState>,
  query: web::Query<SearchQuery>,
) -> Result<HttpResponse, AppError> {
  let text = query.q.as_deref().unwrap_or("").trim().to_string();
  let results = if text.is_empty() {
    Vec::new()
  } else {
    app_state.catalog().search_by_title(&text).await?
  };
  Ok(HttpResponse::Ok().json(json!({ "query": text, "results": results })))
}

#[instrument(name = "handler::category", skip(app_state))]
pub async fn category_handler(
  app_state: web::Data<AppState>,
  slug: web::Path<String>,
) -> Result<HttpResponse, AppError> {
  let catalog = app_state.catalog();
  let category = catalog
    .category_by_slug(&slug)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("No category with slug '{slug}'.")))?;
  let products = catalog.filter_by_category(category.id).await?;
  Ok(HttpResponse::Ok().json(json!({ "category": category, "products": products })))
}

#[instrument(name = "handler::product", skip(app_state))]
pub async fn product_handler(
  app_state: web::Data<AppState>,
  slug: web::Path<String>,
) -> Result<HttpResponse, AppError> {
  let product = app_state
    .catalog()
    .find_by_slug(&slug)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("No product with slug '{slug}'.")))?;
  Ok(HttpResponse::Ok().json(product))
}
