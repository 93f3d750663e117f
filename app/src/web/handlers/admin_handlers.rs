// app/src/web/handlers/admin_handlers.rs

//! Admin product management. These endpoints carry no authentication of
//! their own; access control is an upstream boundary's concern (a reverse
//! proxy or gateway in front of this service).

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument};

use crate::errors::AppError;
use crate::state::AppState;
use crate::store::CatalogStore;

#[instrument(name = "handler::admin_dashboard", skip_all)]
pub async fn dashboard_handler(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
  let products = app_state.catalog().list_all().await?;
  let orders = app_state.orders().list_recent().await?;
  Ok(HttpResponse::Ok().json(json!({ "products": products, "orders": orders })))
}

#[derive(Debug, Deserialize)]
pub struct CreateProductPayload {
  pub title: String,
  /// Defaults to a slugified title.
  pub slug: Option<String>,
  /// Whole currency units.
  pub price: i64,
  pub description: Option<String>,
  pub image: Option<String>,
  /// Category slug; unknown categories are created on the fly.
  pub category: Option<String>,
}

#[instrument(name = "handler::admin_create_product", skip_all, fields(title = %payload.title))]
pub async fn create_product_handler(
  app_state: web::Data<AppState>,
  payload: web::Json<CreateProductPayload>,
) -> Result<HttpResponse, AppError> {
  let payload = payload.into_inner();
  if payload.title.trim().is_empty() {
    return Err(AppError::Validation("A product needs a title.".to_string()));
  }
  if payload.price <= 0 {
    return Err(AppError::Validation("A product needs a positive price.".to_string()));
  }

  let catalog = app_state.catalog();
  let slug = payload
    .slug
    .filter(|s| !s.trim().is_empty())
    .unwrap_or_else(|| slugify(&payload.title));

  let category_id = match payload.category.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
    Some(raw) => Some(resolve_or_create_category(&catalog, raw).await?.id),
    None => None,
  };

  let product = catalog
    .insert_product(
      payload.title.trim(),
      &slug,
      payload.price,
      payload.description.as_deref(),
      payload.image.as_deref(),
      category_id,
    )
    .await
    .map_err(|e| {
      if let sqlx::Error::Database(db) = &e {
        if db.is_unique_violation() {
          return AppError::Validation(format!("A product with slug '{slug}' already exists."));
        }
      }
      AppError::Sqlx(e)
    })?;

  info!(product_id = product.id, slug = %product.slug, "product created");
  Ok(HttpResponse::Created().json(product))
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateProductPayload {
  pub title: Option<String>,
  pub slug: Option<String>,
  pub price: Option<i64>,
  pub description: Option<String>,
  pub image: Option<String>,
  pub category_id: Option<i64>,
  pub is_available: Option<bool>,
}

/// Partial update: absent fields keep their stored values.
#[instrument(name = "handler::admin_update_product", skip_all, fields(product_id = %product_id))]
pub async fn update_product_handler(
  app_state: web::Data<AppState>,
  product_id: web::Path<i64>,
  payload: web::Json<UpdateProductPayload>,
) -> Result<HttpResponse, AppError> {
  let product_id = product_id.into_inner();
  let catalog = app_state.catalog();
  let mut product = catalog
    .find_by_id(product_id)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("No product with id {product_id}.")))?;

  let payload = payload.into_inner();
  if let Some(title) = payload.title {
    product.title = title;
  }
  if let Some(slug) = payload.slug {
    product.slug = slug;
  }
  if let Some(price) = payload.price {
    if price <= 0 {
      return Err(AppError::Validation("A product needs a positive price.".to_string()));
    }
    product.price = price;
  }
  if let Some(description) = payload.description {
    product.description = Some(description);
  }
  if let Some(image) = payload.image {
    product.image = Some(image);
  }
  if let Some(category_id) = payload.category_id {
    product.category_id = Some(category_id);
  }
  if let Some(is_available) = payload.is_available {
    product.is_available = is_available;
  }

  catalog.update_product(&product).await?;
  info!(product_id, "product updated");
  Ok(HttpResponse::Ok().json(product))
}

async fn resolve_or_create_category(catalog: &CatalogStore, raw: &str) -> Result<crate::models::Category, AppError> {
  let slug = slugify(raw);
  if let Some(existing) = catalog.category_by_slug(&slug).await? {
    return Ok(existing);
  }
  let category = catalog.insert_category(&capitalize(raw), &slug).await?;
  info!(category_id = category.id, slug = %category.slug, "category created on the fly");
  Ok(category)
}

/// Lowercases and collapses every non-alphanumeric run to a single dash.
fn slugify(text: &str) -> String {
  let mut slug = String::with_capacity(text.len());
  let mut pending_dash = false;
  for ch in text.chars() {
    if ch.is_ascii_alphanumeric() {
      if pending_dash && !slug.is_empty() {
        slug.push('-');
      }
      slug.push(ch.to_ascii_lowercase());
      pending_dash = false;
    } else {
      pending_dash = true;
    }
  }
  slug
}

fn capitalize(text: &str) -> String {
  let mut chars = text.chars();
  match chars.next() {
    Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
    None => String::new(),
  }
}
