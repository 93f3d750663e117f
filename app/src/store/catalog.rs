// app/src/store/catalog.rs

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::instrument;

use crate::models::{Category, Product};

const PRODUCT_COLUMNS: &str = "id, title, slug, description, price, image, category_id, is_available, created_at";

/// Read (and, for the admin surface, write) access to the product
/// catalog. The cart and checkout flows only ever call [`find_by_id`].
///
/// [`find_by_id`]: CatalogStore::find_by_id
#[derive(Clone)]
pub struct CatalogStore {
  pool: SqlitePool,
}

impl CatalogStore {
  pub fn new(pool: SqlitePool) -> Self {
    Self { pool }
  }

  #[instrument(name = "catalog::find_by_id", skip(self))]
  pub async fn find_by_id(&self, id: i64) -> Result<Option<Product>, sqlx::Error> {
    sqlx::query_as(&format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ?"))
      .bind(id)
      .fetch_optional(&self.pool)
      .await
  }

  #[instrument(name = "catalog::find_by_slug", skip(self))]
  pub async fn find_by_slug(&self, slug: &str) -> Result<Option<Product>, sqlx::Error> {
    sqlx::query_as(&format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE slug = ?"))
      .bind(slug)
      .fetch_optional(&self.pool)
      .await
  }

  #[instrument(name = "catalog::list_all", skip(self))]
  pub async fn list_all(&self) -> Result<Vec<Product>, sqlx::Error> {
    sqlx::query_as(&format!("SELECT {PRODUCT_COLUMNS} FROM products ORDER BY id ASC"))
      .fetch_all(&self.pool)
      .await
  }

  #[instrument(name = "catalog::filter_by_category", skip(self))]
  pub async fn filter_by_category(&self, category_id: i64) -> Result<Vec<Product>, sqlx::Error> {
    sqlx::query_as(&format!(
      "SELECT {PRODUCT_COLUMNS} FROM products WHERE category_id = ? ORDER BY id ASC"
    ))
    .bind(category_id)
    .fetch_all(&self.pool)
    .await
  }

  /// Case-insensitive title containment search.
  #[instrument(name = "catalog::search_by_title", skip(self))]
  pub async fn search_by_title(&self, text: &str) -> Result<Vec<Product>, sqlx::Error> {
    sqlx::query_as(&format!(
      "SELECT {PRODUCT_COLUMNS} FROM products WHERE title LIKE '%' || ? || '%' ORDER BY id ASC"
    ))
    .bind(text)
    .fetch_all(&self.pool)
    .await
  }

  #[instrument(name = "catalog::list_categories", skip(self))]
  pub async fn list_categories(&self) -> Result<Vec<Category>, sqlx::Error> {
    sqlx::query_as("SELECT id, name, slug, created_at FROM categories ORDER BY name ASC")
      .fetch_all(&self.pool)
      .await
  }

  #[instrument(name = "catalog::category_by_slug", skip(self))]
  pub async fn category_by_slug(&self, slug: &str) -> Result<Option<Category>, sqlx::Error> {
    sqlx::query_as("SELECT id, name, slug, created_at FROM categories WHERE slug = ?")
      .bind(slug)
      .fetch_optional(&self.pool)
      .await
  }

  #[instrument(name = "catalog::insert_category", skip(self))]
  pub async fn insert_category(&self, name: &str, slug: &str) -> Result<Category, sqlx::Error> {
    sqlx::query_as("INSERT INTO categories (name, slug, created_at) VALUES (?, ?, ?) RETURNING id, name, slug, created_at")
      .bind(name)
      .bind(slug)
      .bind(Utc::now())
      .fetch_one(&self.pool)
      .await
  }

  #[allow(clippy::too_many_arguments)]
  #[instrument(name = "catalog::insert_product", skip_all, fields(slug = %slug))]
  pub async fn insert_product(
    &self,
    title: &str,
    slug: &str,
    price: i64,
    description: Option<&str>,
    image: Option<&str>,
    category_id: Option<i64>,
  ) -> Result<Product, sqlx::Error> {
    sqlx::query_as(&format!(
      "INSERT INTO products (title, slug, description, price, image, category_id, is_available, created_at) \
       VALUES (?, ?, ?, ?, ?, ?, 1, ?) RETURNING {PRODUCT_COLUMNS}"
    ))
    .bind(title)
    .bind(slug)
    .bind(description)
    .bind(price)
    .bind(image)
    .bind(category_id)
    .bind(Utc::now())
    .fetch_one(&self.pool)
    .await
  }

  /// Writes a fully-resolved product row back. Callers merge partial
  /// updates into a fetched [`Product`] first.
  #[instrument(name = "catalog::update_product", skip_all, fields(product_id = product.id))]
  pub async fn update_product(&self, product: &Product) -> Result<(), sqlx::Error> {
    sqlx::query(
      "UPDATE products SET title = ?, slug = ?, description = ?, price = ?, image = ?, category_id = ?, is_available = ? \
       WHERE id = ?",
    )
    .bind(&product.title)
    .bind(&product.slug)
    .bind(&product.description)
    .bind(product.price)
    .bind(&product.image)
    .bind(product.category_id)
    .bind(product.is_available)
    .bind(product.id)
    .execute(&self.pool)
    .await?;
    Ok(())
  }
}
