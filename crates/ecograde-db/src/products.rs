//! Database operations for the `products` table.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::types::Json;
use sqlx::PgPool;

use ecograde_core::{Product, SustainabilityAttributes};

use crate::DbError;

// ---------------------------------------------------------------------------
// Row types
// ---------------------------------------------------------------------------

/// A row from the `products` table.
///
/// `sustainability` is the optional attribute block stored as `JSONB`;
/// `sustainability_score` is the denormalized score, recomputed by the write
/// path whenever the block changes.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProductRow {
    pub id: i64,
    pub name: String,
    pub brand: String,
    pub category: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub sustainability: Option<Json<SustainabilityAttributes>>,
    pub sustainability_score: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProductRow {
    /// Project the row into the comparison engine's domain type.
    #[must_use]
    pub fn to_domain(&self) -> Product {
        Product {
            id: self.id,
            name: self.name.clone(),
            brand: self.brand.clone(),
            category: self.category.clone(),
            description: self.description.clone(),
            sustainability: self.sustainability.as_ref().map(|j| j.0.clone()),
        }
    }
}

/// Input for [`insert_product`] / [`update_product`].
///
/// `sustainability_score` must already be derived from `sustainability` by
/// the caller (the scorer lives in `ecograde-core`, not here).
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub brand: String,
    pub category: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub sustainability: Option<SustainabilityAttributes>,
    pub sustainability_score: i32,
}

// ---------------------------------------------------------------------------
// operations
// ---------------------------------------------------------------------------

/// Insert a product and return the stored row.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the insert fails.
pub async fn insert_product(pool: &PgPool, product: &NewProduct) -> Result<ProductRow, DbError> {
    let row = sqlx::query_as::<_, ProductRow>(
        "INSERT INTO products \
             (name, brand, category, description, price, sustainability, sustainability_score) \
         VALUES ($1, $2, $3, $4, $5, $6, $7) \
         RETURNING id, name, brand, category, description, price, \
                   sustainability, sustainability_score, created_at, updated_at",
    )
    .bind(&product.name)
    .bind(&product.brand)
    .bind(&product.category)
    .bind(&product.description)
    .bind(product.price)
    .bind(product.sustainability.as_ref().map(Json))
    .bind(product.sustainability_score)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

/// Replace a product's fields in place and return the updated row.
///
/// Returns `None` when no product with that id exists.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the update fails.
pub async fn update_product(
    pool: &PgPool,
    id: i64,
    product: &NewProduct,
) -> Result<Option<ProductRow>, DbError> {
    let row = sqlx::query_as::<_, ProductRow>(
        "UPDATE products SET \
             name = $2, \
             brand = $3, \
             category = $4, \
             description = $5, \
             price = $6, \
             sustainability = $7, \
             sustainability_score = $8, \
             updated_at = NOW() \
         WHERE id = $1 \
         RETURNING id, name, brand, category, description, price, \
                   sustainability, sustainability_score, created_at, updated_at",
    )
    .bind(id)
    .bind(&product.name)
    .bind(&product.brand)
    .bind(&product.category)
    .bind(&product.description)
    .bind(product.price)
    .bind(product.sustainability.as_ref().map(Json))
    .bind(product.sustainability_score)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// Fetch a product by id.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn get_product(pool: &PgPool, id: i64) -> Result<Option<ProductRow>, DbError> {
    let row = sqlx::query_as::<_, ProductRow>(
        "SELECT id, name, brand, category, description, price, \
                sustainability, sustainability_score, created_at, updated_at \
         FROM products WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// List products, newest first, bounded by `limit`.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_products(pool: &PgPool, limit: i64) -> Result<Vec<ProductRow>, DbError> {
    let rows = sqlx::query_as::<_, ProductRow>(
        "SELECT id, name, brand, category, description, price, \
                sustainability, sustainability_score, created_at, updated_at \
         FROM products \
         ORDER BY created_at DESC, id DESC \
         LIMIT $1",
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Find the first product whose name contains `name`, case-insensitively.
///
/// Matches are ordered by id so repeated lookups resolve the same product.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn find_product_by_name_ci(
    pool: &PgPool,
    name: &str,
) -> Result<Option<ProductRow>, DbError> {
    let row = sqlx::query_as::<_, ProductRow>(
        "SELECT id, name, brand, category, description, price, \
                sustainability, sustainability_score, created_at, updated_at \
         FROM products \
         WHERE name ILIKE '%' || $1 || '%' \
         ORDER BY id ASC \
         LIMIT 1",
    )
    .bind(name)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// Delete a product by id. Returns `true` if a row was removed.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the delete fails.
pub async fn delete_product(pool: &PgPool, id: i64) -> Result<bool, DbError> {
    let result = sqlx::query("DELETE FROM products WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
