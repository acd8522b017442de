//! Product CRUD handlers. Reads are public; writes require the admin role.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use ecograde_core::{score_product, Product, SustainabilityAttributes};

use crate::auth::AdminUser;
use crate::middleware::RequestId;

use super::{map_db_error, normalize_limit, ApiError, ApiResponse, AppState, ResponseMeta};

// ---------------------------------------------------------------------------
// Request / response bodies
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(super) struct ProductBody {
    pub name: String,
    pub brand: String,
    pub category: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub sustainability: Option<SustainabilityAttributes>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ProductListQuery {
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize)]
pub(super) struct ProductItem {
    pub id: i64,
    pub name: String,
    pub brand: String,
    pub category: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub sustainability: Option<SustainabilityAttributes>,
    pub sustainability_score: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub(super) struct DeletedResponse {
    pub deleted: u64,
}

impl From<ecograde_db::ProductRow> for ProductItem {
    fn from(row: ecograde_db::ProductRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            brand: row.brand,
            category: row.category,
            description: row.description,
            price: row.price,
            sustainability: row.sustainability.map(|j| j.0),
            sustainability_score: row.sustainability_score,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

// ---------------------------------------------------------------------------
// Validation helpers
// ---------------------------------------------------------------------------

fn validate_body(req_id: &str, body: &ProductBody) -> Result<(), ApiError> {
    for (field, value) in [
        ("name", &body.name),
        ("brand", &body.brand),
        ("category", &body.category),
    ] {
        if value.trim().is_empty() || value.len() > 200 {
            return Err(ApiError::new(
                req_id,
                "validation_error",
                format!("'{field}' must be 1-200 characters"),
            ));
        }
    }

    if body.price < Decimal::ZERO {
        return Err(ApiError::new(
            req_id,
            "validation_error",
            "price must not be negative",
        ));
    }

    if let Some(attrs) = &body.sustainability {
        if attrs.carbon_footprint < 0.0 || !attrs.carbon_footprint.is_finite() {
            return Err(ApiError::new(
                req_id,
                "validation_error",
                "carbon_footprint must be a non-negative number",
            ));
        }
        if let Some(rating) = attrs.energy_efficiency_rating {
            if !(1..=5).contains(&rating) {
                return Err(ApiError::new(
                    req_id,
                    "validation_error",
                    format!("energy_efficiency_rating must be 1-5, got {rating}"),
                ));
            }
        }
    }

    Ok(())
}

/// The denormalized score follows the attribute block on every write.
fn to_new_product(body: ProductBody) -> ecograde_db::NewProduct {
    let score = score_product(&Product {
        id: 0,
        name: body.name.clone(),
        brand: body.brand.clone(),
        category: body.category.clone(),
        description: None,
        sustainability: body.sustainability.clone(),
    })
    .score;

    ecograde_db::NewProduct {
        name: body.name.trim().to_owned(),
        brand: body.brand.trim().to_owned(),
        category: body.category.trim().to_owned(),
        description: body.description,
        price: body.price,
        sustainability: body.sustainability,
        sustainability_score: score,
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/products — newest first, bounded limit.
pub(super) async fn list_products(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<ProductListQuery>,
) -> Result<Json<ApiResponse<Vec<ProductItem>>>, ApiError> {
    let rows = ecograde_db::list_products(&state.pool, normalize_limit(query.limit))
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: rows.into_iter().map(ProductItem::from).collect(),
        meta: ResponseMeta::new(req_id.0),
    }))
}

/// GET /api/v1/products/:id
pub(super) async fn get_product(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<ProductItem>>, ApiError> {
    let row = ecograde_db::get_product(&state.pool, id)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?
        .ok_or_else(|| ApiError::new(req_id.0.clone(), "not_found", "product not found"))?;

    Ok(Json(ApiResponse {
        data: ProductItem::from(row),
        meta: ResponseMeta::new(req_id.0),
    }))
}

/// POST /api/v1/products — admin only.
pub(super) async fn create_product(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    AdminUser(admin): AdminUser,
    Json(body): Json<ProductBody>,
) -> Result<(StatusCode, Json<ApiResponse<ProductItem>>), ApiError> {
    validate_body(&req_id.0, &body)?;

    let row = ecograde_db::insert_product(&state.pool, &to_new_product(body))
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    tracing::info!(product_id = row.id, admin = %admin.email, "product created");

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse {
            data: ProductItem::from(row),
            meta: ResponseMeta::new(req_id.0),
        }),
    ))
}

/// PUT /api/v1/products/:id — admin only, full replacement.
pub(super) async fn update_product(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    AdminUser(admin): AdminUser,
    Path(id): Path<i64>,
    Json(body): Json<ProductBody>,
) -> Result<Json<ApiResponse<ProductItem>>, ApiError> {
    validate_body(&req_id.0, &body)?;

    let row = ecograde_db::update_product(&state.pool, id, &to_new_product(body))
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?
        .ok_or_else(|| ApiError::new(req_id.0.clone(), "not_found", "product not found"))?;

    tracing::info!(product_id = id, admin = %admin.email, "product updated");

    Ok(Json(ApiResponse {
        data: ProductItem::from(row),
        meta: ResponseMeta::new(req_id.0),
    }))
}

/// DELETE /api/v1/products/:id — admin only.
pub(super) async fn delete_product(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    AdminUser(admin): AdminUser,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<DeletedResponse>>, ApiError> {
    let deleted = ecograde_db::delete_product(&state.pool, id)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    if !deleted {
        return Err(ApiError::new(req_id.0, "not_found", "product not found"));
    }

    tracing::info!(product_id = id, admin = %admin.email, "product deleted");

    Ok(Json(ApiResponse {
        data: DeletedResponse { deleted: 1 },
        meta: ResponseMeta::new(req_id.0),
    }))
}
