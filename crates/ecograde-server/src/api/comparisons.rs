//! Comparison endpoints: compare, quick compare, history, and admin stats.
//!
//! A comparison run is synchronous for the scoring/narrative/graph steps; the
//! two enrichment lookups run concurrently and degrade to `null` on failure.
//! Persistence is an opt-in tail step for authenticated callers whose failure
//! is logged but never surfaces to the response.

use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use ecograde_core::{
    compare_products, ComparisonOutcome, ExternalData, GraphData, Highlights, Recommendations,
};
use ecograde_db::ProductRow;

use crate::auth::{AdminUser, AuthUser};
use crate::middleware::RequestId;

use super::{map_db_error, ApiError, ApiResponse, AppState, ResponseMeta};

/// How many history entries the list endpoint returns.
const HISTORY_LIMIT: i64 = 10;
/// How many products the most-compared ranking returns.
const MOST_COMPARED_LIMIT: i64 = 5;

// ---------------------------------------------------------------------------
// Request / response bodies
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(super) struct CompareRequest {
    pub product_id1: Option<i64>,
    pub product_id2: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub(super) struct QuickCompareQuery {
    pub name1: Option<String>,
    pub name2: Option<String>,
}

#[derive(Debug, Serialize)]
pub(super) struct ComparisonItem {
    pub id: i64,
    pub products: Vec<ProductRefItem>,
    pub scores: ScoreSummary,
    pub winner_product_id: Option<i64>,
    pub sustainability_highlights: Highlights,
    pub comparison_graph: GraphData,
    pub external_data: ExternalData,
    pub recommendations: Recommendations,
    pub eco_description: String,
    pub summary: SummaryItem,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub(super) struct ProductRefItem {
    pub id: i64,
    pub name: String,
    pub brand: String,
}

#[derive(Debug, Serialize)]
pub(super) struct ScoreSummary {
    pub product1: i32,
    pub product2: i32,
    pub difference: i32,
}

#[derive(Debug, Serialize)]
pub(super) struct SummaryItem {
    pub best_for: String,
    pub key_difference: String,
}

#[derive(Debug, Serialize)]
pub(super) struct DeletedResponse {
    pub deleted: u64,
}

#[derive(Debug, Serialize)]
pub(super) struct StatsResponse {
    pub total_comparisons: i64,
    pub most_compared_products: Vec<MostComparedItem>,
    pub last7_days_trend: Vec<TrendPoint>,
    pub average_score_difference: f64,
}

#[derive(Debug, Serialize)]
pub(super) struct MostComparedItem {
    pub product_id: i64,
    pub name: String,
    pub brand: String,
    pub category: String,
    pub count: i64,
}

#[derive(Debug, Serialize)]
pub(super) struct TrendPoint {
    pub day: String,
    pub count: i64,
}

impl From<ecograde_db::ComparisonDetailRow> for ComparisonItem {
    fn from(row: ecograde_db::ComparisonDetailRow) -> Self {
        let products = row
            .product_refs()
            .into_iter()
            .map(|r| ProductRefItem {
                id: r.id,
                name: r.name,
                brand: r.brand,
            })
            .collect();

        Self {
            id: row.id,
            products,
            scores: ScoreSummary {
                product1: row.product1_score,
                product2: row.product2_score,
                difference: row.score_difference,
            },
            winner_product_id: row.winner_product_id,
            sustainability_highlights: row.highlights.0,
            comparison_graph: row.comparison_graph.0,
            external_data: row.external_data.0,
            recommendations: row.recommendations.0,
            eco_description: row.eco_description,
            summary: SummaryItem {
                best_for: row.best_for,
                key_difference: row.key_difference,
            },
            created_at: row.created_at,
            expires_at: row.expires_at,
        }
    }
}

// ---------------------------------------------------------------------------
// Orchestration
// ---------------------------------------------------------------------------

/// Run a full comparison over two resolved product rows.
///
/// The two enrichment lookups are independent; either, both, or neither may
/// succeed, and a failure only leaves its `external_data` slot empty.
async fn run_comparison(
    state: &AppState,
    row1: &ProductRow,
    row2: &ProductRow,
) -> ComparisonOutcome {
    let product1 = row1.to_domain();
    let product2 = row2.to_domain();

    let (external1, external2) = tokio::join!(
        state.foodfacts.fetch_enrichment(&product1.name),
        state.foodfacts.fetch_enrichment(&product2.name),
    );

    compare_products(&product1, &product2, external1, external2)
}

async fn resolve_pair(
    state: &AppState,
    req_id: &str,
    id1: i64,
    id2: i64,
) -> Result<(ProductRow, ProductRow), ApiError> {
    let row1 = ecograde_db::get_product(&state.pool, id1)
        .await
        .map_err(|e| map_db_error(req_id.to_owned(), &e))?;
    let row2 = ecograde_db::get_product(&state.pool, id2)
        .await
        .map_err(|e| map_db_error(req_id.to_owned(), &e))?;

    match (row1, row2) {
        (Some(a), Some(b)) => Ok((a, b)),
        _ => Err(ApiError::new(
            req_id,
            "not_found",
            "one or both products not found",
        )),
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/comparisons/compare — compare two products by id and record
/// the run in the caller's history.
pub(super) async fn compare(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    user: AuthUser,
    Json(body): Json<CompareRequest>,
) -> Result<Json<ApiResponse<ComparisonOutcome>>, ApiError> {
    let rid = &req_id.0;

    let (Some(id1), Some(id2)) = (body.product_id1, body.product_id2) else {
        return Err(ApiError::new(
            rid,
            "validation_error",
            "both product IDs are required",
        ));
    };
    if id1 == id2 {
        return Err(ApiError::new(
            rid,
            "validation_error",
            "a comparison needs two distinct products",
        ));
    }

    let (row1, row2) = resolve_pair(&state, rid, id1, id2).await?;
    let outcome = run_comparison(&state, &row1, &row2).await;

    // The comparison is already computed; a failed save must not fail it.
    if let Err(e) = ecograde_db::insert_comparison(&state.pool, user.id, &outcome).await {
        tracing::error!(user_id = user.id, error = %e, "failed to save comparison history");
    }

    Ok(Json(ApiResponse {
        data: outcome,
        meta: ResponseMeta::new(req_id.0),
    }))
}

/// GET /api/v1/comparisons/quick?name1=&name2= — compare by fuzzy product
/// name without authentication; never persisted.
pub(super) async fn quick_compare(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<QuickCompareQuery>,
) -> Result<Json<ApiResponse<ComparisonOutcome>>, ApiError> {
    let rid = &req_id.0;

    let (name1, name2) = match (query.name1.as_deref(), query.name2.as_deref()) {
        (Some(a), Some(b)) if !a.trim().is_empty() && !b.trim().is_empty() => (a, b),
        _ => {
            return Err(ApiError::new(
                rid,
                "validation_error",
                "both product names are required",
            ));
        }
    };

    let row1 = ecograde_db::find_product_by_name_ci(&state.pool, name1.trim())
        .await
        .map_err(|e| map_db_error(rid.clone(), &e))?;
    let row2 = ecograde_db::find_product_by_name_ci(&state.pool, name2.trim())
        .await
        .map_err(|e| map_db_error(rid.clone(), &e))?;

    let (Some(row1), Some(row2)) = (row1, row2) else {
        return Err(ApiError::new(
            rid,
            "not_found",
            "products not found for one or both names",
        ));
    };

    let outcome = run_comparison(&state, &row1, &row2).await;

    Ok(Json(ApiResponse {
        data: outcome,
        meta: ResponseMeta::new(req_id.0),
    }))
}

/// GET /api/v1/comparisons/history — the caller's most recent comparisons.
pub(super) async fn list_history(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    user: AuthUser,
) -> Result<Json<ApiResponse<Vec<ComparisonItem>>>, ApiError> {
    let rows = ecograde_db::list_recent_for_user(&state.pool, user.id, HISTORY_LIMIT)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: rows.into_iter().map(ComparisonItem::from).collect(),
        meta: ResponseMeta::new(req_id.0),
    }))
}

/// GET /api/v1/comparisons/history/:id — a single stored comparison.
pub(super) async fn get_history_entry(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    user: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<ComparisonItem>>, ApiError> {
    let row = ecograde_db::get_comparison(&state.pool, id)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?
        .ok_or_else(|| ApiError::new(req_id.0.clone(), "not_found", "comparison not found"))?;

    if row.user_id != user.id && !user.is_admin() {
        return Err(ApiError::new(
            req_id.0,
            "forbidden",
            "not authorized to view this comparison",
        ));
    }

    Ok(Json(ApiResponse {
        data: ComparisonItem::from(row),
        meta: ResponseMeta::new(req_id.0),
    }))
}

/// DELETE /api/v1/comparisons/history/:id — owner or admin only.
pub(super) async fn delete_history_entry(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    user: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<DeletedResponse>>, ApiError> {
    let row = ecograde_db::get_comparison(&state.pool, id)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?
        .ok_or_else(|| ApiError::new(req_id.0.clone(), "not_found", "comparison not found"))?;

    if row.user_id != user.id && !user.is_admin() {
        return Err(ApiError::new(
            req_id.0,
            "forbidden",
            "not authorized to delete this comparison",
        ));
    }

    ecograde_db::delete_comparison(&state.pool, id)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: DeletedResponse { deleted: 1 },
        meta: ResponseMeta::new(req_id.0),
    }))
}

/// DELETE /api/v1/comparisons/history — clear the caller's entire history.
pub(super) async fn clear_history(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    user: AuthUser,
) -> Result<Json<ApiResponse<DeletedResponse>>, ApiError> {
    let deleted = ecograde_db::delete_all_for_user(&state.pool, user.id)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: DeletedResponse { deleted },
        meta: ResponseMeta::new(req_id.0),
    }))
}

/// GET /api/v1/comparisons/stats — aggregate analytics, admin only.
pub(super) async fn stats(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    AdminUser(_admin): AdminUser,
) -> Result<Json<ApiResponse<StatsResponse>>, ApiError> {
    let rid = &req_id.0;

    let total_comparisons = ecograde_db::count_comparisons(&state.pool)
        .await
        .map_err(|e| map_db_error(rid.clone(), &e))?;

    let most_compared = ecograde_db::most_compared_products(&state.pool, MOST_COMPARED_LIMIT)
        .await
        .map_err(|e| map_db_error(rid.clone(), &e))?;

    let trend = ecograde_db::trend_last_7_days(&state.pool)
        .await
        .map_err(|e| map_db_error(rid.clone(), &e))?;

    let average_score_difference = ecograde_db::average_score_difference(&state.pool)
        .await
        .map_err(|e| map_db_error(rid.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: StatsResponse {
            total_comparisons,
            most_compared_products: most_compared
                .into_iter()
                .map(|row| MostComparedItem {
                    product_id: row.product_id,
                    name: row.name,
                    brand: row.brand,
                    category: row.category,
                    count: row.count,
                })
                .collect(),
            last7_days_trend: trend
                .into_iter()
                .map(|row| TrendPoint {
                    day: row.day,
                    count: row.count,
                })
                .collect(),
            average_score_difference,
        },
        meta: ResponseMeta::new(req_id.0),
    }))
}
