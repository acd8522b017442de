//! Database operations for the `comparisons` history table.
//!
//! Retention is a storage-layer policy: every row gets an `expires_at` 30
//! days past creation, every read filters on it, and `purge_expired` (driven
//! by the scheduler and the CLI) physically removes dead rows.

use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::PgPool;

use ecograde_core::{ComparisonOutcome, ExternalData, GraphData, Highlights, Recommendations};

use crate::DbError;

/// Days a stored comparison stays readable before it expires.
pub const RETENTION_DAYS: i64 = 30;

// ---------------------------------------------------------------------------
// Row types
// ---------------------------------------------------------------------------

/// A `comparisons` row with both product references resolved.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ComparisonDetailRow {
    pub id: i64,
    pub user_id: i64,
    pub product1_id: i64,
    pub product2_id: i64,
    pub product1_name: String,
    pub product1_brand: String,
    pub product2_name: String,
    pub product2_brand: String,
    pub product1_score: i32,
    pub product2_score: i32,
    pub score_difference: i32,
    pub winner_product_id: Option<i64>,
    pub highlights: Json<Highlights>,
    pub comparison_graph: Json<GraphData>,
    pub external_data: Json<ExternalData>,
    pub recommendations: Json<Recommendations>,
    pub eco_description: String,
    pub best_for: String,
    pub key_difference: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl ComparisonDetailRow {
    /// The two resolved product references, in stored order.
    #[must_use]
    pub fn product_refs(&self) -> [ComparisonProductRef; 2] {
        [
            ComparisonProductRef {
                id: self.product1_id,
                name: self.product1_name.clone(),
                brand: self.product1_brand.clone(),
            },
            ComparisonProductRef {
                id: self.product2_id,
                name: self.product2_name.clone(),
                brand: self.product2_brand.clone(),
            },
        ]
    }
}

/// A resolved product reference inside a stored comparison.
#[derive(Debug, Clone)]
pub struct ComparisonProductRef {
    pub id: i64,
    pub name: String,
    pub brand: String,
}

/// One entry of the most-compared ranking.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MostComparedRow {
    pub product_id: i64,
    pub name: String,
    pub brand: String,
    pub category: String,
    pub count: i64,
}

/// One day of the comparison trend.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TrendPointRow {
    /// Calendar day formatted `YYYY-MM-DD` (UTC).
    pub day: String,
    pub count: i64,
}

const DETAIL_SELECT: &str = "SELECT \
        c.id, c.user_id, c.product1_id, c.product2_id, \
        p1.name AS product1_name, p1.brand AS product1_brand, \
        p2.name AS product2_name, p2.brand AS product2_brand, \
        c.product1_score, c.product2_score, c.score_difference, c.winner_product_id, \
        c.highlights, c.comparison_graph, c.external_data, c.recommendations, \
        c.eco_description, c.best_for, c.key_difference, c.created_at, c.expires_at \
     FROM comparisons c \
     JOIN products p1 ON p1.id = c.product1_id \
     JOIN products p2 ON p2.id = c.product2_id";

// ---------------------------------------------------------------------------
// writes
// ---------------------------------------------------------------------------

/// Persist a computed comparison for a user.
///
/// Denormalizes the outcome into scalar score columns plus `JSONB`
/// sub-structures, stamping `expires_at` [`RETENTION_DAYS`] ahead. The row is
/// immutable once written; deletion is the only mutation.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the insert fails — including the CHECK
/// violation when both product ids are equal.
pub async fn insert_comparison(
    pool: &PgPool,
    user_id: i64,
    outcome: &ComparisonOutcome,
) -> Result<i64, DbError> {
    let (product1, product2) = (&outcome.products[0], &outcome.products[1]);

    let id: i64 = sqlx::query_scalar::<_, i64>(
        "INSERT INTO comparisons \
             (user_id, product1_id, product2_id, product1_score, product2_score, \
              score_difference, winner_product_id, highlights, comparison_graph, \
              external_data, recommendations, eco_description, best_for, key_difference, \
              expires_at) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, \
                 NOW() + make_interval(days => $15)) \
         RETURNING id",
    )
    .bind(user_id)
    .bind(product1.id)
    .bind(product2.id)
    .bind(outcome.scores.product1)
    .bind(outcome.scores.product2)
    .bind(outcome.scores.difference)
    .bind(outcome.winner)
    .bind(Json(&outcome.sustainability_highlights))
    .bind(Json(&outcome.comparison_graph))
    .bind(Json(&outcome.external_data))
    .bind(Json(&outcome.recommendations))
    .bind(&outcome.eco_description)
    .bind(&outcome.summary.best_for)
    .bind(&outcome.summary.key_difference)
    .bind(i32::try_from(RETENTION_DAYS).unwrap_or(30))
    .fetch_one(pool)
    .await?;

    Ok(id)
}

/// Delete a comparison by id. Returns `true` if a row was removed.
///
/// Ownership checks happen in the caller; this is the raw delete.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the delete fails.
pub async fn delete_comparison(pool: &PgPool, id: i64) -> Result<bool, DbError> {
    let result = sqlx::query("DELETE FROM comparisons WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Delete every comparison owned by a user. Returns the number removed.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the delete fails.
pub async fn delete_all_for_user(pool: &PgPool, user_id: i64) -> Result<u64, DbError> {
    let result = sqlx::query("DELETE FROM comparisons WHERE user_id = $1")
        .bind(user_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

/// Remove rows past their expiry. Returns the number purged.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the delete fails.
pub async fn purge_expired(pool: &PgPool) -> Result<u64, DbError> {
    let result = sqlx::query("DELETE FROM comparisons WHERE expires_at <= NOW()")
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

// ---------------------------------------------------------------------------
// reads
// ---------------------------------------------------------------------------

/// A user's most recent comparisons, newest first, product refs resolved.
///
/// Expired rows are invisible even before the purge job removes them.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_recent_for_user(
    pool: &PgPool,
    user_id: i64,
    limit: i64,
) -> Result<Vec<ComparisonDetailRow>, DbError> {
    let sql = format!(
        "{DETAIL_SELECT} \
         WHERE c.user_id = $1 AND c.expires_at > NOW() \
         ORDER BY c.created_at DESC, c.id DESC \
         LIMIT $2"
    );
    let rows = sqlx::query_as::<_, ComparisonDetailRow>(&sql)
        .bind(user_id)
        .bind(limit)
        .fetch_all(pool)
        .await?;

    Ok(rows)
}

/// Fetch a single comparison by id, product refs resolved.
///
/// Expired rows return `None`, matching [`list_recent_for_user`].
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn get_comparison(
    pool: &PgPool,
    id: i64,
) -> Result<Option<ComparisonDetailRow>, DbError> {
    let sql = format!("{DETAIL_SELECT} WHERE c.id = $1 AND c.expires_at > NOW()");
    let row = sqlx::query_as::<_, ComparisonDetailRow>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(row)
}

// ---------------------------------------------------------------------------
// aggregates
// ---------------------------------------------------------------------------

/// Count live (non-expired) comparisons.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn count_comparisons(pool: &PgPool) -> Result<i64, DbError> {
    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM comparisons WHERE expires_at > NOW()")
            .fetch_one(pool)
            .await?;

    Ok(count)
}

/// Rank products by how often they appear in stored comparisons.
///
/// Counts appearances in either slot across all live rows, descending; ties
/// break on product id for a stable ranking.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn most_compared_products(
    pool: &PgPool,
    limit: i64,
) -> Result<Vec<MostComparedRow>, DbError> {
    let rows = sqlx::query_as::<_, MostComparedRow>(
        "SELECT p.id AS product_id, p.name, p.brand, p.category, a.count \
         FROM ( \
             SELECT product_id, COUNT(*) AS count \
             FROM ( \
                 SELECT product1_id AS product_id FROM comparisons WHERE expires_at > NOW() \
                 UNION ALL \
                 SELECT product2_id FROM comparisons WHERE expires_at > NOW() \
             ) appearances \
             GROUP BY product_id \
         ) a \
         JOIN products p ON p.id = a.product_id \
         ORDER BY a.count DESC, p.id ASC \
         LIMIT $1",
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Per-day comparison counts over the last 7 days, oldest day first.
///
/// Days with zero comparisons are absent from the result.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn trend_last_7_days(pool: &PgPool) -> Result<Vec<TrendPointRow>, DbError> {
    let rows = sqlx::query_as::<_, TrendPointRow>(
        "SELECT TO_CHAR(created_at AT TIME ZONE 'UTC', 'YYYY-MM-DD') AS day, \
                COUNT(*) AS count \
         FROM comparisons \
         WHERE created_at >= NOW() - INTERVAL '7 days' \
         GROUP BY day \
         ORDER BY day ASC",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Mean score difference across live comparisons; 0.0 when there are none.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn average_score_difference(pool: &PgPool) -> Result<f64, DbError> {
    let avg: f64 = sqlx::query_scalar(
        "SELECT COALESCE(AVG(score_difference), 0)::float8 \
         FROM comparisons WHERE expires_at > NOW()",
    )
    .fetch_one(pool)
    .await?;

    Ok(avg)
}
