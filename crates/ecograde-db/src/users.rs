//! Database operations for `users` and `auth_sessions`.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::DbError;

// ---------------------------------------------------------------------------
// Row types
// ---------------------------------------------------------------------------

/// A row from the `users` table. `password_hash` never leaves the server.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRow {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
    /// `"customer"` or `"admin"`, enforced by a table CHECK constraint.
    pub role: String,
    pub first_name: String,
    pub last_name: String,
    pub is_blocked: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserRow {
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == "admin"
    }
}

/// The user identity resolved from a live session token.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SessionUserRow {
    pub id: i64,
    pub email: String,
    pub role: String,
    pub is_blocked: bool,
}

impl SessionUserRow {
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == "admin"
    }
}

/// Input for [`insert_user`]; the password must already be hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub first_name: String,
    pub last_name: String,
}

// ---------------------------------------------------------------------------
// users operations
// ---------------------------------------------------------------------------

/// Insert a new user.
///
/// A duplicate email surfaces as the underlying unique-violation
/// [`DbError::Sqlx`]; callers map it to their conflict response.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the insert fails.
pub async fn insert_user(pool: &PgPool, user: &NewUser) -> Result<UserRow, DbError> {
    let row = sqlx::query_as::<_, UserRow>(
        "INSERT INTO users (email, password_hash, role, first_name, last_name) \
         VALUES ($1, $2, $3, $4, $5) \
         RETURNING id, email, password_hash, role, first_name, last_name, \
                   is_blocked, created_at, updated_at",
    )
    .bind(&user.email)
    .bind(&user.password_hash)
    .bind(&user.role)
    .bind(&user.first_name)
    .bind(&user.last_name)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

/// Look up a user by email (exact match).
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn get_user_by_email(pool: &PgPool, email: &str) -> Result<Option<UserRow>, DbError> {
    let row = sqlx::query_as::<_, UserRow>(
        "SELECT id, email, password_hash, role, first_name, last_name, \
                is_blocked, created_at, updated_at \
         FROM users WHERE email = $1",
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// Look up a user by id.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn get_user_by_id(pool: &PgPool, id: i64) -> Result<Option<UserRow>, DbError> {
    let row = sqlx::query_as::<_, UserRow>(
        "SELECT id, email, password_hash, role, first_name, last_name, \
                is_blocked, created_at, updated_at \
         FROM users WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

// ---------------------------------------------------------------------------
// auth_sessions operations
// ---------------------------------------------------------------------------

/// Persist a new session for a user.
///
/// Only the token digest is stored; the raw token goes back to the client and
/// is never written anywhere server-side.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the insert fails.
pub async fn create_session(
    pool: &PgPool,
    user_id: i64,
    token_digest: &str,
    ttl_hours: u64,
) -> Result<(), DbError> {
    sqlx::query(
        "INSERT INTO auth_sessions (user_id, token_digest, expires_at) \
         VALUES ($1, $2, NOW() + make_interval(hours => $3))",
    )
    .bind(user_id)
    .bind(token_digest)
    .bind(i32::try_from(ttl_hours).unwrap_or(i32::MAX))
    .execute(pool)
    .await?;

    Ok(())
}

/// Resolve the user behind a session token digest.
///
/// Returns `None` for unknown or expired sessions. Blocked users still
/// resolve; rejecting them is an authentication-layer decision.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn get_session_user(
    pool: &PgPool,
    token_digest: &str,
) -> Result<Option<SessionUserRow>, DbError> {
    let row = sqlx::query_as::<_, SessionUserRow>(
        "SELECT u.id, u.email, u.role, u.is_blocked \
         FROM auth_sessions s \
         JOIN users u ON u.id = s.user_id \
         WHERE s.token_digest = $1 \
           AND s.expires_at > NOW()",
    )
    .bind(token_digest)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}
