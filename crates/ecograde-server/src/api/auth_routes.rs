//! Registration and login handlers.
//!
//! Passwords are hashed with Argon2id; sessions are opaque bearer tokens
//! whose SHA-256 digest is stored with a TTL. The raw token appears exactly
//! once, in the login response.

use axum::{extract::State, http::StatusCode, Extension, Json};
use serde::{Deserialize, Serialize};

use ecograde_core::credentials::{
    generate_session_token, hash_password, token_digest, verify_password,
};

use crate::middleware::RequestId;

use super::{map_db_error, ApiError, ApiResponse, AppState, ResponseMeta};

// ---------------------------------------------------------------------------
// Request / response bodies
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(super) struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub(super) struct UserResponse {
    pub id: i64,
    pub email: String,
    pub role: String,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Serialize)]
pub(super) struct LoginResponse {
    pub token: String,
    pub user: UserResponse,
}

// ---------------------------------------------------------------------------
// Validation helpers
// ---------------------------------------------------------------------------

fn validate_email(req_id: &str, email: &str) -> Result<(), ApiError> {
    let trimmed = email.trim();
    if trimmed.is_empty() || !trimmed.contains('@') || trimmed.len() > 254 {
        return Err(ApiError::new(
            req_id,
            "validation_error",
            "a valid email address is required",
        ));
    }
    Ok(())
}

fn validate_password(req_id: &str, password: &str) -> Result<(), ApiError> {
    if password.len() < 8 {
        return Err(ApiError::new(
            req_id,
            "validation_error",
            "password must be at least 8 characters",
        ));
    }
    Ok(())
}

fn validate_name(req_id: &str, field: &str, value: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() || value.len() > 100 {
        return Err(ApiError::new(
            req_id,
            "validation_error",
            format!("'{field}' must be 1-100 characters"),
        ));
    }
    Ok(())
}

fn map_unique_violation(req_id: &str, e: &ecograde_db::DbError) -> ApiError {
    if let ecograde_db::DbError::Sqlx(sqlx::Error::Database(db_err)) = e {
        if db_err.code().as_deref() == Some("23505") {
            return ApiError::new(req_id, "conflict", "a user with that email already exists");
        }
    }
    map_db_error(req_id.to_owned(), e)
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/register — create a customer account.
pub(super) async fn register(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserResponse>>), ApiError> {
    let rid = &req_id.0;

    validate_email(rid, &body.email)?;
    validate_password(rid, &body.password)?;
    validate_name(rid, "first_name", &body.first_name)?;
    validate_name(rid, "last_name", &body.last_name)?;

    let password_hash = hash_password(&body.password).map_err(|e| {
        tracing::error!(error = %e, "password hashing failed");
        ApiError::new(rid, "internal_error", "registration failed")
    })?;

    let user = ecograde_db::insert_user(
        &state.pool,
        &ecograde_db::NewUser {
            email: body.email.trim().to_lowercase(),
            password_hash,
            role: "customer".to_string(),
            first_name: body.first_name.trim().to_owned(),
            last_name: body.last_name.trim().to_owned(),
        },
    )
    .await
    .map_err(|e| map_unique_violation(rid, &e))?;

    tracing::info!(user_id = user.id, "user registered");

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse {
            data: user_response(user),
            meta: ResponseMeta::new(req_id.0),
        }),
    ))
}

/// POST /api/v1/auth/login — verify credentials and issue a session token.
pub(super) async fn login(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, ApiError> {
    let rid = &req_id.0;

    let email = body.email.trim().to_lowercase();
    let user = ecograde_db::get_user_by_email(&state.pool, &email)
        .await
        .map_err(|e| map_db_error(rid.clone(), &e))?;

    // One rejection message for both unknown email and bad password.
    let Some(user) = user else {
        return Err(ApiError::new(rid, "unauthorized", "invalid credentials"));
    };

    if !verify_password(&body.password, &user.password_hash) {
        return Err(ApiError::new(rid, "unauthorized", "invalid credentials"));
    }

    if user.is_blocked {
        return Err(ApiError::new(rid, "forbidden", "account is blocked"));
    }

    let token = generate_session_token();
    ecograde_db::create_session(
        &state.pool,
        user.id,
        &token_digest(&token),
        state.session_ttl_hours,
    )
    .await
    .map_err(|e| map_db_error(rid.clone(), &e))?;

    tracing::info!(user_id = user.id, "user logged in");

    Ok(Json(ApiResponse {
        data: LoginResponse {
            token,
            user: user_response(user),
        },
        meta: ResponseMeta::new(req_id.0),
    }))
}

fn user_response(user: ecograde_db::UserRow) -> UserResponse {
    UserResponse {
        id: user.id,
        email: user.email,
        role: user.role,
        first_name: user.first_name,
        last_name: user.last_name,
    }
}
