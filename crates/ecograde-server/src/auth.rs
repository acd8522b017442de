//! Request-level authentication: bearer session tokens resolved to users.
//!
//! Handlers declare the identity they need as an extractor argument:
//! [`AuthUser`] for any signed-in user (401 otherwise), [`AdminUser`] for the
//! admin role (403 for everyone else).

use axum::extract::FromRequestParts;
use axum::http::{header::AUTHORIZATION, request::Parts, HeaderValue};

use ecograde_core::credentials::token_digest;

use crate::api::{ApiError, AppState};
use crate::middleware::RequestId;

/// The authenticated caller, resolved from a live session.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: i64,
    pub email: String,
    pub role: String,
}

impl AuthUser {
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == "admin"
    }
}

/// An [`AuthUser`] that has been checked for the admin role.
#[derive(Debug, Clone)]
pub struct AdminUser(pub AuthUser);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let req_id = request_id_of(parts);

        let Some(token) = extract_bearer_token(parts.headers.get(AUTHORIZATION)) else {
            return Err(ApiError::new(
                req_id,
                "unauthorized",
                "missing or invalid bearer token",
            ));
        };

        let digest = token_digest(token);
        let session = ecograde_db::get_session_user(&state.pool, &digest)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "session lookup failed");
                ApiError::new(req_id.clone(), "internal_error", "session lookup failed")
            })?;

        match session {
            Some(user) if user.is_blocked => {
                Err(ApiError::new(req_id, "unauthorized", "account is blocked"))
            }
            Some(user) => Ok(AuthUser {
                id: user.id,
                email: user.email,
                role: user.role,
            }),
            None => Err(ApiError::new(
                req_id,
                "unauthorized",
                "invalid or expired session token",
            )),
        }
    }
}

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.is_admin() {
            Ok(AdminUser(user))
        } else {
            Err(ApiError::new(
                request_id_of(parts),
                "forbidden",
                "admin access required",
            ))
        }
    }
}

fn request_id_of(parts: &Parts) -> String {
    parts
        .extensions
        .get::<RequestId>()
        .map(|r| r.0.clone())
        .unwrap_or_default()
}

fn extract_bearer_token(value: Option<&HeaderValue>) -> Option<&str> {
    value
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_bearer_token_accepts_valid_header() {
        let header = HeaderValue::from_static("Bearer test-token");
        assert_eq!(extract_bearer_token(Some(&header)), Some("test-token"));
    }

    #[test]
    fn extract_bearer_token_rejects_non_bearer_header() {
        let header = HeaderValue::from_static("Basic abc123");
        assert_eq!(extract_bearer_token(Some(&header)), None);
    }

    #[test]
    fn extract_bearer_token_rejects_blank_token() {
        let header = HeaderValue::from_static("Bearer   ");
        assert_eq!(extract_bearer_token(Some(&header)), None);
    }

    #[test]
    fn admin_check_uses_role_string() {
        let user = AuthUser {
            id: 1,
            email: "a@b.c".to_string(),
            role: "admin".to_string(),
        };
        assert!(user.is_admin());
        let user = AuthUser {
            id: 2,
            email: "c@d.e".to_string(),
            role: "customer".to_string(),
        };
        assert!(!user.is_admin());
    }
}
