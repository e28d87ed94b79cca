//! Authentication gate for mutating task routes
//!
//! Extracts the bearer token from the Authorization header and verifies it
//! against the process-wide signing config held in shared state. The check
//! runs to completion before the wrapped handler executes; on any failure
//! the request never reaches storage.

use crate::auth::jwt::{self, JwtError};
use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

/// Identity extracted from a verified token.
///
/// Added to request extensions by [`require_auth`]; handlers read it with
/// `Extension<AuthenticatedAccount>`.
#[derive(Debug, Clone)]
pub struct AuthenticatedAccount {
    pub account_id: Uuid,
    pub email: String,
}

/// Authentication gate errors
///
/// A missing header or missing bearer scheme is 401; a token that is
/// present but fails verification (tampered, wrong key, expired) is 403.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("missing Authorization header")]
    MissingAuthHeader,

    #[error("invalid Authorization header format")]
    InvalidAuthHeader,

    #[error("token rejected: {0}")]
    InvalidToken(#[from] JwtError),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AuthError::MissingAuthHeader | AuthError::InvalidAuthHeader => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                "Authentication required. Please sign in.",
            ),
            AuthError::InvalidToken(JwtError::ExpiredToken) => {
                (StatusCode::FORBIDDEN, "FORBIDDEN", "Token has expired")
            }
            AuthError::InvalidToken(_) => {
                (StatusCode::FORBIDDEN, "FORBIDDEN", "Invalid token")
            }
        };

        (status, Json(ApiError::new(code, message))).into_response()
    }
}

/// Middleware that requires a valid bearer token.
///
/// Mounted with `middleware::from_fn_with_state` so the verifier uses the
/// same injected `JwtConfig` as the issuer instead of reading the
/// environment per request.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingAuthHeader)?
        .to_str()
        .map_err(|_| AuthError::InvalidAuthHeader)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(AuthError::InvalidAuthHeader)?;

    let claims = jwt::verify_token(&state.jwt, token).map_err(|e| {
        tracing::debug!("token verification failed: {e}");
        AuthError::InvalidToken(e)
    })?;

    let account = AuthenticatedAccount {
        account_id: jwt::account_id(&claims)?,
        email: claims.email,
    };

    request.extensions_mut().insert(account);

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_header_is_unauthorized() {
        let response = AuthError::MissingAuthHeader.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn missing_scheme_is_unauthorized() {
        let response = AuthError::InvalidAuthHeader.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn expired_token_is_forbidden() {
        let response = AuthError::InvalidToken(JwtError::ExpiredToken).into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn bad_signature_is_forbidden() {
        let response = AuthError::InvalidToken(JwtError::InvalidSignature).into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }
}
