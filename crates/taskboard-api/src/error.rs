//! API error handling
//!
//! Every collaborator failure is translated into exactly one `AppError`
//! variant before it crosses the HTTP boundary. Internal detail (storage
//! messages, hash parse errors) is logged, never serialized.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use taskboard_core::StoreError;
use utoipa::ToSchema;

/// API error response body
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiError {
    /// Error code
    pub code: String,
    /// Human-readable message
    pub message: String,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Application error type
#[derive(Debug)]
pub enum AppError {
    /// Missing or malformed input
    Validation(String),
    /// Duplicate unique key (registration with a taken email)
    Conflict(String),
    /// Sign-in failed. Deliberately carries no detail: unknown email and
    /// wrong password must be indistinguishable to the caller.
    InvalidCredentials,
    /// No record with the requested id
    NotFound(String),
    /// Storage or other unexpected failure
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            AppError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                ApiError::new("VALIDATION_ERROR", msg),
            ),
            AppError::Conflict(msg) => (StatusCode::BAD_REQUEST, ApiError::new("CONFLICT", msg)),
            AppError::InvalidCredentials => (
                StatusCode::BAD_REQUEST,
                ApiError::new("INVALID_CREDENTIALS", "Invalid email or password"),
            ),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, ApiError::new("NOT_FOUND", msg)),
            AppError::Internal(msg) => {
                tracing::error!("internal error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiError::new("INTERNAL_ERROR", "Internal server error"),
                )
            }
        };

        (status, Json(error)).into_response()
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict => AppError::Conflict("Record already exists".to_string()),
            StoreError::NotFound => AppError::NotFound("Record not found".to_string()),
            StoreError::Unavailable(msg) => AppError::Internal(msg),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(err.to_string())
    }
}
