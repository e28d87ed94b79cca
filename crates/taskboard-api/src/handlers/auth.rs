//! Account endpoints: registration and sign-in

use crate::auth::{AccountService, RegisterRequest, SignInRequest};
use crate::error::AppError;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

/// Registration response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RegisterResponse {
    pub message: String,
    pub account_id: Uuid,
}

/// Sign-in response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SignInResponse {
    pub message: String,
    pub token: String,
}

/// Register a new account
///
/// # Responses
///
/// * `201 Created` - Account created
/// * `400 Bad Request` - Invalid input or email already registered
/// * `500 Internal Server Error` - Storage failure
#[utoipa::path(
    post,
    path = "/api/register-account",
    tag = "accounts",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = RegisterResponse),
        (status = 400, description = "Invalid input or duplicate email", body = crate::error::ApiError),
        (status = 500, description = "Internal server error", body = crate::error::ApiError),
    )
)]
pub async fn register_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    let service = AccountService::new(state.accounts.clone(), state.jwt.clone());
    let account = service.register(request).await?;

    let response = RegisterResponse {
        message: "Account created successfully".to_string(),
        account_id: account.id,
    };

    Ok((StatusCode::CREATED, Json(response)))
}

/// Sign in with email and password
///
/// Returns a bearer token valid for the configured window (365 days by
/// default). Unknown email and wrong password yield the same response.
///
/// # Responses
///
/// * `200 OK` - Signed in, token returned
/// * `400 Bad Request` - Invalid credentials or malformed input
/// * `500 Internal Server Error` - Storage or signing failure
#[utoipa::path(
    post,
    path = "/api/sign-in",
    tag = "accounts",
    request_body = SignInRequest,
    responses(
        (status = 200, description = "Signed in", body = SignInResponse),
        (status = 400, description = "Invalid credentials", body = crate::error::ApiError),
        (status = 500, description = "Internal server error", body = crate::error::ApiError),
    )
)]
pub async fn sign_in_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SignInRequest>,
) -> Result<impl IntoResponse, AppError> {
    let service = AccountService::new(state.accounts.clone(), state.jwt.clone());
    let token = service.sign_in(request).await?;

    Ok(Json(SignInResponse {
        message: "Signed in".to_string(),
        token,
    }))
}
