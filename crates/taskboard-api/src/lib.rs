//! Taskboard API - REST server for the task list
//!
//! Serves account registration and sign-in plus task record CRUD, with the
//! mutating task operations gated behind bearer-token authentication.

pub mod auth;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;
pub mod store;

use axum::{routing::get, Router};
use state::AppState;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health::health_check,
        handlers::auth::register_handler,
        handlers::auth::sign_in_handler,
        handlers::tasks::create_task,
        handlers::tasks::list_tasks,
        handlers::tasks::update_task,
        handlers::tasks::delete_task,
    ),
    components(schemas(
        error::ApiError,
        auth::service::RegisterRequest,
        auth::service::SignInRequest,
        handlers::auth::RegisterResponse,
        handlers::auth::SignInResponse,
        handlers::tasks::CreateTaskRequest,
        handlers::tasks::UpdateTaskRequest,
        handlers::tasks::DeleteTaskResponse,
        handlers::health::HealthResponse,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "accounts", description = "Registration and sign-in"),
        (name = "tasks", description = "Task records"),
        (name = "health", description = "Liveness"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Build the full application router.
pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = cors_layer(&state.config.server.cors_origins);

    Router::new()
        .route("/health", get(handlers::health::health_check))
        .nest("/api", routes::api_routes(state.clone()))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::new();
    }

    let origins: Vec<_> = origins
        .iter()
        .filter_map(|o| o.parse::<axum::http::HeaderValue>().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(tower_http::cors::AllowOrigin::list(origins))
        .allow_methods(tower_http::cors::Any)
        .allow_headers(tower_http::cors::Any)
}

/// Build a router over fresh in-memory state with a fixed test secret.
#[cfg(any(test, feature = "test-utils"))]
pub fn create_router_for_testing() -> Router {
    use taskboard_core::AppConfig;

    let mut config = AppConfig::default();
    config.auth.jwt_secret = "integration-test-secret".to_string();

    create_router(Arc::new(AppState::new(config)))
}

/// The signing config used by [`create_router_for_testing`], for crafting
/// tokens in tests.
#[cfg(any(test, feature = "test-utils"))]
pub fn jwt_config_for_testing() -> auth::JwtConfig {
    auth::JwtConfig {
        secret: "integration-test-secret".to_string(),
        validity_days: 365,
        issuer: "taskboard-api".to_string(),
    }
}
