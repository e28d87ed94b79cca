//! API route definitions
//!
//! Mutating task routes sit behind the bearer-token gate; account routes
//! and task reads are public.

use crate::auth::middleware::require_auth;
use crate::handlers::{auth, tasks};
use crate::state::AppState;
use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;

/// Create the `/api` routes.
pub fn api_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    // Public routes (no authentication required)
    let public_routes = Router::new()
        .route("/register-account", post(auth::register_handler))
        .route("/sign-in", post(auth::sign_in_handler))
        .route("/tasks", get(tasks::list_tasks));

    // Protected routes (valid bearer token required)
    let protected_routes = Router::new()
        .route("/tasks", post(tasks::create_task))
        .route(
            "/tasks/:id",
            put(tasks::update_task).delete(tasks::delete_task),
        )
        .route_layer(middleware::from_fn_with_state(state, require_auth));

    Router::new().merge(public_routes).merge(protected_routes)
}
