//! Task record endpoints
//!
//! Reads are unauthenticated; create, update, and delete sit behind the
//! bearer-token gate (see `auth::middleware`), which has already verified
//! the caller by the time these handlers run.

use crate::auth::AuthenticatedAccount;
use crate::error::AppError;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use taskboard_core::{StoreError, TaskPatch, TaskRecord};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Task creation request
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateTaskRequest {
    #[validate(length(min = 1, max = 100, message = "name is required"))]
    pub name: String,
    #[validate(length(min = 4, max = 250, message = "task must be 4-250 characters"))]
    pub task: String,
    pub role: Option<String>,
    pub status: Option<String>,
}

/// Task update request; omitted fields are left untouched
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateTaskRequest {
    #[validate(length(min = 1, max = 100, message = "name must not be empty"))]
    pub name: Option<String>,
    #[validate(length(min = 4, max = 250, message = "task must be 4-250 characters"))]
    pub task: Option<String>,
    pub role: Option<String>,
    pub status: Option<String>,
}

/// Query parameters for listing tasks
#[derive(Debug, Deserialize, IntoParams)]
pub struct ListTasksQuery {
    /// Return only the record with this id
    pub id: Option<Uuid>,
}

/// Deletion response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeleteTaskResponse {
    pub message: String,
}

fn not_found(id: Uuid) -> impl FnOnce(StoreError) -> AppError {
    move |e| match e {
        StoreError::NotFound => AppError::NotFound(format!("No task with id {id}")),
        other => other.into(),
    }
}

/// Create a task record (authenticated)
#[utoipa::path(
    post,
    path = "/api/tasks",
    tag = "tasks",
    request_body = CreateTaskRequest,
    responses(
        (status = 201, description = "Task created"),
        (status = 400, description = "Invalid input", body = crate::error::ApiError),
        (status = 401, description = "Missing token", body = crate::error::ApiError),
        (status = 403, description = "Invalid or expired token", body = crate::error::ApiError),
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_task(
    State(state): State<Arc<AppState>>,
    Extension(account): Extension<AuthenticatedAccount>,
    Json(request): Json<CreateTaskRequest>,
) -> Result<impl IntoResponse, AppError> {
    request.validate()?;

    let record = TaskRecord::new(request.name, request.task, request.role, request.status);
    let created = state.tasks.insert(record).await?;

    tracing::info!(task_id = %created.id, account_id = %account.account_id, "task created");
    Ok((StatusCode::CREATED, Json(created)))
}

/// List task records, or fetch one by id (unauthenticated)
#[utoipa::path(
    get,
    path = "/api/tasks",
    tag = "tasks",
    params(ListTasksQuery),
    responses(
        (status = 200, description = "Task record or collection"),
        (status = 404, description = "No task with the given id", body = crate::error::ApiError),
    )
)]
pub async fn list_tasks(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListTasksQuery>,
) -> Result<Response, AppError> {
    match query.id {
        Some(id) => {
            let record = state
                .tasks
                .find_by_id(id)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("No task with id {id}")))?;
            Ok(Json(record).into_response())
        }
        None => {
            let all = state.tasks.list().await?;
            Ok(Json(all).into_response())
        }
    }
}

/// Update a task record by id (authenticated)
#[utoipa::path(
    put,
    path = "/api/tasks/{id}",
    tag = "tasks",
    request_body = UpdateTaskRequest,
    responses(
        (status = 200, description = "Updated task"),
        (status = 400, description = "Invalid input", body = crate::error::ApiError),
        (status = 401, description = "Missing token", body = crate::error::ApiError),
        (status = 403, description = "Invalid or expired token", body = crate::error::ApiError),
        (status = 404, description = "No task with the given id", body = crate::error::ApiError),
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_task(
    State(state): State<Arc<AppState>>,
    Extension(account): Extension<AuthenticatedAccount>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateTaskRequest>,
) -> Result<impl IntoResponse, AppError> {
    request.validate()?;

    let patch = TaskPatch {
        name: request.name,
        task: request.task,
        role: request.role,
        status: request.status,
    };

    let updated = state
        .tasks
        .update_by_id(id, patch)
        .await
        .map_err(not_found(id))?;

    tracing::info!(task_id = %id, account_id = %account.account_id, "task updated");
    Ok(Json(updated))
}

/// Delete a task record by id (authenticated)
#[utoipa::path(
    delete,
    path = "/api/tasks/{id}",
    tag = "tasks",
    responses(
        (status = 200, description = "Task deleted", body = DeleteTaskResponse),
        (status = 401, description = "Missing token", body = crate::error::ApiError),
        (status = 403, description = "Invalid or expired token", body = crate::error::ApiError),
        (status = 404, description = "No task with the given id", body = crate::error::ApiError),
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_task(
    State(state): State<Arc<AppState>>,
    Extension(account): Extension<AuthenticatedAccount>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    state
        .tasks
        .delete_by_id(id)
        .await
        .map_err(not_found(id))?;

    tracing::info!(task_id = %id, account_id = %account.account_id, "task deleted");
    Ok(Json(DeleteTaskResponse {
        message: "Task deleted successfully".to_string(),
    }))
}
