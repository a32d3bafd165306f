//! HTTP endpoint layer — six routes, each a thin adapter over the service.

use crate::models::{CreateTaskRequest, TaskResponse, UpdateTaskRequest};
use crate::service::{TaskError, TaskService};
use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    routing::{get, patch},
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;

pub struct AppState {
    pub service: TaskService,
}

pub type SharedState = Arc<AppState>;

/// Build the application router over shared state. CORS is layered on in
/// main, not here, so tests can drive the bare router.
pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/api/tasks", get(list_tasks).post(create_task))
        .route(
            "/api/tasks/:id",
            get(get_task).put(update_task).delete(delete_task),
        )
        .route("/api/tasks/:id/toggle", patch(toggle_task))
        .with_state(state)
}

/// `?completed=true|false`, absent means no filter.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub completed: Option<bool>,
}

// GET /api/tasks?completed={bool?}
async fn list_tasks(
    State(state): State<SharedState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<TaskResponse>>, (StatusCode, String)> {
    let tasks = state
        .service
        .list(query.completed)
        .map_err(error_response)?;
    Ok(Json(tasks))
}

// GET /api/tasks/:id
async fn get_task(
    State(state): State<SharedState>,
    Path(id): Path<u64>,
) -> Result<Json<TaskResponse>, (StatusCode, String)> {
    let task = state
        .service
        .get(id)
        .map_err(error_response)?
        .ok_or((StatusCode::NOT_FOUND, "Task not found".to_string()))?;
    Ok(Json(task))
}

// POST /api/tasks
async fn create_task(
    State(state): State<SharedState>,
    Json(payload): Json<CreateTaskRequest>,
) -> Result<(StatusCode, [(header::HeaderName, String); 1], Json<TaskResponse>), (StatusCode, String)>
{
    let task = state.service.create(payload).map_err(error_response)?;
    let location = format!("/api/tasks/{}", task.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(task),
    ))
}

// PUT /api/tasks/:id
async fn update_task(
    State(state): State<SharedState>,
    Path(id): Path<u64>,
    Json(payload): Json<UpdateTaskRequest>,
) -> Result<Json<TaskResponse>, (StatusCode, String)> {
    let task = state.service.update(id, payload).map_err(error_response)?;
    Ok(Json(task))
}

// PATCH /api/tasks/:id/toggle
async fn toggle_task(
    State(state): State<SharedState>,
    Path(id): Path<u64>,
) -> Result<Json<TaskResponse>, (StatusCode, String)> {
    let task = state
        .service
        .toggle(id)
        .map_err(error_response)?
        .ok_or((StatusCode::NOT_FOUND, "Task not found".to_string()))?;
    Ok(Json(task))
}

// DELETE /api/tasks/:id
async fn delete_task(
    State(state): State<SharedState>,
    Path(id): Path<u64>,
) -> Result<StatusCode, (StatusCode, String)> {
    let deleted = state.service.delete(id).map_err(error_response)?;
    if !deleted {
        return Err((StatusCode::NOT_FOUND, "Task not found".to_string()));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// One place mapping service errors to status codes, so the handlers never
/// disagree about which error is a 400 and which is a 404.
fn error_response(err: TaskError) -> (StatusCode, String) {
    let status = match err {
        TaskError::NotFound => StatusCode::NOT_FOUND,
        TaskError::TitleRequired => StatusCode::BAD_REQUEST,
        TaskError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, err.to_string())
}

// ── Tests ──────────────────────────────────────────────────────
