//! Handlers for the `/projects/{project_id}/tasks` resource.
//!
//! Tasks are only reachable through their owning project, so every handler
//! takes both ids and scopes its query accordingly. Reading and note-taking
//! require any authenticated user; structural mutations require manager level.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use crestline_core::error::CoreError;
use crestline_core::types::DbId;
use crestline_db::models::task::{CreateTask, Task, UpdateTask};
use crestline_db::repositories::{ProjectRepo, TaskRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAuth, RequireManager};
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /projects/{project_id}/tasks/{id}/notes`.
#[derive(Debug, Deserialize)]
pub struct NoteRequest {
    pub content: String,
}

/// GET /api/v1/projects/{project_id}/tasks
pub async fn list(
    State(state): State<AppState>,
    RequireAuth(_): RequireAuth,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Task>>>> {
    ensure_project_exists(&state, project_id).await?;
    let tasks = TaskRepo::list_for_project(&state.pool, project_id).await?;
    Ok(Json(DataResponse { data: tasks }))
}

/// GET /api/v1/projects/{project_id}/tasks/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    RequireAuth(_): RequireAuth,
    Path((project_id, id)): Path<(DbId, DbId)>,
) -> AppResult<Json<DataResponse<Task>>> {
    let task = TaskRepo::find_by_id(&state.pool, project_id, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Task", id }))?;
    Ok(Json(DataResponse { data: task }))
}

/// POST /api/v1/projects/{project_id}/tasks
pub async fn create(
    State(state): State<AppState>,
    RequireManager(user): RequireManager,
    Path(project_id): Path<DbId>,
    Json(input): Json<CreateTask>,
) -> AppResult<(StatusCode, Json<DataResponse<Task>>)> {
    if input.title.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "title must not be empty".into(),
        )));
    }
    ensure_project_exists(&state, project_id).await?;

    let task = TaskRepo::create(&state.pool, project_id, &input, user.user_id).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: task })))
}

/// PUT /api/v1/projects/{project_id}/tasks/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireManager(_): RequireManager,
    Path((project_id, id)): Path<(DbId, DbId)>,
    Json(input): Json<UpdateTask>,
) -> AppResult<Json<DataResponse<Task>>> {
    let task = TaskRepo::update(&state.pool, project_id, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Task", id }))?;
    Ok(Json(DataResponse { data: task }))
}

/// DELETE /api/v1/projects/{project_id}/tasks/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireManager(_): RequireManager,
    Path((project_id, id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    let deleted = TaskRepo::delete(&state.pool, project_id, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "Task", id }))
    }
}

/// POST /api/v1/projects/{project_id}/tasks/{id}/notes
///
/// Append a note to the task. Notes are append-only; there is no edit or
/// delete. Any authenticated user may add one.
pub async fn add_note(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path((project_id, id)): Path<(DbId, DbId)>,
    Json(input): Json<NoteRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Task>>)> {
    if input.content.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "note content must not be empty".into(),
        )));
    }

    let task = TaskRepo::add_note(&state.pool, project_id, id, &input.content, user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Task", id }))?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: task })))
}

/// 404 unless the owning project exists.
async fn ensure_project_exists(state: &AppState, project_id: DbId) -> AppResult<()> {
    ProjectRepo::find_by_id(&state.pool, project_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: project_id,
        }))?;
    Ok(())
}
