//! Handlers for the `/projects` resource.
//!
//! Reads are public (the marketing site consumes them without a token);
//! every mutation requires manager level or above.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use crestline_core::error::CoreError;
use crestline_core::types::DbId;
use crestline_db::models::project::{CreateProject, Project, ProjectFilters, UpdateProject};
use crestline_db::repositories::ProjectRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireManager;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `DELETE /projects/{id}/images`.
#[derive(Debug, Deserialize)]
pub struct RemoveImageRequest {
    pub url: String,
}

/// GET /api/v1/projects
pub async fn list(
    State(state): State<AppState>,
    Query(filters): Query<ProjectFilters>,
) -> AppResult<Json<DataResponse<Vec<Project>>>> {
    let projects = ProjectRepo::list(&state.pool, &filters).await?;
    Ok(Json(DataResponse { data: projects }))
}

/// GET /api/v1/projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Project>>> {
    let project = ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;
    Ok(Json(DataResponse { data: project }))
}

/// POST /api/v1/projects
pub async fn create(
    State(state): State<AppState>,
    RequireManager(user): RequireManager,
    Json(mut input): Json<CreateProject>,
) -> AppResult<(StatusCode, Json<DataResponse<Project>>)> {
    validate_title(&input.title)?;
    input.progress = input.progress.map(|p| p.clamp(0, 100));

    let project = ProjectRepo::create(&state.pool, &input, user.user_id).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: project })))
}

/// PUT /api/v1/projects/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireManager(user): RequireManager,
    Path(id): Path<DbId>,
    Json(mut input): Json<UpdateProject>,
) -> AppResult<Json<DataResponse<Project>>> {
    if let Some(title) = &input.title {
        validate_title(title)?;
    }
    input.progress = input.progress.map(|p| p.clamp(0, 100));

    let project = ProjectRepo::update(&state.pool, id, &input, user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;
    Ok(Json(DataResponse { data: project }))
}

/// DELETE /api/v1/projects/{id}
///
/// Deletes the project and every task it owns in one transaction. Stored
/// images are removed from the blob store first, best-effort: a failed blob
/// delete is logged and never blocks the row deletion.
pub async fn delete(
    State(state): State<AppState>,
    RequireManager(_): RequireManager,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let project = ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;

    for url in &project.images {
        if let Err(e) = state.storage.delete(url).await {
            tracing::warn!(project_id = id, url = %url, error = %e, "Failed to delete project image blob");
        }
    }

    let deleted = ProjectRepo::delete_with_tasks(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))
    }
}

/// POST /api/v1/projects/{id}/images
///
/// Multipart upload. The first file field is stored in the blob store and
/// its URL appended to the project's ordered image list.
pub async fn upload_image(
    State(state): State<AppState>,
    RequireManager(user): RequireManager,
    Path(id): Path<DbId>,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<DataResponse<Project>>)> {
    let (file_name, bytes) = read_upload(&mut multipart).await?;
    let path_hint = format!(
        "projects/{id}/{}_{}",
        chrono::Utc::now().timestamp(),
        sanitize_filename(&file_name)
    );

    let url = state.storage.put(bytes, &path_hint).await?;

    // A missing project must not leave the freshly stored blob behind.
    let Some(project) = ProjectRepo::add_image(&state.pool, id, &url, user.user_id).await? else {
        if let Err(e) = state.storage.delete(&url).await {
            tracing::warn!(project_id = id, url = %url, error = %e, "Failed to delete orphaned upload blob");
        }
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }));
    };

    Ok((StatusCode::CREATED, Json(DataResponse { data: project })))
}

/// DELETE /api/v1/projects/{id}/images
///
/// Remove an image URL from the project, then best-effort delete the blob.
pub async fn remove_image(
    State(state): State<AppState>,
    RequireManager(user): RequireManager,
    Path(id): Path<DbId>,
    Json(input): Json<RemoveImageRequest>,
) -> AppResult<Json<DataResponse<Project>>> {
    let project = ProjectRepo::remove_image(&state.pool, id, &input.url, user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;

    if let Err(e) = state.storage.delete(&input.url).await {
        tracing::warn!(project_id = id, url = %input.url, error = %e, "Failed to delete project image blob");
    }

    Ok(Json(DataResponse { data: project }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn validate_title(title: &str) -> AppResult<()> {
    if title.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "title must not be empty".into(),
        )));
    }
    Ok(())
}

/// Pull the first file field out of a multipart body.
pub(crate) async fn read_upload(multipart: &mut Multipart) -> AppResult<(String, Vec<u8>)> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {e}")))?
    {
        let Some(file_name) = field.file_name().map(str::to_string) else {
            continue;
        };
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("Failed to read upload: {e}")))?;
        if bytes.is_empty() {
            return Err(AppError::BadRequest("Uploaded file is empty".into()));
        }
        return Ok((file_name, bytes.to_vec()));
    }
    Err(AppError::BadRequest(
        "Multipart body contains no file field".into(),
    ))
}

/// Keep only characters safe for blob paths; everything else becomes `_`.
pub(crate) fn sanitize_filename(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.is_empty() {
        "upload".to_string()
    } else {
        cleaned
    }
}
