//! Handlers for the `/achievements` resource.
//!
//! Reads are public; mutations require manager level or above.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use crestline_core::error::CoreError;
use crestline_core::types::DbId;
use crestline_db::models::achievement::{
    Achievement, CreateAchievement, UpdateAchievement,
};
use crestline_db::repositories::AchievementRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::project::{read_upload, sanitize_filename};
use crate::middleware::rbac::RequireManager;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/achievements
pub async fn list(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Achievement>>>> {
    let achievements = AchievementRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: achievements }))
}

/// GET /api/v1/achievements/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Achievement>>> {
    let achievement = AchievementRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Achievement",
            id,
        }))?;
    Ok(Json(DataResponse { data: achievement }))
}

/// POST /api/v1/achievements
pub async fn create(
    State(state): State<AppState>,
    RequireManager(user): RequireManager,
    Json(input): Json<CreateAchievement>,
) -> AppResult<(StatusCode, Json<DataResponse<Achievement>>)> {
    if input.title.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "title must not be empty".into(),
        )));
    }
    let achievement = AchievementRepo::create(&state.pool, &input, user.user_id).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: achievement })))
}

/// PUT /api/v1/achievements/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireManager(user): RequireManager,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateAchievement>,
) -> AppResult<Json<DataResponse<Achievement>>> {
    let achievement = AchievementRepo::update(&state.pool, id, &input, user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Achievement",
            id,
        }))?;
    Ok(Json(DataResponse { data: achievement }))
}

/// DELETE /api/v1/achievements/{id}
///
/// Best-effort deletes the stored image blob before removing the row.
pub async fn delete(
    State(state): State<AppState>,
    RequireManager(_): RequireManager,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let achievement = AchievementRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Achievement",
            id,
        }))?;

    if !achievement.image_url.is_empty() {
        if let Err(e) = state.storage.delete(&achievement.image_url).await {
            tracing::warn!(achievement_id = id, error = %e, "Failed to delete achievement image blob");
        }
    }

    let deleted = AchievementRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Achievement",
            id,
        }))
    }
}

/// POST /api/v1/achievements/{id}/image
///
/// Multipart upload replacing the achievement's image. The previous blob,
/// if any, is deleted best-effort after the row is updated.
pub async fn upload_image(
    State(state): State<AppState>,
    RequireManager(user): RequireManager,
    Path(id): Path<DbId>,
    mut multipart: Multipart,
) -> AppResult<Json<DataResponse<Achievement>>> {
    let existing = AchievementRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Achievement",
            id,
        }))?;

    let (file_name, bytes) = read_upload(&mut multipart).await?;
    let path_hint = format!(
        "achievements/{id}/{}_{}",
        chrono::Utc::now().timestamp(),
        sanitize_filename(&file_name)
    );

    let url = state.storage.put(bytes, &path_hint).await?;

    let updated = AchievementRepo::update(
        &state.pool,
        id,
        &UpdateAchievement {
            image_url: Some(url.clone()),
            ..Default::default()
        },
        user.user_id,
    )
    .await?;
    // A row deleted between the lookup and the update must not leave the
    // freshly stored blob behind.
    let Some(achievement) = updated else {
        if let Err(e) = state.storage.delete(&url).await {
            tracing::warn!(achievement_id = id, url = %url, error = %e, "Failed to delete orphaned upload blob");
        }
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Achievement",
            id,
        }));
    };

    if !existing.image_url.is_empty() {
        if let Err(e) = state.storage.delete(&existing.image_url).await {
            tracing::warn!(achievement_id = id, error = %e, "Failed to delete replaced achievement image");
        }
    }

    Ok(Json(DataResponse { data: achievement }))
}
