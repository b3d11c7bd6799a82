//! Handlers for the `/admin/users` resource (admin-only user management).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use crestline_core::error::CoreError;
use crestline_core::roles::Role;
use crestline_core::types::DbId;
use crestline_db::models::user::{CreateUser, UpdateUser, UserResponse};
use crestline_db::repositories::UserRepo;
use serde::Deserialize;
use validator::Validate;

use crate::auth::password::{hash_password, validate_password_strength, MIN_PASSWORD_LENGTH};
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /admin/users`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    #[validate(length(min = 1, max = 100, message = "display_name is required"))]
    pub display_name: String,
    pub password: String,
    pub role: Role,
}

/// GET /api/v1/admin/users
pub async fn list_users(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
) -> AppResult<Json<DataResponse<Vec<UserResponse>>>> {
    let users = UserRepo::list(&state.pool).await?;
    let data = users.into_iter().map(|u| u.into_response()).collect();
    Ok(Json(DataResponse { data }))
}

/// POST /api/v1/admin/users
pub async fn create_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(input): Json<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<UserResponse>>)> {
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;
    validate_password_strength(&input.password, MIN_PASSWORD_LENGTH)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            email: input.email,
            display_name: input.display_name,
            password_hash,
            role: input.role,
        },
    )
    .await?;

    tracing::info!(
        user_id = user.id,
        created_by = admin.user_id,
        role = %user.role,
        "Admin created user account"
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: user.into_response(),
        }),
    ))
}

/// PUT /api/v1/admin/users/{id}
///
/// Update display name, role, or active flag. Role changes take effect on
/// the target's next token issuance; outstanding access tokens keep the old
/// role until they expire.
pub async fn update_user(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateUser>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    let user = UserRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;
    Ok(Json(DataResponse {
        data: user.into_response(),
    }))
}
