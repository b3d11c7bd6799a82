//! Repository for the `projects` table.

use crestline_core::types::DbId;
use sqlx::PgPool;

use crate::models::project::{CreateProject, Project, ProjectFilters, UpdateProject};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, description, location, category, status, area, square_feet, \
                       timeline, images, progress, percentage, created_at, updated_at, \
                       created_by, updated_by";

/// Provides CRUD operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project, returning the created row.
    ///
    /// `progress` and `square_feet` default to 0 and `images` to empty when
    /// omitted; `percentage` is always written equal to `progress`.
    pub async fn create(
        pool: &PgPool,
        input: &CreateProject,
        user_id: DbId,
    ) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects
                 (title, description, location, category, status, area, square_feet,
                  timeline, images, progress, percentage, created_by, updated_by)
             VALUES ($1, $2, $3, $4, $5, $6, COALESCE($7, 0), $8,
                     COALESCE($9, ARRAY[]::TEXT[]), COALESCE($10, 0), COALESCE($10, 0), $11, $11)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.location)
            .bind(&input.category)
            .bind(input.status)
            .bind(&input.area)
            .bind(input.square_feet)
            .bind(&input.timeline)
            .bind(&input.images)
            .bind(input.progress)
            .bind(user_id)
            .fetch_one(pool)
            .await
    }

    /// Find a project by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List projects ordered by most recently created first, with optional
    /// status and category filters.
    pub async fn list(pool: &PgPool, filters: &ProjectFilters) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects
             WHERE ($1::project_status IS NULL OR status = $1)
               AND ($2::TEXT IS NULL OR category = $2)
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(filters.status)
            .bind(&filters.category)
            .fetch_all(pool)
            .await
    }

    /// Update a project. Only non-`None` fields in `input` are applied.
    ///
    /// When `progress` is present, `percentage` is forced to the same value
    /// in the same statement. Returns `None` if no row with `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProject,
        user_id: DbId,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                location = COALESCE($4, location),
                category = COALESCE($5, category),
                status = COALESCE($6, status),
                area = COALESCE($7, area),
                square_feet = COALESCE($8, square_feet),
                timeline = COALESCE($9, timeline),
                images = COALESCE($10, images),
                progress = COALESCE($11, progress),
                percentage = COALESCE($11, percentage),
                updated_at = NOW(),
                updated_by = $12
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.location)
            .bind(&input.category)
            .bind(input.status)
            .bind(&input.area)
            .bind(input.square_feet)
            .bind(&input.timeline)
            .bind(&input.images)
            .bind(input.progress)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a project and every task it owns, in one transaction.
    ///
    /// Blob cleanup for the project's images happens in the API layer before
    /// this is called (best-effort, outside the transaction). Returns `true`
    /// if the project row was removed.
    pub async fn delete_with_tasks(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM tasks WHERE project_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }

    /// Append an image URL to the project's ordered `images` list.
    pub async fn add_image(
        pool: &PgPool,
        id: DbId,
        url: &str,
        user_id: DbId,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects
             SET images = array_append(images, $2), updated_at = NOW(), updated_by = $3
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(url)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Remove an image URL from the project's `images` list.
    pub async fn remove_image(
        pool: &PgPool,
        id: DbId,
        url: &str,
        user_id: DbId,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects
             SET images = array_remove(images, $2), updated_at = NOW(), updated_by = $3
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(url)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }
}
