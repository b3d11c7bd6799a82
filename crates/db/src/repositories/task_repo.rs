//! Repository for the `tasks` table.
//!
//! Tasks are always addressed through their owning project so a stale task
//! id cannot cross project boundaries.

use crestline_core::status::TaskStatus;
use crestline_core::types::DbId;
use sqlx::PgPool;

use crate::models::task::{CreateTask, Task, UpdateTask};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, project_id, title, description, status, priority, assigned_to, \
                       notes, completed_at, created_at, updated_at, created_by";

/// Provides CRUD operations for project tasks.
pub struct TaskRepo;

impl TaskRepo {
    /// Insert a new task under a project, returning the created row.
    ///
    /// Status defaults to `pending` and priority to `medium` when omitted.
    pub async fn create(
        pool: &PgPool,
        project_id: DbId,
        input: &CreateTask,
        user_id: DbId,
    ) -> Result<Task, sqlx::Error> {
        let query = format!(
            "INSERT INTO tasks (project_id, title, description, status, priority, assigned_to, created_by)
             VALUES ($1, $2, $3, COALESCE($4, 'pending'::task_status),
                     COALESCE($5, 'medium'::task_priority), $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(project_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.status)
            .bind(input.priority)
            .bind(input.assigned_to)
            .bind(user_id)
            .fetch_one(pool)
            .await
    }

    /// Find a task by ID within its owning project.
    pub async fn find_by_id(
        pool: &PgPool,
        project_id: DbId,
        task_id: DbId,
    ) -> Result<Option<Task>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tasks WHERE id = $1 AND project_id = $2");
        sqlx::query_as::<_, Task>(&query)
            .bind(task_id)
            .bind(project_id)
            .fetch_optional(pool)
            .await
    }

    /// List a project's tasks, most recently created first.
    pub async fn list_for_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<Task>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM tasks WHERE project_id = $1 ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// List only the statuses of a project's tasks (dashboard aggregation).
    pub async fn list_statuses_for_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<TaskStatus>, sqlx::Error> {
        sqlx::query_scalar::<_, TaskStatus>("SELECT status FROM tasks WHERE project_id = $1")
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Update a task. Only non-`None` fields in `input` are applied.
    ///
    /// `completed_at` is stamped on the write that first moves the status to
    /// `completed` and is never cleared or overwritten afterwards, even when
    /// the status later moves away from completed.
    pub async fn update(
        pool: &PgPool,
        project_id: DbId,
        task_id: DbId,
        input: &UpdateTask,
    ) -> Result<Option<Task>, sqlx::Error> {
        let query = format!(
            "UPDATE tasks SET
                title = COALESCE($3, title),
                description = COALESCE($4, description),
                status = COALESCE($5, status),
                priority = COALESCE($6, priority),
                assigned_to = COALESCE($7, assigned_to),
                completed_at = CASE
                    WHEN COALESCE($5, status) = 'completed'::task_status AND completed_at IS NULL
                    THEN NOW()
                    ELSE completed_at
                END,
                updated_at = NOW()
             WHERE id = $2 AND project_id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(project_id)
            .bind(task_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.status)
            .bind(input.priority)
            .bind(input.assigned_to)
            .fetch_optional(pool)
            .await
    }

    /// Delete a task. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, project_id: DbId, task_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1 AND project_id = $2")
            .bind(task_id)
            .bind(project_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Append a note to the task's notes list.
    ///
    /// The append is a single atomic JSONB `||`, so concurrent note writes
    /// cannot lose each other and a single call never partially applies.
    pub async fn add_note(
        pool: &PgPool,
        project_id: DbId,
        task_id: DbId,
        content: &str,
        user_id: DbId,
    ) -> Result<Option<Task>, sqlx::Error> {
        let query = format!(
            "UPDATE tasks SET
                notes = notes || jsonb_build_object(
                    'content', $3::TEXT,
                    'created_at', NOW(),
                    'created_by', $4::BIGINT
                ),
                updated_at = NOW()
             WHERE id = $2 AND project_id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(project_id)
            .bind(task_id)
            .bind(content)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }
}
