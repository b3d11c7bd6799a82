//! Task entity model and DTOs. Tasks are owned by exactly one project.

use crestline_core::status::{TaskPriority, TaskStatus};
use crestline_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

/// A single entry in a task's append-only notes list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskNote {
    pub content: String,
    pub created_at: Timestamp,
    pub created_by: DbId,
}

/// A task row from the `tasks` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Task {
    pub id: DbId,
    pub project_id: DbId,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub assigned_to: Option<DbId>,
    pub notes: Json<Vec<TaskNote>>,
    /// Stamped on the first transition to `completed`; never cleared by a
    /// later status change away from completed.
    pub completed_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub created_by: DbId,
}

/// DTO for creating a new task. Status defaults to `pending`, priority to
/// `medium`, notes to empty.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTask {
    pub title: String,
    pub description: String,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    pub assigned_to: Option<DbId>,
}

/// DTO for updating an existing task. All fields are optional; notes are
/// append-only through `add_note` and have no field here.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTask {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    pub assigned_to: Option<DbId>,
}
