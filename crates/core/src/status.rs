//! Project and task status enums mapping to Postgres enum types.
//!
//! There is no enforced transition graph: any status may move to any other
//! through the normal update path. The four project states are peers, not a
//! pipeline. The only one-directional behavior is the `completed_at` stamp
//! on tasks, handled in the repository layer.

use serde::{Deserialize, Serialize};

/// Project lifecycle status (`project_status` Postgres enum).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "kebab-case")]
#[sqlx(type_name = "project_status", rename_all = "kebab-case")]
pub enum ProjectStatus {
    Upcoming,
    Ongoing,
    Completed,
    OnHold,
}

impl ProjectStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ProjectStatus::Upcoming => "upcoming",
            ProjectStatus::Ongoing => "ongoing",
            ProjectStatus::Completed => "completed",
            ProjectStatus::OnHold => "on-hold",
        }
    }
}

/// Task status (`task_status` Postgres enum).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "kebab-case")]
#[sqlx(type_name = "task_status", rename_all = "kebab-case")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
}

/// Task priority (`task_priority` Postgres enum).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "task_priority", rename_all = "lowercase")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
}
