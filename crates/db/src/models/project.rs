//! Project entity model and DTOs.

use crestline_core::status::ProjectStatus;
use crestline_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A project row from the `projects` table.
///
/// `percentage` mirrors `progress` after every write that touches progress;
/// it is a legacy duplicate kept for compatibility with previously exported
/// data and is never settable independently.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub location: String,
    pub category: String,
    pub status: ProjectStatus,
    /// Display string, e.g. "2,500 sq ft".
    pub area: String,
    pub square_feet: i32,
    /// Display string, e.g. "Jan 2026 - Dec 2026".
    pub timeline: String,
    /// Ordered blob-store URLs.
    pub images: Vec<String>,
    pub progress: i32,
    pub percentage: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub created_by: DbId,
    pub updated_by: DbId,
}

/// DTO for creating a new project. `progress` defaults to 0, `images` to
/// empty; `percentage` is derived, never accepted.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProject {
    pub title: String,
    pub description: String,
    pub location: String,
    pub category: String,
    pub status: ProjectStatus,
    pub area: String,
    pub square_feet: Option<i32>,
    pub timeline: String,
    pub images: Option<Vec<String>>,
    pub progress: Option<i32>,
}

/// DTO for updating an existing project. All fields are optional;
/// `percentage` intentionally has no field.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProject {
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub category: Option<String>,
    pub status: Option<ProjectStatus>,
    pub area: Option<String>,
    pub square_feet: Option<i32>,
    pub timeline: Option<String>,
    pub images: Option<Vec<String>>,
    pub progress: Option<i32>,
}

/// Optional list filters for `GET /projects`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectFilters {
    pub status: Option<ProjectStatus>,
    pub category: Option<String>,
}
