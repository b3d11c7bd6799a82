//! Achievement entity model and DTOs.

use crestline_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// An achievement row from the `achievements` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Achievement {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub image_url: String,
    /// Free-form display date ("March 2025", "2024-11-02").
    pub date: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub created_by: Option<DbId>,
    pub updated_by: Option<DbId>,
}

/// DTO for creating a new achievement.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAchievement {
    pub title: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub date: Option<String>,
}

/// DTO for updating an existing achievement. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateAchievement {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub date: Option<String>,
}
