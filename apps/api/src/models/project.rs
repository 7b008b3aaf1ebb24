//! Project model

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use super::enums::{Priority, ProjectStatus};

/// Project record from the projects table
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Project {
    /// Unique project identifier
    pub id: Uuid,

    /// Owning user
    pub user_id: Uuid,

    /// Parent area
    pub area_id: Uuid,

    /// Display name
    pub name: String,

    /// Free-form description
    pub description: Option<String>,

    /// Emoji or icon name
    pub icon: Option<String>,

    /// Target completion date
    pub deadline: Option<DateTime<Utc>>,

    /// Lifecycle status
    pub status: ProjectStatus,

    /// Priority
    pub priority: Priority,

    /// Importance on a 1-5 scale
    pub importance: i32,

    /// Completion in percent (0-100)
    pub completion_percentage: f64,

    /// Hidden from default listings and relationship fields
    pub archived: bool,

    /// Position among sibling projects
    pub sort_order: i32,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
