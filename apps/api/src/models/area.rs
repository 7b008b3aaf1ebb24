//! Area model

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// Area record from the areas table
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Area {
    /// Unique area identifier
    pub id: Uuid,

    /// Owning user
    pub user_id: Uuid,

    /// Parent pillar. Areas may exist outside any pillar.
    pub pillar_id: Option<Uuid>,

    /// Display name
    pub name: String,

    /// Free-form description
    pub description: Option<String>,

    /// Emoji or icon name
    pub icon: Option<String>,

    /// Hex color
    pub color: Option<String>,

    /// Importance on a 1-5 scale
    pub importance: i32,

    /// Hidden from default listings and relationship fields
    pub archived: bool,

    /// Position among sibling areas
    pub sort_order: i32,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
