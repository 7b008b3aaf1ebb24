//! Pillar model
//!
//! Pillars are the top level of a user's hierarchy (e.g. "Health", "Career").

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// Pillar record from the pillars table
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Pillar {
    /// Unique pillar identifier
    pub id: Uuid,

    /// Owning user
    pub user_id: Uuid,

    /// Display name
    pub name: String,

    /// Free-form description
    pub description: Option<String>,

    /// Emoji or icon name
    pub icon: Option<String>,

    /// Hex color
    pub color: Option<String>,

    /// Position among the user's pillars
    pub sort_order: i32,

    /// Hidden from default listings
    pub archived: bool,

    /// Share of the user's time intended for this pillar
    pub time_allocation_percentage: Option<f64>,

    /// Long-term vision
    pub vision_statement: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
