//! Status and priority columns
//!
//! These are stored as plain text in Postgres. Decoding into enums means a
//! row with an unknown value fails at the store boundary instead of leaking
//! into the GraphQL layer.

use serde::{Deserialize, Serialize};

/// Task workflow status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Todo,
    InProgress,
    Review,
    Completed,
}

/// Priority shared by projects and tasks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

/// Project lifecycle status, stored in title case
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text")]
pub enum ProjectStatus {
    #[default]
    #[sqlx(rename = "Not Started")]
    #[serde(rename = "Not Started")]
    NotStarted,
    #[sqlx(rename = "In Progress")]
    #[serde(rename = "In Progress")]
    InProgress,
    #[sqlx(rename = "Completed")]
    #[serde(rename = "Completed")]
    Completed,
    #[sqlx(rename = "On Hold")]
    #[serde(rename = "On Hold")]
    OnHold,
}

impl TaskStatus {
    /// Column value as stored in the `tasks` table
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "in_progress",
            Self::Review => "review",
            Self::Completed => "completed",
        }
    }
}

impl Priority {
    /// Column value as stored in the `projects` and `tasks` tables
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl ProjectStatus {
    /// Column value as stored in the `projects` table
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotStarted => "Not Started",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
            Self::OnHold => "On Hold",
        }
    }
}
