//! Task model
//!
//! Tasks belong to a project and may be nested under another task.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use super::enums::{Priority, TaskStatus};

/// Task record from the tasks table
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Task {
    /// Unique task identifier
    pub id: Uuid,

    /// Owning user
    pub user_id: Uuid,

    /// Parent project
    pub project_id: Uuid,

    /// Parent task for subtasks
    pub parent_task_id: Option<Uuid>,

    /// Display name
    pub name: String,

    /// Free-form description
    pub description: Option<String>,

    /// Workflow status
    pub status: TaskStatus,

    /// Priority
    pub priority: Priority,

    /// When the task is due
    pub due_date: Option<DateTime<Utc>>,

    /// When to remind the user
    pub reminder_date: Option<DateTime<Utc>>,

    /// Completion flag
    pub completed: bool,

    /// When the task was completed
    pub completed_at: Option<DateTime<Utc>>,

    /// Estimated duration in minutes
    pub estimated_duration: Option<i32>,

    /// Position among sibling tasks
    pub sort_order: i32,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Whether the task is past due and still open
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        !self.completed && self.due_date.is_some_and(|due| due < now)
    }
}
