//! Write payloads for tasks and projects
//!
//! `New*` structs carry every column a caller may set on insert; the rest
//! take their initial values in the store (open status, not completed,
//! appended after existing siblings). `*Changes` structs are partial
//! updates: `None` leaves the column as it is.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::{Priority, ProjectStatus, TaskStatus};

/// A task to insert under a project
#[derive(Debug, Clone, PartialEq)]
pub struct NewTask {
    pub project_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub priority: Priority,
    pub due_date: Option<DateTime<Utc>>,
    /// Minutes
    pub estimated_duration: Option<i32>,
}

/// Partial update of a task
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    pub priority: Option<Priority>,
    pub due_date: Option<DateTime<Utc>>,
    /// Setting `true` stamps `completed_at`, `false` clears it
    pub completed: Option<bool>,
}

impl TaskChanges {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// A project to insert under an area
#[derive(Debug, Clone, PartialEq)]
pub struct NewProject {
    pub area_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub deadline: Option<DateTime<Utc>>,
    pub priority: Priority,
    /// 1-5
    pub importance: i32,
}

/// Partial update of a project
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<ProjectStatus>,
    pub priority: Option<Priority>,
    pub deadline: Option<DateTime<Utc>>,
    /// 0-100
    pub completion_percentage: Option<f64>,
}

impl ProjectChanges {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_changes() {
        assert!(TaskChanges::default().is_empty());
        assert!(!TaskChanges {
            completed: Some(false),
            ..Default::default()
        }
        .is_empty());
        assert!(!ProjectChanges {
            completion_percentage: Some(0.0),
            ..Default::default()
        }
        .is_empty());
    }
}
