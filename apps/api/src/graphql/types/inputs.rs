//! Filter arguments for list queries

use async_graphql::InputObject;
use uuid::Uuid;

use crate::repositories::{ProjectFilter, TaskFilter};

use super::enums::{Priority, ProjectStatus, TaskStatus};

/// Project list filter; unset fields do not constrain the result
#[derive(Debug, Clone, Default, InputObject)]
pub struct ProjectFilterInput {
    pub status: Option<ProjectStatus>,
    pub priority: Option<Priority>,
    pub area_id: Option<Uuid>,
    /// Archived projects are hidden unless asked for
    #[graphql(default = false)]
    pub archived: bool,
}

impl From<ProjectFilterInput> for ProjectFilter {
    fn from(input: ProjectFilterInput) -> Self {
        Self {
            status: input.status.map(Into::into),
            priority: input.priority.map(Into::into),
            area_id: input.area_id,
            archived: Some(input.archived),
        }
    }
}

/// Task list filter; unset fields do not constrain the result
#[derive(Debug, Clone, Default, InputObject)]
pub struct TaskFilterInput {
    pub status: Option<TaskStatus>,
    pub priority: Option<Priority>,
    pub project_id: Option<Uuid>,
    pub completed: Option<bool>,
    pub has_due_date: Option<bool>,
}

impl From<TaskFilterInput> for TaskFilter {
    fn from(input: TaskFilterInput) -> Self {
        Self {
            status: input.status.map(Into::into),
            priority: input.priority.map(Into::into),
            project_id: input.project_id,
            completed: input.completed,
            has_due_date: input.has_due_date,
        }
    }
}
