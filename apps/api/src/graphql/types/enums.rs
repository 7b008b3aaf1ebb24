//! Status and priority enums for GraphQL

use async_graphql::Enum;

use crate::models::{
    Priority as DbPriority, ProjectStatus as DbProjectStatus, TaskStatus as DbTaskStatus,
};

/// Task workflow status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Enum)]
pub enum TaskStatus {
    /// Not started
    Todo,
    /// Being worked on
    InProgress,
    /// Waiting for review
    Review,
    /// Done
    Completed,
}

impl From<DbTaskStatus> for TaskStatus {
    fn from(status: DbTaskStatus) -> Self {
        match status {
            DbTaskStatus::Todo => Self::Todo,
            DbTaskStatus::InProgress => Self::InProgress,
            DbTaskStatus::Review => Self::Review,
            DbTaskStatus::Completed => Self::Completed,
        }
    }
}

impl From<TaskStatus> for DbTaskStatus {
    fn from(status: TaskStatus) -> Self {
        match status {
            TaskStatus::Todo => Self::Todo,
            TaskStatus::InProgress => Self::InProgress,
            TaskStatus::Review => Self::Review,
            TaskStatus::Completed => Self::Completed,
        }
    }
}

/// Priority of a project or task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Enum)]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl From<DbPriority> for Priority {
    fn from(priority: DbPriority) -> Self {
        match priority {
            DbPriority::Low => Self::Low,
            DbPriority::Medium => Self::Medium,
            DbPriority::High => Self::High,
        }
    }
}

impl From<Priority> for DbPriority {
    fn from(priority: Priority) -> Self {
        match priority {
            Priority::Low => Self::Low,
            Priority::Medium => Self::Medium,
            Priority::High => Self::High,
        }
    }
}

/// Project lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Enum)]
pub enum ProjectStatus {
    /// Planned but not started
    NotStarted,
    /// Active
    InProgress,
    /// Finished
    Completed,
    /// Paused
    OnHold,
}

impl From<DbProjectStatus> for ProjectStatus {
    fn from(status: DbProjectStatus) -> Self {
        match status {
            DbProjectStatus::NotStarted => Self::NotStarted,
            DbProjectStatus::InProgress => Self::InProgress,
            DbProjectStatus::Completed => Self::Completed,
            DbProjectStatus::OnHold => Self::OnHold,
        }
    }
}

impl From<ProjectStatus> for DbProjectStatus {
    fn from(status: ProjectStatus) -> Self {
        match status {
            ProjectStatus::NotStarted => Self::NotStarted,
            ProjectStatus::InProgress => Self::InProgress,
            ProjectStatus::Completed => Self::Completed,
            ProjectStatus::OnHold => Self::OnHold,
        }
    }
}
