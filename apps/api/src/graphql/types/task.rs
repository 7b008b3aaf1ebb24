//! Task GraphQL type

use async_graphql::{Context, Object, Result};
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::graphql::loaders::Loaders;
use crate::models::Task as DbTask;

use super::enums::{Priority, TaskStatus};
use super::project::Project;

/// Task exposed via GraphQL
pub struct Task {
    inner: DbTask,
}

impl Task {
    /// Create a new GraphQL Task from a database Task
    pub fn new(task: DbTask) -> Self {
        Self { inner: task }
    }
}

impl From<DbTask> for Task {
    fn from(task: DbTask) -> Self {
        Self::new(task)
    }
}

#[Object]
impl Task {
    /// Unique task identifier
    async fn id(&self) -> Uuid {
        self.inner.id
    }

    /// Parent project ID
    async fn project_id(&self) -> Uuid {
        self.inner.project_id
    }

    /// Parent task ID for subtasks
    async fn parent_task_id(&self) -> Option<Uuid> {
        self.inner.parent_task_id
    }

    async fn name(&self) -> &str {
        &self.inner.name
    }

    async fn description(&self) -> Option<&str> {
        self.inner.description.as_deref()
    }

    async fn status(&self) -> TaskStatus {
        self.inner.status.into()
    }

    async fn priority(&self) -> Priority {
        self.inner.priority.into()
    }

    async fn due_date(&self) -> Option<DateTime<Utc>> {
        self.inner.due_date
    }

    async fn reminder_date(&self) -> Option<DateTime<Utc>> {
        self.inner.reminder_date
    }

    async fn completed(&self) -> bool {
        self.inner.completed
    }

    async fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.inner.completed_at
    }

    /// Estimated duration in minutes
    async fn estimated_duration(&self) -> Option<i32> {
        self.inner.estimated_duration
    }

    /// Open and past its due date
    async fn is_overdue(&self) -> bool {
        self.inner.is_overdue(Utc::now())
    }

    async fn sort_order(&self) -> i32 {
        self.inner.sort_order
    }

    async fn created_at(&self) -> DateTime<Utc> {
        self.inner.created_at
    }

    async fn updated_at(&self) -> DateTime<Utc> {
        self.inner.updated_at
    }

    // Relationship resolvers

    /// Parent project (batched across sibling tasks)
    async fn project(&self, ctx: &Context<'_>) -> Result<Option<Project>> {
        let loaders = ctx.data::<Loaders>()?;
        let project = loaders.project.load(self.inner.project_id).await?;
        Ok(project.map(Project::from))
    }

    /// Direct subtasks, in display order
    async fn subtasks(&self, ctx: &Context<'_>) -> Result<Option<Vec<Task>>> {
        let loaders = ctx.data::<Loaders>()?;
        let subtasks = loaders.subtasks_by_task.load(self.inner.id).await?;
        Ok(Some(subtasks.into_iter().map(Task::from).collect()))
    }
}
