//! Project GraphQL type

use async_graphql::{Context, Object, Result};
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::graphql::loaders::Loaders;
use crate::models::Project as DbProject;

use super::area::Area;
use super::enums::{Priority, ProjectStatus};
use super::task::Task;

/// Project exposed via GraphQL
pub struct Project {
    inner: DbProject,
}

impl Project {
    /// Create a new GraphQL Project from a database Project
    pub fn new(project: DbProject) -> Self {
        Self { inner: project }
    }
}

impl From<DbProject> for Project {
    fn from(project: DbProject) -> Self {
        Self::new(project)
    }
}

#[Object]
impl Project {
    /// Unique project identifier
    async fn id(&self) -> Uuid {
        self.inner.id
    }

    /// Parent area ID
    async fn area_id(&self) -> Uuid {
        self.inner.area_id
    }

    async fn name(&self) -> &str {
        &self.inner.name
    }

    async fn description(&self) -> Option<&str> {
        self.inner.description.as_deref()
    }

    async fn icon(&self) -> Option<&str> {
        self.inner.icon.as_deref()
    }

    /// Target completion date
    async fn deadline(&self) -> Option<DateTime<Utc>> {
        self.inner.deadline
    }

    async fn status(&self) -> ProjectStatus {
        self.inner.status.into()
    }

    async fn priority(&self) -> Priority {
        self.inner.priority.into()
    }

    /// Importance on a 1-5 scale
    async fn importance(&self) -> i32 {
        self.inner.importance
    }

    /// Share of tasks completed, 0-100
    async fn completion_percentage(&self) -> f64 {
        self.inner.completion_percentage
    }

    async fn archived(&self) -> bool {
        self.inner.archived
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

    /// Parent area (batched across sibling projects)
    async fn area(&self, ctx: &Context<'_>) -> Result<Option<Area>> {
        let loaders = ctx.data::<Loaders>()?;
        let area = loaders.area.load(self.inner.area_id).await?;
        Ok(area.map(Area::from))
    }

    /// Tasks in this project, in display order
    ///
    /// Subtasks are included alongside top-level tasks; use `Task.subtasks`
    /// to walk the nesting.
    async fn tasks(&self, ctx: &Context<'_>) -> Result<Option<Vec<Task>>> {
        let loaders = ctx.data::<Loaders>()?;
        let tasks = loaders.tasks_by_project.load(self.inner.id).await?;
        Ok(Some(tasks.into_iter().map(Task::from).collect()))
    }
}
