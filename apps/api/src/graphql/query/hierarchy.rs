//! Hierarchy queries for the Aurum GraphQL API
//!
//! Root entry points into Pillar → Area → Project → Task. Everything below
//! the roots is resolved through the request's batch loaders.

use async_graphql::{Context, Object, Result};
use uuid::Uuid;

use crate::graphql::pagination::PaginationInput;
use crate::graphql::{require_viewer, to_graphql_error};
use crate::graphql::types::{
    Area, Pillar, Project, ProjectConnection, ProjectFilterInput, Task, TaskConnection,
    TaskFilterInput,
};
use crate::repositories::{ProjectFilter, SharedStore, TaskFilter};

/// Queries over the viewer's own hierarchy
#[derive(Default)]
pub struct HierarchyQuery;

#[Object]
impl HierarchyQuery {
    // ==================== Pillar Queries ====================

    /// The viewer's pillars, in display order
    async fn pillars(
        &self,
        ctx: &Context<'_>,
        #[graphql(default = false)] archived: bool,
    ) -> Result<Vec<Pillar>> {
        let viewer = require_viewer(ctx)?;
        let store = ctx.data::<SharedStore>()?;
        let pillars = store
            .pillars_for_user(viewer.user_id, archived)
            .await
            .map_err(to_graphql_error)?;
        Ok(pillars.into_iter().map(Pillar::from).collect())
    }

    // ==================== Area Queries ====================

    /// The viewer's areas, optionally restricted to one pillar
    async fn areas(
        &self,
        ctx: &Context<'_>,
        pillar_id: Option<Uuid>,
        #[graphql(default = false)] archived: bool,
    ) -> Result<Vec<Area>> {
        let viewer = require_viewer(ctx)?;
        let store = ctx.data::<SharedStore>()?;
        let areas = store
            .areas_for_user(viewer.user_id, pillar_id, archived)
            .await
            .map_err(to_graphql_error)?;
        Ok(areas.into_iter().map(Area::from).collect())
    }

    // ==================== Project Queries ====================

    /// Get a project by ID
    async fn project(&self, ctx: &Context<'_>, id: Uuid) -> Result<Option<Project>> {
        let viewer = require_viewer(ctx)?;
        let store = ctx.data::<SharedStore>()?;
        let project = store
            .project_for_user(viewer.user_id, id)
            .await
            .map_err(to_graphql_error)?;
        Ok(project.map(Project::from))
    }

    /// List the viewer's projects, newest first
    async fn projects(
        &self,
        ctx: &Context<'_>,
        #[graphql(default)] filter: ProjectFilterInput,
        #[graphql(default)] pagination: PaginationInput,
    ) -> Result<ProjectConnection> {
        let viewer = require_viewer(ctx)?;
        let store = ctx.data::<SharedStore>()?;
        let page = pagination.to_page();
        let filter = ProjectFilter::from(filter);
        let paged = store
            .projects_for_user(viewer.user_id, &filter, page)
            .await
            .map_err(to_graphql_error)?;
        Ok(ProjectConnection::new(paged, page))
    }

    // ==================== Task Queries ====================

    /// Get a task by ID
    async fn task(&self, ctx: &Context<'_>, id: Uuid) -> Result<Option<Task>> {
        let viewer = require_viewer(ctx)?;
        let store = ctx.data::<SharedStore>()?;
        let task = store
            .task_for_user(viewer.user_id, id)
            .await
            .map_err(to_graphql_error)?;
        Ok(task.map(Task::from))
    }

    /// List the viewer's tasks, newest first
    async fn tasks(
        &self,
        ctx: &Context<'_>,
        #[graphql(default)] filter: TaskFilterInput,
        #[graphql(default)] pagination: PaginationInput,
    ) -> Result<TaskConnection> {
        let viewer = require_viewer(ctx)?;
        let store = ctx.data::<SharedStore>()?;
        let page = pagination.to_page();
        let filter = TaskFilter::from(filter);
        let paged = store
            .tasks_for_user(viewer.user_id, &filter, page)
            .await
            .map_err(to_graphql_error)?;
        Ok(TaskConnection::new(paged, page))
    }
}
