//! The data-store capability consumed by resolvers and batch loaders

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use super::changes::{NewProject, NewTask, ProjectChanges, TaskChanges};
use super::utils::next_offset;
use crate::models::{Area, Pillar, Priority, Project, ProjectStatus, Task, TaskStatus};

/// Errors raised by a [`HierarchyStore`]
#[derive(Error, Debug)]
pub enum StoreError {
    /// Query failed or a row could not be decoded
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Store handle shared by the schema and every request's loaders
pub type SharedStore = Arc<dyn HierarchyStore>;

/// Limit/offset window for list queries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: i64,
    pub offset: i64,
}

impl Page {
    pub fn new(limit: i64, offset: i64) -> Self {
        Self { limit, offset }
    }
}

/// One page of rows plus the total number of matching rows
#[derive(Debug, Clone, PartialEq)]
pub struct Paged<T> {
    pub items: Vec<T>,
    pub total_count: i64,
}

impl<T> Paged<T> {
    /// Whether rows exist beyond `page`
    pub fn has_next_page(&self, page: Page) -> bool {
        next_offset(page.limit, page.offset) < self.total_count
    }
}

/// Optional predicates for project listings
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectFilter {
    pub status: Option<ProjectStatus>,
    pub priority: Option<Priority>,
    pub area_id: Option<Uuid>,
    pub archived: Option<bool>,
}

/// Optional predicates for task listings
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskFilter {
    pub status: Option<TaskStatus>,
    pub priority: Option<Priority>,
    pub project_id: Option<Uuid>,
    pub completed: Option<bool>,
    pub has_due_date: Option<bool>,
}

/// Read access to the Pillar → Area → Project → Task hierarchy
///
/// The batched methods (`*_by_*s`) take a set of distinct keys and must issue
/// a single round trip regardless of how many keys are passed. Child queries
/// return rows ordered by `sort_order`; archived areas and projects are
/// excluded from relationship queries.
///
/// Every user-scoped method matches on `user_id` as well as the row id, so a
/// row owned by someone else behaves exactly like a missing one.
#[async_trait]
pub trait HierarchyStore: Send + Sync {
    /// Cheap connectivity check for readiness
    async fn ping(&self) -> StoreResult<()>;

    // ==================== Root queries (user scoped) ====================

    async fn pillars_for_user(&self, user_id: Uuid, archived: bool) -> StoreResult<Vec<Pillar>>;

    async fn areas_for_user(
        &self,
        user_id: Uuid,
        pillar_id: Option<Uuid>,
        archived: bool,
    ) -> StoreResult<Vec<Area>>;

    /// Newest first
    async fn projects_for_user(
        &self,
        user_id: Uuid,
        filter: &ProjectFilter,
        page: Page,
    ) -> StoreResult<Paged<Project>>;

    /// Newest first
    async fn tasks_for_user(
        &self,
        user_id: Uuid,
        filter: &TaskFilter,
        page: Page,
    ) -> StoreResult<Paged<Task>>;

    async fn project_for_user(&self, user_id: Uuid, id: Uuid) -> StoreResult<Option<Project>>;

    async fn task_for_user(&self, user_id: Uuid, id: Uuid) -> StoreResult<Option<Task>>;

    async fn area_for_user(&self, user_id: Uuid, id: Uuid) -> StoreResult<Option<Area>>;

    /// Every task of the user, archived projects included
    async fn all_tasks_for_user(&self, user_id: Uuid) -> StoreResult<Vec<Task>>;

    /// Every project of the user, archived ones included
    async fn all_projects_for_user(&self, user_id: Uuid) -> StoreResult<Vec<Project>>;

    // ==================== Writes (user scoped) ====================

    /// Insert an open task at the end of its project
    async fn create_task(&self, user_id: Uuid, task: &NewTask) -> StoreResult<Task>;

    /// `None` when no such task belongs to the user
    async fn update_task(
        &self,
        user_id: Uuid,
        id: Uuid,
        changes: &TaskChanges,
    ) -> StoreResult<Option<Task>>;

    /// Flip `completed` in one statement; status moves to `completed` or
    /// back to `todo` with it
    async fn toggle_task_completion(&self, user_id: Uuid, id: Uuid) -> StoreResult<Option<Task>>;

    /// Whether a row was deleted
    async fn delete_task(&self, user_id: Uuid, id: Uuid) -> StoreResult<bool>;

    /// Insert a not-started project at the end of its area
    async fn create_project(&self, user_id: Uuid, project: &NewProject) -> StoreResult<Project>;

    async fn update_project(
        &self,
        user_id: Uuid,
        id: Uuid,
        changes: &ProjectChanges,
    ) -> StoreResult<Option<Project>>;

    // ==================== Batched lookups by id ====================

    async fn pillars_by_ids(&self, ids: &[Uuid]) -> StoreResult<Vec<Pillar>>;

    async fn areas_by_ids(&self, ids: &[Uuid]) -> StoreResult<Vec<Area>>;

    async fn projects_by_ids(&self, ids: &[Uuid]) -> StoreResult<Vec<Project>>;

    // ==================== Batched children by parent ====================

    /// Non-archived areas whose `pillar_id` is in `pillar_ids`
    async fn areas_by_pillars(&self, pillar_ids: &[Uuid]) -> StoreResult<Vec<Area>>;

    /// Non-archived projects whose `area_id` is in `area_ids`
    async fn projects_by_areas(&self, area_ids: &[Uuid]) -> StoreResult<Vec<Project>>;

    /// Tasks whose `project_id` is in `project_ids`
    async fn tasks_by_projects(&self, project_ids: &[Uuid]) -> StoreResult<Vec<Task>>;

    /// Tasks whose `parent_task_id` is in `task_ids`
    async fn subtasks_by_parents(&self, task_ids: &[Uuid]) -> StoreResult<Vec<Task>>;
}
