//! In-memory hierarchy store for integration tests
//!
//! Records every store call with the keys it received and can be told to
//! fail specific methods. Writes mutate the in-memory rows, so a mutation
//! followed by a query sees its effect.

#![allow(dead_code)]

use std::collections::HashSet;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use uuid::Uuid;

use aurum_api::models::{Area, Pillar, Project, ProjectStatus, Task, TaskStatus};
use aurum_api::repositories::{
    HierarchyStore, NewProject, NewTask, Page, Paged, ProjectChanges, ProjectFilter, StoreError,
    StoreResult, TaskChanges, TaskFilter,
};

/// One recorded store call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreCall {
    pub method: &'static str,
    pub keys: Vec<Uuid>,
}

/// Store backed by plain vectors
#[derive(Default)]
pub struct MockHierarchyStore {
    pillars: Vec<Pillar>,
    areas: Vec<Area>,
    projects: Mutex<Vec<Project>>,
    tasks: Mutex<Vec<Task>>,
    calls: Mutex<Vec<StoreCall>>,
    failing: Mutex<HashSet<&'static str>>,
}

impl MockHierarchyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pillars(mut self, pillars: impl IntoIterator<Item = Pillar>) -> Self {
        self.pillars.extend(pillars);
        self
    }

    pub fn with_areas(mut self, areas: impl IntoIterator<Item = Area>) -> Self {
        self.areas.extend(areas);
        self
    }

    pub fn with_projects(mut self, projects: impl IntoIterator<Item = Project>) -> Self {
        self.projects.get_mut().extend(projects);
        self
    }

    pub fn with_tasks(mut self, tasks: impl IntoIterator<Item = Task>) -> Self {
        self.tasks.get_mut().extend(tasks);
        self
    }

    /// Make every subsequent call to `method` fail
    pub fn fail(&self, method: &'static str) {
        self.failing.lock().insert(method);
    }

    /// Undo [`fail`](Self::fail)
    pub fn recover(&self, method: &'static str) {
        self.failing.lock().remove(method);
    }

    /// Current copy of a stored task
    pub fn stored_task(&self, id: Uuid) -> Option<Task> {
        self.tasks.lock().iter().find(|t| t.id == id).cloned()
    }

    /// Current copy of a stored project
    pub fn stored_project(&self, id: Uuid) -> Option<Project> {
        self.projects.lock().iter().find(|p| p.id == id).cloned()
    }

    /// Every call made so far, in order
    pub fn calls(&self) -> Vec<StoreCall> {
        self.calls.lock().clone()
    }

    /// Key sets passed to `method`, one entry per call
    pub fn calls_to(&self, method: &str) -> Vec<Vec<Uuid>> {
        self.calls
            .lock()
            .iter()
            .filter(|call| call.method == method)
            .map(|call| call.keys.clone())
            .collect()
    }

    fn record(&self, method: &'static str, keys: &[Uuid]) -> StoreResult<()> {
        self.calls.lock().push(StoreCall {
            method,
            keys: keys.to_vec(),
        });
        if self.failing.lock().contains(method) {
            return Err(StoreError::Database(sqlx::Error::Protocol(format!(
                "injected failure in {}",
                method
            ))));
        }
        Ok(())
    }
}

fn children<T: Clone>(rows: &[T], keep: impl Fn(&T) -> bool, sort_key: impl Fn(&T) -> i32) -> Vec<T> {
    let mut matched: Vec<T> = rows.iter().filter(|row| keep(row)).cloned().collect();
    matched.sort_by_key(|row| sort_key(row));
    matched
}

fn project_matches(filter: &ProjectFilter, project: &Project) -> bool {
    filter.status.map_or(true, |s| project.status == s)
        && filter.priority.map_or(true, |p| project.priority == p)
        && filter.area_id.map_or(true, |id| project.area_id == id)
        && filter.archived.map_or(true, |a| project.archived == a)
}

fn task_matches(filter: &TaskFilter, task: &Task) -> bool {
    filter.status.map_or(true, |s| task.status == s)
        && filter.priority.map_or(true, |p| task.priority == p)
        && filter.project_id.map_or(true, |id| task.project_id == id)
        && filter.completed.map_or(true, |c| task.completed == c)
        && filter
            .has_due_date
            .map_or(true, |has| task.due_date.is_some() == has)
}

fn next_sort_order(orders: impl Iterator<Item = i32>) -> i32 {
    orders.max().map_or(0, |max| max + 1)
}

fn paginate<T: Clone>(mut rows: Vec<T>, page: Page) -> Paged<T> {
    let total_count = rows.len() as i64;
    let items = rows
        .drain(..)
        .skip(page.offset as usize)
        .take(page.limit as usize)
        .collect();
    Paged { items, total_count }
}

#[async_trait]
impl HierarchyStore for MockHierarchyStore {
    async fn ping(&self) -> StoreResult<()> {
        self.record("ping", &[])
    }

    async fn pillars_for_user(&self, user_id: Uuid, archived: bool) -> StoreResult<Vec<Pillar>> {
        self.record("pillars_for_user", &[user_id])?;
        Ok(children(
            &self.pillars,
            |p| p.user_id == user_id && p.archived == archived,
            |p| p.sort_order,
        ))
    }

    async fn areas_for_user(
        &self,
        user_id: Uuid,
        pillar_id: Option<Uuid>,
        archived: bool,
    ) -> StoreResult<Vec<Area>> {
        self.record("areas_for_user", &[user_id])?;
        Ok(children(
            &self.areas,
            |a| {
                a.user_id == user_id
                    && a.archived == archived
                    && pillar_id.map_or(true, |id| a.pillar_id == Some(id))
            },
            |a| a.sort_order,
        ))
    }

    async fn projects_for_user(
        &self,
        user_id: Uuid,
        filter: &ProjectFilter,
        page: Page,
    ) -> StoreResult<Paged<Project>> {
        self.record("projects_for_user", &[user_id])?;
        let mut rows: Vec<Project> = self
            .projects
            .lock()
            .iter()
            .filter(|p| p.user_id == user_id && project_matches(filter, p))
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(paginate(rows, page))
    }

    async fn tasks_for_user(
        &self,
        user_id: Uuid,
        filter: &TaskFilter,
        page: Page,
    ) -> StoreResult<Paged<Task>> {
        self.record("tasks_for_user", &[user_id])?;
        let mut rows: Vec<Task> = self
            .tasks
            .lock()
            .iter()
            .filter(|t| t.user_id == user_id && task_matches(filter, t))
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(paginate(rows, page))
    }

    async fn project_for_user(&self, user_id: Uuid, id: Uuid) -> StoreResult<Option<Project>> {
        self.record("project_for_user", &[id])?;
        Ok(self
            .projects
            .lock()
            .iter()
            .find(|p| p.id == id && p.user_id == user_id)
            .cloned())
    }

    async fn task_for_user(&self, user_id: Uuid, id: Uuid) -> StoreResult<Option<Task>> {
        self.record("task_for_user", &[id])?;
        Ok(self
            .tasks
            .lock()
            .iter()
            .find(|t| t.id == id && t.user_id == user_id)
            .cloned())
    }

    async fn area_for_user(&self, user_id: Uuid, id: Uuid) -> StoreResult<Option<Area>> {
        self.record("area_for_user", &[id])?;
        Ok(self
            .areas
            .iter()
            .find(|a| a.id == id && a.user_id == user_id)
            .cloned())
    }

    async fn all_tasks_for_user(&self, user_id: Uuid) -> StoreResult<Vec<Task>> {
        self.record("all_tasks_for_user", &[user_id])?;
        let mut rows: Vec<Task> = self
            .tasks
            .lock()
            .iter()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn all_projects_for_user(&self, user_id: Uuid) -> StoreResult<Vec<Project>> {
        self.record("all_projects_for_user", &[user_id])?;
        let mut rows: Vec<Project> = self
            .projects
            .lock()
            .iter()
            .filter(|p| p.user_id == user_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn create_task(&self, user_id: Uuid, new: &NewTask) -> StoreResult<Task> {
        self.record("create_task", &[new.project_id])?;
        let mut tasks = self.tasks.lock();
        let now = Utc::now();
        let task = Task {
            id: Uuid::new_v4(),
            user_id,
            project_id: new.project_id,
            parent_task_id: None,
            name: new.name.clone(),
            description: new.description.clone(),
            status: TaskStatus::Todo,
            priority: new.priority,
            due_date: new.due_date,
            reminder_date: None,
            completed: false,
            completed_at: None,
            estimated_duration: new.estimated_duration,
            sort_order: next_sort_order(
                tasks
                    .iter()
                    .filter(|t| t.project_id == new.project_id)
                    .map(|t| t.sort_order),
            ),
            created_at: now,
            updated_at: now,
        };
        tasks.push(task.clone());
        Ok(task)
    }

    async fn update_task(
        &self,
        user_id: Uuid,
        id: Uuid,
        changes: &TaskChanges,
    ) -> StoreResult<Option<Task>> {
        self.record("update_task", &[id])?;
        let mut tasks = self.tasks.lock();
        let Some(task) = tasks.iter_mut().find(|t| t.id == id && t.user_id == user_id) else {
            return Ok(None);
        };
        if let Some(name) = &changes.name {
            task.name = name.clone();
        }
        if let Some(description) = &changes.description {
            task.description = Some(description.clone());
        }
        if let Some(status) = changes.status {
            task.status = status;
        }
        if let Some(priority) = changes.priority {
            task.priority = priority;
        }
        if let Some(due_date) = changes.due_date {
            task.due_date = Some(due_date);
        }
        if let Some(completed) = changes.completed {
            task.completed = completed;
            task.completed_at = if completed {
                task.completed_at.or(Some(Utc::now()))
            } else {
                None
            };
        }
        task.updated_at = Utc::now();
        Ok(Some(task.clone()))
    }

    async fn toggle_task_completion(&self, user_id: Uuid, id: Uuid) -> StoreResult<Option<Task>> {
        self.record("toggle_task_completion", &[id])?;
        let mut tasks = self.tasks.lock();
        let Some(task) = tasks.iter_mut().find(|t| t.id == id && t.user_id == user_id) else {
            return Ok(None);
        };
        task.completed = !task.completed;
        if task.completed {
            task.status = TaskStatus::Completed;
            task.completed_at = Some(Utc::now());
        } else {
            task.status = TaskStatus::Todo;
            task.completed_at = None;
        }
        task.updated_at = Utc::now();
        Ok(Some(task.clone()))
    }

    async fn delete_task(&self, user_id: Uuid, id: Uuid) -> StoreResult<bool> {
        self.record("delete_task", &[id])?;
        let mut tasks = self.tasks.lock();
        let before = tasks.len();
        tasks.retain(|t| !(t.id == id && t.user_id == user_id));
        Ok(tasks.len() < before)
    }

    async fn create_project(&self, user_id: Uuid, new: &NewProject) -> StoreResult<Project> {
        self.record("create_project", &[new.area_id])?;
        let mut projects = self.projects.lock();
        let now = Utc::now();
        let project = Project {
            id: Uuid::new_v4(),
            user_id,
            area_id: new.area_id,
            name: new.name.clone(),
            description: new.description.clone(),
            icon: new.icon.clone(),
            deadline: new.deadline,
            status: ProjectStatus::NotStarted,
            priority: new.priority,
            importance: new.importance,
            completion_percentage: 0.0,
            archived: false,
            sort_order: next_sort_order(
                projects
                    .iter()
                    .filter(|p| p.area_id == new.area_id)
                    .map(|p| p.sort_order),
            ),
            created_at: now,
            updated_at: now,
        };
        projects.push(project.clone());
        Ok(project)
    }

    async fn update_project(
        &self,
        user_id: Uuid,
        id: Uuid,
        changes: &ProjectChanges,
    ) -> StoreResult<Option<Project>> {
        self.record("update_project", &[id])?;
        let mut projects = self.projects.lock();
        let Some(project) = projects
            .iter_mut()
            .find(|p| p.id == id && p.user_id == user_id)
        else {
            return Ok(None);
        };
        if let Some(name) = &changes.name {
            project.name = name.clone();
        }
        if let Some(description) = &changes.description {
            project.description = Some(description.clone());
        }
        if let Some(status) = changes.status {
            project.status = status;
        }
        if let Some(priority) = changes.priority {
            project.priority = priority;
        }
        if let Some(deadline) = changes.deadline {
            project.deadline = Some(deadline);
        }
        if let Some(completion) = changes.completion_percentage {
            project.completion_percentage = completion;
        }
        project.updated_at = Utc::now();
        Ok(Some(project.clone()))
    }

    async fn pillars_by_ids(&self, ids: &[Uuid]) -> StoreResult<Vec<Pillar>> {
        self.record("pillars_by_ids", ids)?;
        Ok(children(&self.pillars, |p| ids.contains(&p.id), |p| p.sort_order))
    }

    async fn areas_by_ids(&self, ids: &[Uuid]) -> StoreResult<Vec<Area>> {
        self.record("areas_by_ids", ids)?;
        Ok(children(&self.areas, |a| ids.contains(&a.id), |a| a.sort_order))
    }

    async fn projects_by_ids(&self, ids: &[Uuid]) -> StoreResult<Vec<Project>> {
        self.record("projects_by_ids", ids)?;
        Ok(children(&self.projects.lock(), |p| ids.contains(&p.id), |p| p.sort_order))
    }

    async fn areas_by_pillars(&self, pillar_ids: &[Uuid]) -> StoreResult<Vec<Area>> {
        self.record("areas_by_pillars", pillar_ids)?;
        Ok(children(
            &self.areas,
            |a| !a.archived && a.pillar_id.is_some_and(|id| pillar_ids.contains(&id)),
            |a| a.sort_order,
        ))
    }

    async fn projects_by_areas(&self, area_ids: &[Uuid]) -> StoreResult<Vec<Project>> {
        self.record("projects_by_areas", area_ids)?;
        Ok(children(
            &self.projects.lock(),
            |p| !p.archived && area_ids.contains(&p.area_id),
            |p| p.sort_order,
        ))
    }

    async fn tasks_by_projects(&self, project_ids: &[Uuid]) -> StoreResult<Vec<Task>> {
        self.record("tasks_by_projects", project_ids)?;
        Ok(children(
            &self.tasks.lock(),
            |t| project_ids.contains(&t.project_id),
            |t| t.sort_order,
        ))
    }

    async fn subtasks_by_parents(&self, task_ids: &[Uuid]) -> StoreResult<Vec<Task>> {
        self.record("subtasks_by_parents", task_ids)?;
        Ok(children(
            &self.tasks.lock(),
            |t| t.parent_task_id.is_some_and(|id| task_ids.contains(&id)),
            |t| t.sort_order,
        ))
    }
}
