//! Dashboard summary for a single user
//!
//! Stats are computed from the user's rows on every call; there is no
//! denormalized stats table behind them.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::{Project, ProjectStatus, Task, TaskStatus};
use crate::repositories::{SharedStore, StoreResult};

/// Maximum entries in each dashboard task list
pub const DASHBOARD_LIST_LIMIT: usize = 10;

/// Task counters
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskStats {
    pub total: i64,
    pub completed: i64,
    pub in_progress: i64,
    /// Open tasks whose due date has passed
    pub overdue: i64,
    /// Completed over total, 0 when there are no tasks
    pub completion_rate: f64,
}

/// Project counters
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectStats {
    pub total: i64,
    pub completed: i64,
    pub in_progress: i64,
    pub on_hold: i64,
    /// Mean `completion_percentage`, 0 when there are no projects
    pub average_completion: f64,
}

/// Everything the dashboard shows
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dashboard {
    pub task_stats: TaskStats,
    pub project_stats: ProjectStats,
    pub total_pillars: i64,
    pub total_areas: i64,
    /// Open tasks, newest first
    pub recent_tasks: Vec<Task>,
    /// Open tasks with a due date, soonest first
    pub upcoming_deadlines: Vec<Task>,
}

impl TaskStats {
    pub fn from_tasks(tasks: &[Task], now: DateTime<Utc>) -> Self {
        let total = tasks.len() as i64;
        let completed = tasks.iter().filter(|t| t.completed).count() as i64;
        Self {
            total,
            completed,
            in_progress: tasks
                .iter()
                .filter(|t| t.status == TaskStatus::InProgress)
                .count() as i64,
            overdue: tasks.iter().filter(|t| t.is_overdue(now)).count() as i64,
            completion_rate: if total == 0 {
                0.0
            } else {
                completed as f64 / total as f64
            },
        }
    }
}

impl ProjectStats {
    pub fn from_projects(projects: &[Project]) -> Self {
        let count = |status: ProjectStatus| {
            projects.iter().filter(|p| p.status == status).count() as i64
        };
        let total = projects.len() as i64;
        let completion_sum: f64 = projects.iter().map(|p| p.completion_percentage).sum();
        Self {
            total,
            completed: count(ProjectStatus::Completed),
            in_progress: count(ProjectStatus::InProgress),
            on_hold: count(ProjectStatus::OnHold),
            average_completion: if total == 0 {
                0.0
            } else {
                completion_sum / total as f64
            },
        }
    }
}

impl Dashboard {
    /// Summarize rows already fetched for one user
    pub fn from_rows(
        tasks: Vec<Task>,
        projects: &[Project],
        total_pillars: i64,
        total_areas: i64,
        now: DateTime<Utc>,
    ) -> Self {
        let task_stats = TaskStats::from_tasks(&tasks, now);

        let mut open: Vec<Task> = tasks.into_iter().filter(|t| !t.completed).collect();

        let mut upcoming_deadlines: Vec<Task> =
            open.iter().filter(|t| t.due_date.is_some()).cloned().collect();
        upcoming_deadlines.sort_by_key(|t| t.due_date);
        upcoming_deadlines.truncate(DASHBOARD_LIST_LIMIT);

        open.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        open.truncate(DASHBOARD_LIST_LIMIT);

        Self {
            task_stats,
            project_stats: ProjectStats::from_projects(projects),
            total_pillars,
            total_areas,
            recent_tasks: open,
            upcoming_deadlines,
        }
    }
}

/// Builds [`Dashboard`]s from the hierarchy store
#[derive(Clone)]
pub struct DashboardService {
    store: SharedStore,
}

impl DashboardService {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// Fetch the user's rows concurrently and summarize them
    pub async fn for_user(&self, user_id: Uuid) -> StoreResult<Dashboard> {
        let (tasks, projects, pillars, areas) = tokio::try_join!(
            self.store.all_tasks_for_user(user_id),
            self.store.all_projects_for_user(user_id),
            self.store.pillars_for_user(user_id, false),
            self.store.areas_for_user(user_id, None, false),
        )?;

        Ok(Dashboard::from_rows(
            tasks,
            &projects,
            pillars.len() as i64,
            areas.len() as i64,
            Utc::now(),
        ))
    }
}
