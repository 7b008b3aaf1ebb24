//! Dashboard GraphQL types

use async_graphql::SimpleObject;

use crate::services::dashboard::{
    Dashboard, ProjectStats as ServiceProjectStats, TaskStats as ServiceTaskStats,
};

use super::task::Task;

/// Task counters for the viewer
#[derive(SimpleObject)]
pub struct TaskStats {
    pub total: i64,
    pub completed: i64,
    pub in_progress: i64,
    /// Open tasks past their due date
    pub overdue: i64,
    /// Fraction of tasks completed, between 0 and 1
    pub completion_rate: f64,
}

impl From<ServiceTaskStats> for TaskStats {
    fn from(stats: ServiceTaskStats) -> Self {
        Self {
            total: stats.total,
            completed: stats.completed,
            in_progress: stats.in_progress,
            overdue: stats.overdue,
            completion_rate: stats.completion_rate,
        }
    }
}

/// Project counters for the viewer
#[derive(SimpleObject)]
pub struct ProjectStats {
    pub total: i64,
    pub completed: i64,
    pub in_progress: i64,
    pub on_hold: i64,
    /// Mean completion percentage, between 0 and 100
    pub average_completion: f64,
}

impl From<ServiceProjectStats> for ProjectStats {
    fn from(stats: ServiceProjectStats) -> Self {
        Self {
            total: stats.total,
            completed: stats.completed,
            in_progress: stats.in_progress,
            on_hold: stats.on_hold,
            average_completion: stats.average_completion,
        }
    }
}

#[derive(SimpleObject)]
pub struct UserStats {
    pub task_stats: TaskStats,
    pub project_stats: ProjectStats,
    /// Non-archived pillars
    pub total_pillars: i64,
    /// Non-archived areas
    pub total_areas: i64,
}

/// Dashboard overview for the viewer
#[derive(SimpleObject)]
pub struct DashboardData {
    pub user_stats: UserStats,
    /// Open tasks, newest first
    pub recent_tasks: Vec<Task>,
    /// Open tasks with a due date, soonest first
    pub upcoming_deadlines: Vec<Task>,
}

impl From<Dashboard> for DashboardData {
    fn from(dashboard: Dashboard) -> Self {
        Self {
            user_stats: UserStats {
                task_stats: dashboard.task_stats.into(),
                project_stats: dashboard.project_stats.into(),
                total_pillars: dashboard.total_pillars,
                total_areas: dashboard.total_areas,
            },
            recent_tasks: dashboard.recent_tasks.into_iter().map(Task::from).collect(),
            upcoming_deadlines: dashboard
                .upcoming_deadlines
                .into_iter()
                .map(Task::from)
                .collect(),
        }
    }
}
