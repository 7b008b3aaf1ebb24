//! Paged list results

use async_graphql::SimpleObject;

use crate::models::{Project as DbProject, Task as DbTask};
use crate::repositories::{Page, Paged};

use super::project::Project;
use super::task::Task;

/// One page of projects
#[derive(SimpleObject)]
pub struct ProjectConnection {
    pub projects: Vec<Project>,
    /// Number of projects matching the filter across all pages
    pub total_count: i64,
    pub has_next_page: bool,
}

impl ProjectConnection {
    pub fn new(paged: Paged<DbProject>, page: Page) -> Self {
        let has_next_page = paged.has_next_page(page);
        Self {
            projects: paged.items.into_iter().map(Project::from).collect(),
            total_count: paged.total_count,
            has_next_page,
        }
    }
}

/// One page of tasks
#[derive(SimpleObject)]
pub struct TaskConnection {
    pub tasks: Vec<Task>,
    /// Number of tasks matching the filter across all pages
    pub total_count: i64,
    pub has_next_page: bool,
}

impl TaskConnection {
    pub fn new(paged: Paged<DbTask>, page: Page) -> Self {
        let has_next_page = paged.has_next_page(page);
        Self {
            tasks: paged.items.into_iter().map(Task::from).collect(),
            total_count: paged.total_count,
            has_next_page,
        }
    }
}
