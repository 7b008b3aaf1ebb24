//! Tasks-by-Project loader for batched fetching
//!
//! Top-level tasks and subtasks are both returned; nesting is exposed
//! separately through `Task.subtasks`.

use std::collections::HashMap;
use std::sync::Arc;

use uuid::Uuid;

use super::{group_by_parent, FailurePolicy};
use crate::dataloader::Loader;
use crate::models::Task;
use crate::repositories::{SharedStore, StoreError};

/// Batch fetch of tasks keyed by project id
#[derive(Clone)]
pub struct TasksByProjectLoader {
    store: SharedStore,
    policy: FailurePolicy,
}

impl TasksByProjectLoader {
    pub fn new(store: SharedStore, policy: FailurePolicy) -> Self {
        Self { store, policy }
    }
}

impl Loader<Uuid> for TasksByProjectLoader {
    type Value = Vec<Task>;
    type Error = Arc<StoreError>;

    async fn load(&self, keys: &[Uuid]) -> Result<HashMap<Uuid, Self::Value>, Self::Error> {
        let result = self.store.tasks_by_projects(keys).await;
        let tasks = self.policy.apply("tasks_by_project", keys.len(), result)?;

        Ok(group_by_parent(keys, tasks, |task| Some(task.project_id)))
    }
}
