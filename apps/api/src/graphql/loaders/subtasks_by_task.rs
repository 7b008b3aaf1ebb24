//! Subtasks-by-Task loader for batched fetching

use std::collections::HashMap;
use std::sync::Arc;

use uuid::Uuid;

use super::{group_by_parent, FailurePolicy};
use crate::dataloader::Loader;
use crate::models::Task;
use crate::repositories::{SharedStore, StoreError};

/// Batch fetch of subtasks keyed by parent task id
#[derive(Clone)]
pub struct SubtasksByTaskLoader {
    store: SharedStore,
    policy: FailurePolicy,
}

impl SubtasksByTaskLoader {
    pub fn new(store: SharedStore, policy: FailurePolicy) -> Self {
        Self { store, policy }
    }
}

impl Loader<Uuid> for SubtasksByTaskLoader {
    type Value = Vec<Task>;
    type Error = Arc<StoreError>;

    async fn load(&self, keys: &[Uuid]) -> Result<HashMap<Uuid, Self::Value>, Self::Error> {
        let result = self.store.subtasks_by_parents(keys).await;
        let subtasks = self.policy.apply("subtasks_by_task", keys.len(), result)?;

        Ok(group_by_parent(keys, subtasks, |task| task.parent_task_id))
    }
}
