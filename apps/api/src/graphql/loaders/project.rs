//! Project loader for batched fetching

use std::collections::HashMap;
use std::sync::Arc;

use uuid::Uuid;

use super::{index_by_id, FailurePolicy};
use crate::dataloader::Loader;
use crate::models::Project;
use crate::repositories::{SharedStore, StoreError};

/// Batch fetch of projects by id, backing `Task.project`
#[derive(Clone)]
pub struct ProjectLoader {
    store: SharedStore,
    policy: FailurePolicy,
}

impl ProjectLoader {
    pub fn new(store: SharedStore, policy: FailurePolicy) -> Self {
        Self { store, policy }
    }
}

impl Loader<Uuid> for ProjectLoader {
    type Value = Option<Project>;
    type Error = Arc<StoreError>;

    async fn load(&self, keys: &[Uuid]) -> Result<HashMap<Uuid, Self::Value>, Self::Error> {
        let result = self.store.projects_by_ids(keys).await;
        let projects = self.policy.apply("project", keys.len(), result)?;

        Ok(index_by_id(keys, projects, |project| project.id))
    }
}
