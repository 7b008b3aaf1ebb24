//! Projects-by-Area loader for batched fetching

use std::collections::HashMap;
use std::sync::Arc;

use uuid::Uuid;

use super::{group_by_parent, FailurePolicy};
use crate::dataloader::Loader;
use crate::models::Project;
use crate::repositories::{SharedStore, StoreError};

/// Batch fetch of non-archived projects keyed by area id
#[derive(Clone)]
pub struct ProjectsByAreaLoader {
    store: SharedStore,
    policy: FailurePolicy,
}

impl ProjectsByAreaLoader {
    pub fn new(store: SharedStore, policy: FailurePolicy) -> Self {
        Self { store, policy }
    }
}

impl Loader<Uuid> for ProjectsByAreaLoader {
    type Value = Vec<Project>;
    type Error = Arc<StoreError>;

    async fn load(&self, keys: &[Uuid]) -> Result<HashMap<Uuid, Self::Value>, Self::Error> {
        let result = self.store.projects_by_areas(keys).await;
        let projects = self.policy.apply("projects_by_area", keys.len(), result)?;

        Ok(group_by_parent(keys, projects, |project| Some(project.area_id)))
    }
}
