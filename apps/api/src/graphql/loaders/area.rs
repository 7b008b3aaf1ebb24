//! Area loader for batched fetching

use std::collections::HashMap;
use std::sync::Arc;

use uuid::Uuid;

use super::{index_by_id, FailurePolicy};
use crate::dataloader::Loader;
use crate::models::Area;
use crate::repositories::{SharedStore, StoreError};

/// Batch fetch of areas by id, backing `Project.area`
#[derive(Clone)]
pub struct AreaLoader {
    store: SharedStore,
    policy: FailurePolicy,
}

impl AreaLoader {
    pub fn new(store: SharedStore, policy: FailurePolicy) -> Self {
        Self { store, policy }
    }
}

impl Loader<Uuid> for AreaLoader {
    type Value = Option<Area>;
    type Error = Arc<StoreError>;

    async fn load(&self, keys: &[Uuid]) -> Result<HashMap<Uuid, Self::Value>, Self::Error> {
        let result = self.store.areas_by_ids(keys).await;
        let areas = self.policy.apply("area", keys.len(), result)?;

        Ok(index_by_id(keys, areas, |area| area.id))
    }
}
