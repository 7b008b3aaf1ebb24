//! Areas-by-Pillar loader for batched fetching
//!
//! Resolves `Pillar.areas` for every pillar in a response with one query.

use std::collections::HashMap;
use std::sync::Arc;

use uuid::Uuid;

use super::{group_by_parent, FailurePolicy};
use crate::dataloader::Loader;
use crate::models::Area;
use crate::repositories::{SharedStore, StoreError};

/// Batch fetch of non-archived areas keyed by pillar id
#[derive(Clone)]
pub struct AreasByPillarLoader {
    store: SharedStore,
    policy: FailurePolicy,
}

impl AreasByPillarLoader {
    pub fn new(store: SharedStore, policy: FailurePolicy) -> Self {
        Self { store, policy }
    }
}

impl Loader<Uuid> for AreasByPillarLoader {
    type Value = Vec<Area>;
    type Error = Arc<StoreError>;

    async fn load(&self, keys: &[Uuid]) -> Result<HashMap<Uuid, Self::Value>, Self::Error> {
        let result = self.store.areas_by_pillars(keys).await;
        let areas = self.policy.apply("areas_by_pillar", keys.len(), result)?;

        Ok(group_by_parent(keys, areas, |area| area.pillar_id))
    }
}
