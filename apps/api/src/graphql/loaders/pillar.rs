//! Pillar loader for batched fetching
//!
//! Backs `Area.pillar` when many areas point at the same few pillars.

use std::collections::HashMap;
use std::sync::Arc;

use uuid::Uuid;

use super::{index_by_id, FailurePolicy};
use crate::dataloader::Loader;
use crate::models::Pillar;
use crate::repositories::{SharedStore, StoreError};

/// Batch fetch of pillars by id
#[derive(Clone)]
pub struct PillarLoader {
    store: SharedStore,
    policy: FailurePolicy,
}

impl PillarLoader {
    pub fn new(store: SharedStore, policy: FailurePolicy) -> Self {
        Self { store, policy }
    }
}

impl Loader<Uuid> for PillarLoader {
    type Value = Option<Pillar>;
    type Error = Arc<StoreError>;

    async fn load(&self, keys: &[Uuid]) -> Result<HashMap<Uuid, Self::Value>, Self::Error> {
        let result = self.store.pillars_by_ids(keys).await;
        let pillars = self.policy.apply("pillar", keys.len(), result)?;

        Ok(index_by_id(keys, pillars, |pillar| pillar.id))
    }
}
