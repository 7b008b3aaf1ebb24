//! Batch fetch functions for the hierarchy relationships
//!
//! Each loader here turns a set of parent (or entity) ids into one call on
//! the [`HierarchyStore`](crate::repositories::HierarchyStore) and groups the
//! flat result by key. They are wrapped in a [`DataLoader`] per request by
//! [`Loaders::new`] so that sibling resolvers share batches and cache.
//!
//! There are two kinds of loaders:
//! - Collection loaders: `Vec<T>` of children per parent id, empty when the
//!   parent has none
//! - Single-entity loaders: `Option<T>` per id, used for back-references

mod area;
mod areas_by_pillar;
mod pillar;
mod project;
mod projects_by_area;
mod subtasks_by_task;
mod tasks_by_project;

pub use area::AreaLoader;
pub use areas_by_pillar::AreasByPillarLoader;
pub use pillar::PillarLoader;
pub use project::ProjectLoader;
pub use projects_by_area::ProjectsByAreaLoader;
pub use subtasks_by_task::SubtasksByTaskLoader;
pub use tasks_by_project::TasksByProjectLoader;

use std::collections::HashMap;
use std::hash::Hash;
use std::str::FromStr;
use std::sync::Arc;

use uuid::Uuid;

use crate::dataloader::{DataLoader, LoadError, LoaderOptions};
use crate::repositories::{SharedStore, StoreError, StoreResult};

/// Error seen by resolvers when a relationship fails to load
pub type RelationLoadError = LoadError<Arc<StoreError>>;

/// What a batch loader does when the store call fails
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Every caller of the batch receives the error
    #[default]
    Propagate,
    /// Log the error and resolve every key of the batch to its empty value
    Degrade,
}

impl FromStr for FailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "propagate" => Ok(Self::Propagate),
            "degrade" => Ok(Self::Degrade),
            other => Err(format!(
                "unknown failure policy '{}', expected 'propagate' or 'degrade'",
                other
            )),
        }
    }
}

impl FailurePolicy {
    /// Apply the policy to a store result for `relation`
    pub(crate) fn apply<T>(
        self,
        relation: &'static str,
        batch_size: usize,
        result: StoreResult<Vec<T>>,
    ) -> Result<Vec<T>, Arc<StoreError>> {
        match result {
            Ok(rows) => {
                tracing::debug!(relation, batch_size, rows = rows.len(), "Batch loaded");
                Ok(rows)
            }
            Err(error) => {
                tracing::error!(relation, batch_size, error = %error, "Batch load failed");
                match self {
                    Self::Propagate => Err(Arc::new(error)),
                    Self::Degrade => Ok(Vec::new()),
                }
            }
        }
    }
}

/// Per-request loader tuning taken from configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoaderSettings {
    pub options: LoaderOptions,
    pub failure_policy: FailurePolicy,
}

/// Group child rows under their parent key
///
/// Every key gets an entry, empty when it has no children, and rows keep the
/// order in which the store returned them. Rows whose parent is not among
/// `keys` are dropped.
pub fn group_by_parent<K, T, F>(keys: &[K], rows: Vec<T>, parent_of: F) -> HashMap<K, Vec<T>>
where
    K: Hash + Eq + Clone,
    F: Fn(&T) -> Option<K>,
{
    let mut groups: HashMap<K, Vec<T>> = keys.iter().map(|k| (k.clone(), Vec::new())).collect();
    for row in rows {
        if let Some(group) = parent_of(&row).and_then(|parent| groups.get_mut(&parent)) {
            group.push(row);
        }
    }
    groups
}

/// Index rows by their own id, with `None` for keys the store did not return
pub fn index_by_id<T, F>(keys: &[Uuid], rows: Vec<T>, id_of: F) -> HashMap<Uuid, Option<T>>
where
    F: Fn(&T) -> Uuid,
{
    let mut index: HashMap<Uuid, Option<T>> = keys.iter().map(|k| (*k, None)).collect();
    for row in rows {
        index.insert(id_of(&row), Some(row));
    }
    index
}

/// One [`DataLoader`] per relationship, created for a single GraphQL request
///
/// All resolvers of that request must share this instance; it is never
/// reused across requests.
#[derive(Clone)]
pub struct Loaders {
    pub areas_by_pillar: DataLoader<Uuid, AreasByPillarLoader>,
    pub projects_by_area: DataLoader<Uuid, ProjectsByAreaLoader>,
    pub tasks_by_project: DataLoader<Uuid, TasksByProjectLoader>,
    pub subtasks_by_task: DataLoader<Uuid, SubtasksByTaskLoader>,
    pub pillar: DataLoader<Uuid, PillarLoader>,
    pub area: DataLoader<Uuid, AreaLoader>,
    pub project: DataLoader<Uuid, ProjectLoader>,
}

impl Loaders {
    /// Create a fresh set of loaders with empty caches
    pub fn new(store: SharedStore, settings: LoaderSettings) -> Self {
        let LoaderSettings {
            options,
            failure_policy: policy,
        } = settings;

        Self {
            areas_by_pillar: DataLoader::new(
                AreasByPillarLoader::new(store.clone(), policy),
                options,
            ),
            projects_by_area: DataLoader::new(
                ProjectsByAreaLoader::new(store.clone(), policy),
                options,
            ),
            tasks_by_project: DataLoader::new(
                TasksByProjectLoader::new(store.clone(), policy),
                options,
            ),
            subtasks_by_task: DataLoader::new(
                SubtasksByTaskLoader::new(store.clone(), policy),
                options,
            ),
            pillar: DataLoader::new(PillarLoader::new(store.clone(), policy), options),
            area: DataLoader::new(AreaLoader::new(store.clone(), policy), options),
            project: DataLoader::new(ProjectLoader::new(store, policy), options),
        }
    }

    /// Cancel all loaders once the owning request is done
    pub fn close(&self) {
        self.areas_by_pillar.close();
        self.projects_by_area.close();
        self.tasks_by_project.close();
        self.subtasks_by_task.close();
        self.pillar.close();
        self.area.close();
        self.project.close();
    }
}
