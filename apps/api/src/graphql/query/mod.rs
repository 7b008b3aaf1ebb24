//! GraphQL queries for Aurum

mod hierarchy;
mod viewer;

pub use hierarchy::HierarchyQuery;
pub use viewer::ViewerQuery;

use async_graphql::MergedObject;

/// Root query type combining all query domains
#[derive(MergedObject, Default)]
pub struct Query(ViewerQuery, HierarchyQuery);
