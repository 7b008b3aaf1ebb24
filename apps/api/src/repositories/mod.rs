//! Data-store boundary for the Aurum hierarchy
//!
//! Resolvers and batch loaders never talk to Postgres directly. They depend
//! on the [`HierarchyStore`] capability, which [`PgHierarchyStore`] implements
//! with sqlx. Keeping the seam as a trait object lets the GraphQL layer be
//! exercised against an in-memory store in tests.

pub mod changes;
pub mod hierarchy;
pub mod postgres;
pub mod utils;

pub use changes::{NewProject, NewTask, ProjectChanges, TaskChanges};
pub use hierarchy::{
    HierarchyStore, Page, Paged, ProjectFilter, SharedStore, StoreError, StoreResult, TaskFilter,
};
pub use postgres::PgHierarchyStore;
