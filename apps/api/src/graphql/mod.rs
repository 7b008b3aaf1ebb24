//! GraphQL schema and resolvers for Aurum
//!
//! This module contains the async-graphql schema including:
//! - Root queries over the viewer's hierarchy and dashboard
//! - Task and project mutations
//! - Object types with batched relationship resolvers
//! - Per-request batch loaders

pub mod loaders;
pub mod mutation;
pub mod pagination;
pub mod query;
pub mod schema;
pub mod types;

pub use loaders::{FailurePolicy, LoaderSettings, Loaders};
pub use schema::{build_schema, AurumSchema, SchemaBuilder};

use async_graphql::Context;

use crate::error::ApiError;
use crate::services::Viewer;

/// Convert service and store errors into GraphQL errors
pub(crate) fn to_graphql_error(error: impl Into<ApiError>) -> async_graphql::Error {
    error.into().into_graphql()
}

/// The authenticated viewer, or an `UNAUTHORIZED` error
pub(crate) fn require_viewer<'a>(ctx: &'a Context<'a>) -> async_graphql::Result<&'a Viewer> {
    ctx.data_opt::<Viewer>()
        .ok_or_else(|| to_graphql_error(ApiError::Unauthorized))
}
