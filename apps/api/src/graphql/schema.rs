//! GraphQL schema builder for Aurum
//!
//! The schema holds only process-wide data. Per-request data (the viewer and
//! a fresh set of loaders) is attached to each request by the HTTP handler.

use async_graphql::{EmptySubscription, Schema};

use crate::repositories::SharedStore;

use super::mutation::Mutation;
use super::query::Query;

/// The Aurum GraphQL schema type
pub type AurumSchema = Schema<Query, Mutation, EmptySubscription>;

/// Builder for constructing the GraphQL schema with required services
#[derive(Default)]
pub struct SchemaBuilder {
    store: Option<SharedStore>,
}

impl SchemaBuilder {
    /// Create a new schema builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the hierarchy store used by root queries and mutations
    pub fn store(mut self, store: SharedStore) -> Self {
        self.store = Some(store);
        self
    }

    /// Build the schema
    ///
    /// Without a store, root fields fail with a missing-data error at
    /// execution time.
    pub fn build(self) -> AurumSchema {
        let mut builder = Schema::build(Query::default(), Mutation::default(), EmptySubscription);
        if let Some(store) = self.store {
            builder = builder.data(store);
        }
        builder.finish()
    }
}

/// Create a new GraphQL schema over the provided store
pub fn build_schema(store: SharedStore) -> AurumSchema {
    SchemaBuilder::new().store(store).build()
}
