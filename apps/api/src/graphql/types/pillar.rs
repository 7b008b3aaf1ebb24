//! Pillar GraphQL type
//!
//! Pillars are the roots of the hierarchy. Their areas are resolved through
//! the request's batch loader, so a list of pillars costs one area query.

use async_graphql::{Context, Object, Result};
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::graphql::loaders::Loaders;
use crate::models::Pillar as DbPillar;

use super::area::Area;

/// Pillar exposed via GraphQL
pub struct Pillar {
    inner: DbPillar,
}

impl Pillar {
    /// Create a new GraphQL Pillar from a database Pillar
    pub fn new(pillar: DbPillar) -> Self {
        Self { inner: pillar }
    }
}

impl From<DbPillar> for Pillar {
    fn from(pillar: DbPillar) -> Self {
        Self::new(pillar)
    }
}

#[Object]
impl Pillar {
    /// Unique pillar identifier
    async fn id(&self) -> Uuid {
        self.inner.id
    }

    /// Display name
    async fn name(&self) -> &str {
        &self.inner.name
    }

    /// Free-form description
    async fn description(&self) -> Option<&str> {
        self.inner.description.as_deref()
    }

    /// Icon identifier or emoji
    async fn icon(&self) -> Option<&str> {
        self.inner.icon.as_deref()
    }

    /// Display color
    async fn color(&self) -> Option<&str> {
        self.inner.color.as_deref()
    }

    /// Position among the user's pillars
    async fn sort_order(&self) -> i32 {
        self.inner.sort_order
    }

    /// Whether the pillar is archived
    async fn archived(&self) -> bool {
        self.inner.archived
    }

    /// Share of the user's time planned for this pillar
    async fn time_allocation_percentage(&self) -> Option<f64> {
        self.inner.time_allocation_percentage
    }

    /// Long-term vision for this part of life
    async fn vision_statement(&self) -> Option<&str> {
        self.inner.vision_statement.as_deref()
    }

    /// Creation timestamp
    async fn created_at(&self) -> DateTime<Utc> {
        self.inner.created_at
    }

    /// Last update timestamp
    async fn updated_at(&self) -> DateTime<Utc> {
        self.inner.updated_at
    }

    // Relationship resolvers

    /// Non-archived areas under this pillar, in display order
    ///
    /// Null, with a field error, when the batch fetch failed.
    async fn areas(&self, ctx: &Context<'_>) -> Result<Option<Vec<Area>>> {
        let loaders = ctx.data::<Loaders>()?;
        let areas = loaders.areas_by_pillar.load(self.inner.id).await?;
        Ok(Some(areas.into_iter().map(Area::from).collect()))
    }
}
