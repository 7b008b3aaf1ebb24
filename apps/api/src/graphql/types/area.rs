//! Area GraphQL type

use async_graphql::{Context, Object, Result};
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::graphql::loaders::Loaders;
use crate::models::Area as DbArea;

use super::pillar::Pillar;
use super::project::Project;

/// Area exposed via GraphQL
pub struct Area {
    inner: DbArea,
}

impl Area {
    /// Create a new GraphQL Area from a database Area
    pub fn new(area: DbArea) -> Self {
        Self { inner: area }
    }
}

impl From<DbArea> for Area {
    fn from(area: DbArea) -> Self {
        Self::new(area)
    }
}

#[Object]
impl Area {
    /// Unique area identifier
    async fn id(&self) -> Uuid {
        self.inner.id
    }

    /// Parent pillar ID, if the area is filed under one
    async fn pillar_id(&self) -> Option<Uuid> {
        self.inner.pillar_id
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

    /// Importance on a 1-5 scale
    async fn importance(&self) -> i32 {
        self.inner.importance
    }

    /// Whether the area is archived
    async fn archived(&self) -> bool {
        self.inner.archived
    }

    /// Position among sibling areas
    async fn sort_order(&self) -> i32 {
        self.inner.sort_order
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

    /// Parent pillar (batched across sibling areas)
    async fn pillar(&self, ctx: &Context<'_>) -> Result<Option<Pillar>> {
        let Some(pillar_id) = self.inner.pillar_id else {
            return Ok(None);
        };
        let loaders = ctx.data::<Loaders>()?;
        let pillar = loaders.pillar.load(pillar_id).await?;
        Ok(pillar.map(Pillar::from))
    }

    /// Non-archived projects in this area, in display order
    async fn projects(&self, ctx: &Context<'_>) -> Result<Option<Vec<Project>>> {
        let loaders = ctx.data::<Loaders>()?;
        let projects = loaders.projects_by_area.load(self.inner.id).await?;
        Ok(Some(projects.into_iter().map(Project::from).collect()))
    }
}
