//! Queries about the viewer themselves

use async_graphql::{Context, Object, Result};

use crate::graphql::types::{DashboardData, User};
use crate::graphql::{require_viewer, to_graphql_error};
use crate::repositories::SharedStore;
use crate::services::{DashboardService, Viewer};

#[derive(Default)]
pub struct ViewerQuery;

#[Object]
impl ViewerQuery {
    /// The current user, or null for anonymous requests
    async fn me(&self, ctx: &Context<'_>) -> Option<User> {
        ctx.data_opt::<Viewer>().map(User::from)
    }

    /// Task and project statistics plus the viewer's most pressing tasks
    async fn dashboard(&self, ctx: &Context<'_>) -> Result<DashboardData> {
        let viewer = require_viewer(ctx)?;
        let store = ctx.data::<SharedStore>()?;
        let dashboard = DashboardService::new(store.clone())
            .for_user(viewer.user_id)
            .await
            .map_err(to_graphql_error)?;
        Ok(dashboard.into())
    }
}
