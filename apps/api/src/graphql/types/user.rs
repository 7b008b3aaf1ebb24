//! Viewer GraphQL type

use async_graphql::SimpleObject;
use uuid::Uuid;

use crate::services::Viewer;

/// The authenticated user, as identified by their access token
#[derive(Debug, Clone, SimpleObject)]
pub struct User {
    pub id: Uuid,
    pub email: Option<String>,
}

impl From<&Viewer> for User {
    fn from(viewer: &Viewer) -> Self {
        Self {
            id: viewer.user_id,
            email: viewer.email.clone(),
        }
    }
}
