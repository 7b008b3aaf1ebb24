//! Test helper functions for API integration tests
//!
//! Executes GraphQL the same way the HTTP handler does: one schema, a fresh
//! set of loaders per request, closed once the response is built.

#![allow(dead_code)]

use std::sync::Arc;

use async_graphql::{Request, Response};
use axum::Router;
use uuid::Uuid;

use aurum_api::graphql::{build_schema, LoaderSettings, Loaders};
use aurum_api::repositories::SharedStore;
use aurum_api::{build_router, AppState, TokenVerifier, Viewer};

use super::fixtures::TEST_JWT_SECRET;
use super::mocks::MockHierarchyStore;

/// Execute `query` as `viewer` with default loader settings
pub async fn execute(store: &Arc<MockHierarchyStore>, viewer: Option<Uuid>, query: &str) -> Response {
    execute_with(store, LoaderSettings::default(), viewer, query).await
}

/// Execute `query` as `viewer` with explicit loader settings
pub async fn execute_with(
    store: &Arc<MockHierarchyStore>,
    settings: LoaderSettings,
    viewer: Option<Uuid>,
    query: &str,
) -> Response {
    let shared: SharedStore = store.clone();
    let schema = build_schema(shared.clone());

    let loaders = Loaders::new(shared, settings);
    let mut request = Request::new(query).data(loaders.clone());
    if let Some(user_id) = viewer {
        request = request.data(Viewer {
            user_id,
            email: None,
        });
    }

    let response = schema.execute(request).await;
    loaders.close();
    response
}

/// Response data as JSON, panicking on errors
pub fn data(response: Response) -> serde_json::Value {
    assert!(
        response.errors.is_empty(),
        "unexpected errors: {:?}",
        response.errors
    );
    response.data.into_json().expect("response data is not JSON")
}

/// Router over `store`, as the binary builds it
pub fn test_app(store: &Arc<MockHierarchyStore>, playground: bool) -> Router {
    let shared: SharedStore = store.clone();
    build_router(AppState {
        store: shared,
        verifier: TokenVerifier::new(TEST_JWT_SECRET),
        loader_settings: LoaderSettings::default(),
        playground,
        is_production: !playground,
        cors_allowed_origins: None,
    })
}
