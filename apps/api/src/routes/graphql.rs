//! GraphQL HTTP route handlers
//!
//! - `POST /graphql` - execute a query as the bearer token's user
//! - `GET /graphql/playground` - GraphQL Playground (non-production only)
//!
//! Every request gets its own [`Loaders`], so batching and memoization never
//! cross request (or user) boundaries.

use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    extract::State,
    http::{header, HeaderMap},
    response::{Html, IntoResponse},
    routing::{get, post},
    Router,
};

use crate::graphql::{AurumSchema, LoaderSettings, Loaders};
use crate::repositories::SharedStore;
use crate::services::{TokenVerifier, Viewer};

/// Shared state for the GraphQL endpoint
#[derive(Clone)]
pub struct GraphQLState {
    pub schema: AurumSchema,
    pub verifier: TokenVerifier,
    pub store: SharedStore,
    pub loader_settings: LoaderSettings,
}

impl GraphQLState {
    pub fn new(
        schema: AurumSchema,
        verifier: TokenVerifier,
        store: SharedStore,
        loader_settings: LoaderSettings,
    ) -> Self {
        Self {
            schema,
            verifier,
            store,
            loader_settings,
        }
    }
}

/// Create the GraphQL router
///
/// The playground is only mounted when `playground` is true.
pub fn graphql_router(state: GraphQLState, playground: bool) -> Router {
    let router = Router::new().route("/", post(graphql_handler));
    let router = if playground {
        router.route("/playground", get(graphql_playground))
    } else {
        router
    };
    router.with_state(state)
}

/// Extract bearer token from Authorization header (case-insensitive)
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())?;

    let mut parts = value.split_whitespace();
    let scheme = parts.next()?;
    let token = parts.next()?;

    // Reject malformed values like "Bearer <token> <extra>"
    if parts.next().is_some() {
        return None;
    }

    if scheme.eq_ignore_ascii_case("bearer") && !token.is_empty() {
        Some(token)
    } else {
        None
    }
}

/// Execute a GraphQL request
///
/// A missing or invalid token does not fail the request; resolvers that need
/// a viewer report "Authentication required" themselves.
async fn graphql_handler(
    State(state): State<GraphQLState>,
    headers: HeaderMap,
    req: GraphQLRequest,
) -> GraphQLResponse {
    let mut request = req.into_inner();

    if let Some(token) = extract_bearer_token(&headers) {
        match state.verifier.verify(token) {
            Ok(claims) => {
                tracing::debug!(user_id = %claims.sub, "GraphQL request authenticated");
                request = request.data(Viewer::from(claims));
            }
            Err(e) => {
                tracing::debug!(error = %e, "GraphQL auth token verification failed");
            }
        }
    }

    let loaders = Loaders::new(state.store.clone(), state.loader_settings);
    request = request.data(loaders.clone());

    let response = state.schema.execute(request).await;
    loaders.close();

    response.into()
}

/// GraphQL Playground handler for development
async fn graphql_playground() -> impl IntoResponse {
    Html(async_graphql::http::playground_source(
        async_graphql::http::GraphQLPlaygroundConfig::new("/graphql"),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use rstest::rstest;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[rstest]
    #[case("Bearer abc", Some("abc"))]
    #[case("bearer abc", Some("abc"))]
    #[case("BEARER   abc", Some("abc"))]
    #[case("Basic abc", None)]
    #[case("Bearer", None)]
    #[case("Bearer abc extra", None)]
    fn test_extract_bearer_token(#[case] value: &str, #[case] expected: Option<&str>) {
        assert_eq!(extract_bearer_token(&headers(value)), expected);
    }

    #[test]
    fn test_extract_bearer_token_missing_header() {
        assert_eq!(extract_bearer_token(&HeaderMap::new()), None);
    }
}
