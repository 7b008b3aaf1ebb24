//! Router assembly
//!
//! Shared by the binary and the integration tests so both drive the same
//! routes and layers.

use axum::{
    http::{header, Method},
    routing::get,
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::Config;
use crate::graphql::{build_schema, LoaderSettings};
use crate::repositories::SharedStore;
use crate::routes::{graphql_router, health_router, GraphQLState, HealthState};
use crate::services::{HealthService, TokenVerifier};

/// Everything the router needs, independent of the environment
#[derive(Clone)]
pub struct AppState {
    pub store: SharedStore,
    pub verifier: TokenVerifier,
    pub loader_settings: LoaderSettings,
    /// Mount `GET /graphql/playground`
    pub playground: bool,
    pub is_production: bool,
    pub cors_allowed_origins: Option<Vec<String>>,
}

impl AppState {
    /// Derive router state from loaded configuration
    pub fn from_config(config: &Config, store: SharedStore) -> Self {
        Self {
            store,
            verifier: TokenVerifier::new(&config.jwt_secret),
            loader_settings: config.loaders,
            playground: !config.is_production(),
            is_production: config.is_production(),
            cors_allowed_origins: config.cors_allowed_origins.clone(),
        }
    }
}

/// Build the application router
pub fn build_router(state: AppState) -> Router {
    let cors_layer = build_cors_layer(state.is_production, state.cors_allowed_origins.as_deref());

    let schema = build_schema(state.store.clone());
    let graphql_state = GraphQLState::new(
        schema,
        state.verifier,
        state.store.clone(),
        state.loader_settings,
    );
    let health_state = HealthState::new(HealthService::new(state.store));

    Router::new()
        .route("/", get(root))
        // GraphQL endpoints: /graphql, /graphql/playground
        .nest("/graphql", graphql_router(graphql_state, state.playground))
        // Nested health routes: /health, /health/live, /health/ready
        .nest("/health", health_router(health_state))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer)
}

/// Build the CORS layer based on configuration.
///
/// In production mode:
/// - If `CORS_ORIGINS` is set, only those origins are allowed
/// - If `CORS_ORIGINS` is not set, CORS requests are rejected (no origins allowed)
///
/// In development mode:
/// - If `CORS_ORIGINS` is set, those origins are used
/// - If `CORS_ORIGINS` is not set, permissive CORS is used for convenience
fn build_cors_layer(is_production: bool, origins: Option<&[String]>) -> CorsLayer {
    match origins {
        Some(origins) if !origins.is_empty() => {
            let allowed_origins: Vec<_> = origins
                .iter()
                .filter_map(|origin| {
                    origin.parse().ok().or_else(|| {
                        tracing::warn!("Invalid CORS origin '{}', skipping", origin);
                        None
                    })
                })
                .collect();

            if allowed_origins.is_empty() {
                tracing::error!("No valid CORS origins configured, CORS requests will be rejected");
                CorsLayer::new()
            } else {
                tracing::info!(
                    "CORS configured with {} allowed origin(s): {:?}",
                    allowed_origins.len(),
                    origins
                );
                CorsLayer::new()
                    .allow_origin(allowed_origins)
                    .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                    .allow_headers([
                        header::AUTHORIZATION,
                        header::CONTENT_TYPE,
                        header::ACCEPT,
                        header::ORIGIN,
                    ])
                    .allow_credentials(true)
                    .max_age(std::time::Duration::from_secs(3600))
            }
        }
        _ if is_production => {
            tracing::warn!(
                "CORS_ORIGINS not configured in production mode. \
                 CORS requests will be rejected. Set CORS_ORIGINS to allow cross-origin requests."
            );
            CorsLayer::new()
        }
        _ => {
            tracing::warn!(
                "Using permissive CORS in development mode. \
                 Set CORS_ORIGINS for production-like behavior."
            );
            CorsLayer::permissive()
        }
    }
}

async fn root() -> &'static str {
    "Aurum Life API"
}
