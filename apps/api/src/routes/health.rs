//! Health check HTTP route handlers
//!
//! - `GET /health` - Simple liveness check (returns 200 OK)
//! - `GET /health/ready` - Readiness check (pings the hierarchy store)
//! - `GET /health/live` - Kubernetes-style liveness check

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};

use crate::services::HealthService;

/// Shared application state for health check handlers
#[derive(Clone)]
pub struct HealthState {
    pub health_service: HealthService,
}

impl HealthState {
    pub fn new(health_service: HealthService) -> Self {
        Self { health_service }
    }
}

/// Create health check router
pub fn health_router(state: HealthState) -> Router {
    Router::new()
        .route("/", get(simple_health))
        .route("/live", get(liveness_check))
        .route("/ready", get(readiness_check))
        .with_state(state)
}

/// Simple health check - always returns OK if the server is running
async fn simple_health() -> &'static str {
    "OK"
}

/// Liveness check for Kubernetes
///
/// Returns 200 if the server process is running and can handle requests.
/// Does not check external dependencies; that is what readiness is for.
async fn liveness_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "alive",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Readiness check
///
/// # Response
/// - 200 OK if the database answers
/// - 503 Service Unavailable otherwise
async fn readiness_check(State(state): State<HealthState>) -> impl IntoResponse {
    let response = state.health_service.check_all().await;

    let status_code = if response.is_healthy() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(response))
}
