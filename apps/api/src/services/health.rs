//! Readiness checks for the API's dependencies
//!
//! The hosted Postgres instance is the only dependency, reached through the
//! hierarchy store.

use serde::Serialize;
use std::time::{Duration, Instant};

use crate::repositories::SharedStore;

/// Timeout for an individual dependency check
const CHECK_TIMEOUT: Duration = Duration::from_secs(5);

/// Status of an individual service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    /// Service is healthy and responding
    Healthy,
    /// Service is unhealthy or unreachable
    Unhealthy,
}

/// Result of a single service health check
#[derive(Debug, Clone, Serialize)]
pub struct ServiceHealth {
    /// Name of the service
    pub name: &'static str,
    /// Current status
    pub status: ServiceStatus,
    /// Response time in milliseconds (if available)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_time_ms: Option<u64>,
    /// Error message if unhealthy
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ServiceHealth {
    /// Create a healthy service result
    pub fn healthy(name: &'static str, response_time: Duration) -> Self {
        Self {
            name,
            status: ServiceStatus::Healthy,
            response_time_ms: Some(response_time.as_millis() as u64),
            error: None,
        }
    }

    /// Create an unhealthy service result
    pub fn unhealthy(name: &'static str, error: impl Into<String>) -> Self {
        Self {
            name,
            status: ServiceStatus::Unhealthy,
            response_time_ms: None,
            error: Some(error.into()),
        }
    }
}

/// Aggregated health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthCheckResponse {
    /// Overall status (healthy only if every service is healthy)
    pub status: ServiceStatus,
    /// Individual service health results
    pub services: Vec<ServiceHealth>,
    /// Total time to complete all health checks
    pub total_time_ms: u64,
    /// API version
    pub version: &'static str,
}

impl HealthCheckResponse {
    /// Create a new health check response from individual service results
    pub fn new(services: Vec<ServiceHealth>, total_time: Duration) -> Self {
        let status = if services
            .iter()
            .all(|s| s.status == ServiceStatus::Healthy)
        {
            ServiceStatus::Healthy
        } else {
            ServiceStatus::Unhealthy
        };

        Self {
            status,
            services,
            total_time_ms: total_time.as_millis() as u64,
            version: env!("CARGO_PKG_VERSION"),
        }
    }

    /// Check if overall status is healthy
    pub fn is_healthy(&self) -> bool {
        self.status == ServiceStatus::Healthy
    }
}

/// Health check service for verifying external dependencies
#[derive(Clone)]
pub struct HealthService {
    store: SharedStore,
}

impl HealthService {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// Run every dependency check
    pub async fn check_all(&self) -> HealthCheckResponse {
        let start = Instant::now();
        let database = self.check_database().await;
        HealthCheckResponse::new(vec![database], start.elapsed())
    }

    async fn check_database(&self) -> ServiceHealth {
        let start = Instant::now();
        match tokio::time::timeout(CHECK_TIMEOUT, self.store.ping()).await {
            Ok(Ok(())) => ServiceHealth::healthy("postgres", start.elapsed()),
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "Database health check failed");
                ServiceHealth::unhealthy("postgres", e.to_string())
            }
            Err(_) => {
                tracing::warn!("Database health check timed out");
                ServiceHealth::unhealthy("postgres", "timed out")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_is_unhealthy_if_any_service_is() {
        let response = HealthCheckResponse::new(
            vec![
                ServiceHealth::healthy("postgres", Duration::from_millis(3)),
                ServiceHealth::unhealthy("other", "refused"),
            ],
            Duration::from_millis(4),
        );
        assert!(!response.is_healthy());
    }

    #[test]
    fn test_unhealthy_serializes_error() {
        let json = serde_json::to_value(ServiceHealth::unhealthy("postgres", "refused")).unwrap();
        assert_eq!(json["status"], "unhealthy");
        assert_eq!(json["error"], "refused");
        assert!(json.get("response_time_ms").is_none());
    }
}
