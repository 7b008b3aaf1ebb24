//! Services used by the GraphQL and HTTP layers
//!
//! - Access token verification
//! - Dashboard summaries
//! - Dependency health checks

pub mod auth;
pub mod dashboard;
pub mod health;

pub use auth::{Claims, TokenVerifier, Viewer};
pub use dashboard::{Dashboard, DashboardService};
pub use health::HealthService;
