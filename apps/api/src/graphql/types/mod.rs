//! GraphQL object types for the Aurum hierarchy
//!
//! Each type wraps its database row. Relationship fields resolve through the
//! request's [`Loaders`](crate::graphql::loaders::Loaders), never the store
//! directly.

mod area;
mod connection;
mod dashboard;
mod enums;
mod inputs;
mod pillar;
mod project;
mod task;
mod user;

pub use area::Area;
pub use connection::{ProjectConnection, TaskConnection};
pub use dashboard::{DashboardData, ProjectStats, TaskStats, UserStats};
pub use enums::{Priority, ProjectStatus, TaskStatus};
pub use inputs::{ProjectFilterInput, TaskFilterInput};
pub use pillar::Pillar;
pub use project::Project;
pub use task::Task;
pub use user::User;
