//! Database models for the Aurum hierarchy
//!
//! Rows are decoded straight from the hosted Postgres tables with
//! `sqlx::FromRow`. Every entity carries its own `id` plus the foreign key
//! that links it to its parent:
//! - Pillar (owned by a user)
//! - Area (`pillar_id`)
//! - Project (`area_id`)
//! - Task (`project_id`, optionally `parent_task_id`)

pub mod area;
pub mod enums;
pub mod pillar;
pub mod project;
pub mod task;

pub use area::Area;
pub use enums::{Priority, ProjectStatus, TaskStatus};
pub use pillar::Pillar;
pub use project::Project;
pub use task::Task;
