//! GraphQL mutations for Aurum
//!
//! Writes are scoped to the viewer exactly like queries: a task or project
//! owned by someone else is reported as not found.

mod project;
mod task;

pub use project::{CreateProjectInput, ProjectMutation, ProjectMutationResponse, UpdateProjectInput};
pub use task::{CreateTaskInput, TaskMutation, TaskMutationResponse, UpdateTaskInput};

use async_graphql::MergedObject;

use crate::error::{ApiError, ApiResult};

/// Maximum length of a task or project name
const MAX_NAME_LENGTH: usize = 255;

/// Maximum length of a task or project description
const MAX_DESCRIPTION_LENGTH: usize = 2000;

/// Root mutation type combining all mutation domains
#[derive(MergedObject, Default)]
pub struct Mutation(TaskMutation, ProjectMutation);

/// Trimmed name, rejected when blank or too long
fn validate_name(name: &str) -> ApiResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ApiError::ValidationError("Name cannot be empty".to_string()));
    }
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(ApiError::ValidationError(format!(
            "Name cannot exceed {} characters",
            MAX_NAME_LENGTH
        )));
    }
    Ok(name.to_string())
}

fn validate_description(description: Option<&str>) -> ApiResult<()> {
    match description {
        Some(d) if d.chars().count() > MAX_DESCRIPTION_LENGTH => Err(ApiError::ValidationError(
            format!("Description cannot exceed {} characters", MAX_DESCRIPTION_LENGTH),
        )),
        _ => Ok(()),
    }
}
