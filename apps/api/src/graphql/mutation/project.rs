//! Project mutations for the Aurum GraphQL API

use async_graphql::{Context, InputObject, Object, Result, SimpleObject};
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::{validate_description, validate_name};
use crate::error::{ApiError, ApiResult};
use crate::graphql::types::{Priority, Project, ProjectStatus};
use crate::graphql::{require_viewer, to_graphql_error};
use crate::repositories::{NewProject, ProjectChanges, SharedStore};

/// Importance applied when the input omits it
const DEFAULT_IMPORTANCE: i32 = 3;

/// Input for creating a project
#[derive(Debug, InputObject)]
pub struct CreateProjectInput {
    /// Area the project belongs to
    pub area_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub deadline: Option<DateTime<Utc>>,
    #[graphql(default_with = "Priority::Medium")]
    pub priority: Priority,
    /// 1 (low) to 5 (high)
    #[graphql(default_with = "DEFAULT_IMPORTANCE")]
    pub importance: i32,
}

/// Input for updating a project; omitted fields are left unchanged
#[derive(Debug, InputObject)]
pub struct UpdateProjectInput {
    pub id: Uuid,
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<ProjectStatus>,
    pub priority: Option<Priority>,
    pub deadline: Option<DateTime<Utc>>,
    /// 0 to 100
    pub completion_percentage: Option<f64>,
}

/// Outcome of a project mutation
#[derive(SimpleObject)]
pub struct ProjectMutationResponse {
    pub success: bool,
    pub message: String,
    pub project: Option<Project>,
}

fn validate_importance(importance: i32) -> ApiResult<()> {
    if (1..=5).contains(&importance) {
        Ok(())
    } else {
        Err(ApiError::ValidationError(
            "Importance must be between 1 and 5".to_string(),
        ))
    }
}

fn validate_completion(completion: Option<f64>) -> ApiResult<()> {
    match completion {
        Some(value) if !(0.0..=100.0).contains(&value) => Err(ApiError::ValidationError(
            "Completion percentage must be between 0 and 100".to_string(),
        )),
        _ => Ok(()),
    }
}

/// Project mutations
#[derive(Default)]
pub struct ProjectMutation;

#[Object]
impl ProjectMutation {
    /// Create a new project at the end of an area
    ///
    /// Fails with `NOT_FOUND` when the area does not belong to the viewer.
    async fn create_project(
        &self,
        ctx: &Context<'_>,
        input: CreateProjectInput,
    ) -> Result<ProjectMutationResponse> {
        let viewer = require_viewer(ctx)?;
        let name = validate_name(&input.name).map_err(to_graphql_error)?;
        validate_description(input.description.as_deref()).map_err(to_graphql_error)?;
        validate_importance(input.importance).map_err(to_graphql_error)?;

        let store = ctx.data::<SharedStore>()?;
        store
            .area_for_user(viewer.user_id, input.area_id)
            .await
            .map_err(to_graphql_error)?
            .ok_or_else(|| to_graphql_error(ApiError::not_found("area", input.area_id)))?;

        let new_project = NewProject {
            area_id: input.area_id,
            name,
            description: input.description,
            icon: input.icon,
            deadline: input.deadline,
            priority: input.priority.into(),
            importance: input.importance,
        };
        let project = store
            .create_project(viewer.user_id, &new_project)
            .await
            .map_err(to_graphql_error)?;

        tracing::info!(project_id = %project.id, area_id = %project.area_id, "Project created");
        Ok(ProjectMutationResponse {
            success: true,
            message: "Project created successfully".to_string(),
            project: Some(project.into()),
        })
    }

    /// Update an existing project
    async fn update_project(
        &self,
        ctx: &Context<'_>,
        input: UpdateProjectInput,
    ) -> Result<ProjectMutationResponse> {
        let viewer = require_viewer(ctx)?;
        let name = input
            .name
            .as_deref()
            .map(validate_name)
            .transpose()
            .map_err(to_graphql_error)?;
        validate_description(input.description.as_deref()).map_err(to_graphql_error)?;
        validate_completion(input.completion_percentage).map_err(to_graphql_error)?;

        let changes = ProjectChanges {
            name,
            description: input.description,
            status: input.status.map(Into::into),
            priority: input.priority.map(Into::into),
            deadline: input.deadline,
            completion_percentage: input.completion_percentage,
        };
        if changes.is_empty() {
            return Err(to_graphql_error(ApiError::ValidationError(
                "No fields to update".to_string(),
            )));
        }

        let store = ctx.data::<SharedStore>()?;
        let updated = store
            .update_project(viewer.user_id, input.id, &changes)
            .await
            .map_err(to_graphql_error)?;

        Ok(match updated {
            Some(project) => ProjectMutationResponse {
                success: true,
                message: "Project updated successfully".to_string(),
                project: Some(project.into()),
            },
            None => ProjectMutationResponse {
                success: false,
                message: "Project not found".to_string(),
                project: None,
            },
        })
    }
}
