//! Task mutations for the Aurum GraphQL API
//!
//! - createTask: add a task to one of the viewer's projects
//! - updateTask: change any subset of a task's fields
//! - toggleTaskCompletion: flip a task between done and todo
//! - deleteTask: remove a task

use async_graphql::{Context, InputObject, Object, Result, SimpleObject};
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::{validate_description, validate_name};
use crate::error::ApiError;
use crate::graphql::types::{Priority, Task, TaskStatus};
use crate::graphql::{require_viewer, to_graphql_error};
use crate::models::Task as DbTask;
use crate::repositories::{NewTask, SharedStore, TaskChanges};

/// Input for creating a task
#[derive(Debug, InputObject)]
pub struct CreateTaskInput {
    /// Project the task belongs to
    pub project_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    #[graphql(default_with = "Priority::Medium")]
    pub priority: Priority,
    pub due_date: Option<DateTime<Utc>>,
    /// Estimated duration in minutes
    pub estimated_duration: Option<i32>,
}

/// Input for updating a task; omitted fields are left unchanged
#[derive(Debug, InputObject)]
pub struct UpdateTaskInput {
    pub id: Uuid,
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    pub priority: Option<Priority>,
    pub due_date: Option<DateTime<Utc>>,
    pub completed: Option<bool>,
}

/// Outcome of a task mutation
#[derive(SimpleObject)]
pub struct TaskMutationResponse {
    pub success: bool,
    pub message: String,
    /// The task after the change; absent on failure and after deletion
    pub task: Option<Task>,
}

impl TaskMutationResponse {
    fn ok(message: &str, task: Option<DbTask>) -> Self {
        Self {
            success: true,
            message: message.to_string(),
            task: task.map(Task::from),
        }
    }

    fn not_found() -> Self {
        Self {
            success: false,
            message: "Task not found".to_string(),
            task: None,
        }
    }
}

/// Task mutations
#[derive(Default)]
pub struct TaskMutation;

#[Object]
impl TaskMutation {
    /// Create a new task at the end of a project
    ///
    /// Fails with `NOT_FOUND` when the project does not belong to the viewer.
    async fn create_task(
        &self,
        ctx: &Context<'_>,
        input: CreateTaskInput,
    ) -> Result<TaskMutationResponse> {
        let viewer = require_viewer(ctx)?;
        let name = validate_name(&input.name).map_err(to_graphql_error)?;
        validate_description(input.description.as_deref()).map_err(to_graphql_error)?;
        if input.estimated_duration.is_some_and(|minutes| minutes < 0) {
            return Err(to_graphql_error(ApiError::ValidationError(
                "Estimated duration cannot be negative".to_string(),
            )));
        }

        let store = ctx.data::<SharedStore>()?;
        store
            .project_for_user(viewer.user_id, input.project_id)
            .await
            .map_err(to_graphql_error)?
            .ok_or_else(|| to_graphql_error(ApiError::not_found("project", input.project_id)))?;

        let new_task = NewTask {
            project_id: input.project_id,
            name,
            description: input.description,
            priority: input.priority.into(),
            due_date: input.due_date,
            estimated_duration: input.estimated_duration,
        };
        let task = store
            .create_task(viewer.user_id, &new_task)
            .await
            .map_err(to_graphql_error)?;

        tracing::info!(task_id = %task.id, project_id = %task.project_id, "Task created");
        Ok(TaskMutationResponse::ok("Task created successfully", Some(task)))
    }

    /// Update an existing task
    ///
    /// Setting `completed` stamps or clears the completion time.
    async fn update_task(
        &self,
        ctx: &Context<'_>,
        input: UpdateTaskInput,
    ) -> Result<TaskMutationResponse> {
        let viewer = require_viewer(ctx)?;
        let name = input
            .name
            .as_deref()
            .map(validate_name)
            .transpose()
            .map_err(to_graphql_error)?;
        validate_description(input.description.as_deref()).map_err(to_graphql_error)?;

        let changes = TaskChanges {
            name,
            description: input.description,
            status: input.status.map(Into::into),
            priority: input.priority.map(Into::into),
            due_date: input.due_date,
            completed: input.completed,
        };
        if changes.is_empty() {
            return Err(to_graphql_error(ApiError::ValidationError(
                "No fields to update".to_string(),
            )));
        }

        let store = ctx.data::<SharedStore>()?;
        let updated = store
            .update_task(viewer.user_id, input.id, &changes)
            .await
            .map_err(to_graphql_error)?;

        Ok(match updated {
            Some(task) => TaskMutationResponse::ok("Task updated successfully", Some(task)),
            None => TaskMutationResponse::not_found(),
        })
    }

    /// Mark an open task completed, or reopen a completed one
    async fn toggle_task_completion(
        &self,
        ctx: &Context<'_>,
        id: Uuid,
    ) -> Result<TaskMutationResponse> {
        let viewer = require_viewer(ctx)?;
        let store = ctx.data::<SharedStore>()?;
        let toggled = store
            .toggle_task_completion(viewer.user_id, id)
            .await
            .map_err(to_graphql_error)?;

        Ok(match toggled {
            Some(task) => {
                let message = if task.completed {
                    "Task completed successfully"
                } else {
                    "Task reopened successfully"
                };
                TaskMutationResponse::ok(message, Some(task))
            }
            None => TaskMutationResponse::not_found(),
        })
    }

    /// Delete a task
    async fn delete_task(&self, ctx: &Context<'_>, id: Uuid) -> Result<TaskMutationResponse> {
        let viewer = require_viewer(ctx)?;
        let store = ctx.data::<SharedStore>()?;
        let deleted = store
            .delete_task(viewer.user_id, id)
            .await
            .map_err(to_graphql_error)?;

        if deleted {
            tracing::info!(task_id = %id, "Task deleted");
            Ok(TaskMutationResponse::ok("Task deleted successfully", None))
        } else {
            Ok(TaskMutationResponse::not_found())
        }
    }
}
