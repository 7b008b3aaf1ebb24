//! PostgreSQL implementation of the hierarchy store
//!
//! Batched lookups bind the key set as a single array parameter
//! (`= ANY($1)`), so each call is one round trip no matter how many parents
//! are being resolved.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::changes::{NewProject, NewTask, ProjectChanges, TaskChanges};
use super::hierarchy::{
    HierarchyStore, Page, Paged, ProjectFilter, StoreResult, TaskFilter,
};
use super::utils::{AREA_COLUMNS, PILLAR_COLUMNS, PROJECT_COLUMNS, TASK_COLUMNS};
use crate::models::{Area, Pillar, Project, Task};

/// Predicates shared by the project page and count queries. Unset filters
/// are bound as NULL and short-circuit.
const PROJECT_FILTER: &str = r#"
    user_id = $1
    AND ($2::text IS NULL OR status = $2)
    AND ($3::text IS NULL OR priority = $3)
    AND ($4::uuid IS NULL OR area_id = $4)
    AND ($5::bool IS NULL OR archived = $5)
"#;

/// Predicates shared by the task page and count queries
const TASK_FILTER: &str = r#"
    user_id = $1
    AND ($2::text IS NULL OR status = $2)
    AND ($3::text IS NULL OR priority = $3)
    AND ($4::uuid IS NULL OR project_id = $4)
    AND ($5::bool IS NULL OR completed = $5)
    AND ($6::bool IS NULL OR (due_date IS NOT NULL) = $6)
"#;

/// sqlx-backed [`HierarchyStore`]
#[derive(Clone)]
pub struct PgHierarchyStore {
    pool: PgPool,
}

impl PgHierarchyStore {
    /// Create a new store over a connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HierarchyStore for PgHierarchyStore {
    async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn pillars_for_user(&self, user_id: Uuid, archived: bool) -> StoreResult<Vec<Pillar>> {
        let sql = format!(
            "SELECT {} FROM pillars WHERE user_id = $1 AND archived = $2 ORDER BY sort_order ASC",
            PILLAR_COLUMNS
        );
        Ok(sqlx::query_as::<_, Pillar>(&sql)
            .bind(user_id)
            .bind(archived)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn areas_for_user(
        &self,
        user_id: Uuid,
        pillar_id: Option<Uuid>,
        archived: bool,
    ) -> StoreResult<Vec<Area>> {
        let sql = format!(
            r#"SELECT {} FROM areas
            WHERE user_id = $1 AND archived = $2 AND ($3::uuid IS NULL OR pillar_id = $3)
            ORDER BY sort_order ASC"#,
            AREA_COLUMNS
        );
        Ok(sqlx::query_as::<_, Area>(&sql)
            .bind(user_id)
            .bind(archived)
            .bind(pillar_id)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn projects_for_user(
        &self,
        user_id: Uuid,
        filter: &ProjectFilter,
        page: Page,
    ) -> StoreResult<Paged<Project>> {
        let status = filter.status.map(|s| s.as_str());
        let priority = filter.priority.map(|p| p.as_str());

        let count_sql = format!("SELECT COUNT(*) FROM projects WHERE {}", PROJECT_FILTER);
        let total_count: i64 = sqlx::query_scalar(&count_sql)
            .bind(user_id)
            .bind(status)
            .bind(priority)
            .bind(filter.area_id)
            .bind(filter.archived)
            .fetch_one(&self.pool)
            .await?;

        let sql = format!(
            "SELECT {} FROM projects WHERE {} ORDER BY created_at DESC LIMIT $6 OFFSET $7",
            PROJECT_COLUMNS, PROJECT_FILTER
        );
        let items = sqlx::query_as::<_, Project>(&sql)
            .bind(user_id)
            .bind(status)
            .bind(priority)
            .bind(filter.area_id)
            .bind(filter.archived)
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(&self.pool)
            .await?;

        Ok(Paged { items, total_count })
    }

    async fn tasks_for_user(
        &self,
        user_id: Uuid,
        filter: &TaskFilter,
        page: Page,
    ) -> StoreResult<Paged<Task>> {
        let status = filter.status.map(|s| s.as_str());
        let priority = filter.priority.map(|p| p.as_str());

        let count_sql = format!("SELECT COUNT(*) FROM tasks WHERE {}", TASK_FILTER);
        let total_count: i64 = sqlx::query_scalar(&count_sql)
            .bind(user_id)
            .bind(status)
            .bind(priority)
            .bind(filter.project_id)
            .bind(filter.completed)
            .bind(filter.has_due_date)
            .fetch_one(&self.pool)
            .await?;

        let sql = format!(
            "SELECT {} FROM tasks WHERE {} ORDER BY created_at DESC LIMIT $7 OFFSET $8",
            TASK_COLUMNS, TASK_FILTER
        );
        let items = sqlx::query_as::<_, Task>(&sql)
            .bind(user_id)
            .bind(status)
            .bind(priority)
            .bind(filter.project_id)
            .bind(filter.completed)
            .bind(filter.has_due_date)
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(&self.pool)
            .await?;

        Ok(Paged { items, total_count })
    }

    async fn project_for_user(&self, user_id: Uuid, id: Uuid) -> StoreResult<Option<Project>> {
        let sql = format!(
            "SELECT {} FROM projects WHERE id = $1 AND user_id = $2",
            PROJECT_COLUMNS
        );
        Ok(sqlx::query_as::<_, Project>(&sql)
            .bind(id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn task_for_user(&self, user_id: Uuid, id: Uuid) -> StoreResult<Option<Task>> {
        let sql = format!(
            "SELECT {} FROM tasks WHERE id = $1 AND user_id = $2",
            TASK_COLUMNS
        );
        Ok(sqlx::query_as::<_, Task>(&sql)
            .bind(id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn area_for_user(&self, user_id: Uuid, id: Uuid) -> StoreResult<Option<Area>> {
        let sql = format!(
            "SELECT {} FROM areas WHERE id = $1 AND user_id = $2",
            AREA_COLUMNS
        );
        Ok(sqlx::query_as::<_, Area>(&sql)
            .bind(id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn all_tasks_for_user(&self, user_id: Uuid) -> StoreResult<Vec<Task>> {
        let sql = format!(
            "SELECT {} FROM tasks WHERE user_id = $1 ORDER BY created_at DESC",
            TASK_COLUMNS
        );
        Ok(sqlx::query_as::<_, Task>(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn all_projects_for_user(&self, user_id: Uuid) -> StoreResult<Vec<Project>> {
        let sql = format!(
            "SELECT {} FROM projects WHERE user_id = $1 ORDER BY created_at DESC",
            PROJECT_COLUMNS
        );
        Ok(sqlx::query_as::<_, Project>(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn create_task(&self, user_id: Uuid, task: &NewTask) -> StoreResult<Task> {
        let sql = format!(
            r#"
            INSERT INTO tasks (
                id, user_id, project_id, name, description, priority,
                due_date, estimated_duration, status, completed, sort_order,
                created_at, updated_at
            )
            VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8, 'todo', FALSE,
                (SELECT COALESCE(MAX(sort_order) + 1, 0) FROM tasks WHERE project_id = $3),
                NOW(), NOW()
            )
            RETURNING {}
            "#,
            TASK_COLUMNS
        );
        Ok(sqlx::query_as::<_, Task>(&sql)
            .bind(Uuid::new_v4())
            .bind(user_id)
            .bind(task.project_id)
            .bind(&task.name)
            .bind(task.description.as_deref())
            .bind(task.priority.as_str())
            .bind(task.due_date)
            .bind(task.estimated_duration)
            .fetch_one(&self.pool)
            .await?)
    }

    async fn update_task(
        &self,
        user_id: Uuid,
        id: Uuid,
        changes: &TaskChanges,
    ) -> StoreResult<Option<Task>> {
        let sql = format!(
            r#"
            UPDATE tasks SET
                name = COALESCE($3, name),
                description = COALESCE($4, description),
                status = COALESCE($5, status),
                priority = COALESCE($6, priority),
                due_date = COALESCE($7, due_date),
                completed = COALESCE($8, completed),
                completed_at = CASE
                    WHEN $8::bool IS NULL THEN completed_at
                    WHEN $8 THEN COALESCE(completed_at, NOW())
                    ELSE NULL
                END,
                updated_at = NOW()
            WHERE id = $1 AND user_id = $2
            RETURNING {}
            "#,
            TASK_COLUMNS
        );
        Ok(sqlx::query_as::<_, Task>(&sql)
            .bind(id)
            .bind(user_id)
            .bind(changes.name.as_deref())
            .bind(changes.description.as_deref())
            .bind(changes.status.map(|s| s.as_str()))
            .bind(changes.priority.map(|p| p.as_str()))
            .bind(changes.due_date)
            .bind(changes.completed)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn toggle_task_completion(&self, user_id: Uuid, id: Uuid) -> StoreResult<Option<Task>> {
        // Right-hand sides see the row as it was before the update
        let sql = format!(
            r#"
            UPDATE tasks SET
                completed = NOT completed,
                status = CASE WHEN completed THEN 'todo' ELSE 'completed' END,
                completed_at = CASE WHEN completed THEN NULL ELSE NOW() END,
                updated_at = NOW()
            WHERE id = $1 AND user_id = $2
            RETURNING {}
            "#,
            TASK_COLUMNS
        );
        Ok(sqlx::query_as::<_, Task>(&sql)
            .bind(id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn delete_task(&self, user_id: Uuid, id: Uuid) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn create_project(&self, user_id: Uuid, project: &NewProject) -> StoreResult<Project> {
        let sql = format!(
            r#"
            INSERT INTO projects (
                id, user_id, area_id, name, description, icon, deadline,
                priority, importance, status, completion_percentage, archived,
                sort_order, created_at, updated_at
            )
            VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8, $9, 'Not Started', 0, FALSE,
                (SELECT COALESCE(MAX(sort_order) + 1, 0) FROM projects WHERE area_id = $3),
                NOW(), NOW()
            )
            RETURNING {}
            "#,
            PROJECT_COLUMNS
        );
        Ok(sqlx::query_as::<_, Project>(&sql)
            .bind(Uuid::new_v4())
            .bind(user_id)
            .bind(project.area_id)
            .bind(&project.name)
            .bind(project.description.as_deref())
            .bind(project.icon.as_deref())
            .bind(project.deadline)
            .bind(project.priority.as_str())
            .bind(project.importance)
            .fetch_one(&self.pool)
            .await?)
    }

    async fn update_project(
        &self,
        user_id: Uuid,
        id: Uuid,
        changes: &ProjectChanges,
    ) -> StoreResult<Option<Project>> {
        let sql = format!(
            r#"
            UPDATE projects SET
                name = COALESCE($3, name),
                description = COALESCE($4, description),
                status = COALESCE($5, status),
                priority = COALESCE($6, priority),
                deadline = COALESCE($7, deadline),
                completion_percentage = COALESCE($8, completion_percentage),
                updated_at = NOW()
            WHERE id = $1 AND user_id = $2
            RETURNING {}
            "#,
            PROJECT_COLUMNS
        );
        Ok(sqlx::query_as::<_, Project>(&sql)
            .bind(id)
            .bind(user_id)
            .bind(changes.name.as_deref())
            .bind(changes.description.as_deref())
            .bind(changes.status.map(|s| s.as_str()))
            .bind(changes.priority.map(|p| p.as_str()))
            .bind(changes.deadline)
            .bind(changes.completion_percentage)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn pillars_by_ids(&self, ids: &[Uuid]) -> StoreResult<Vec<Pillar>> {
        let sql = format!("SELECT {} FROM pillars WHERE id = ANY($1)", PILLAR_COLUMNS);
        Ok(sqlx::query_as::<_, Pillar>(&sql)
            .bind(ids)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn areas_by_ids(&self, ids: &[Uuid]) -> StoreResult<Vec<Area>> {
        let sql = format!("SELECT {} FROM areas WHERE id = ANY($1)", AREA_COLUMNS);
        Ok(sqlx::query_as::<_, Area>(&sql)
            .bind(ids)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn projects_by_ids(&self, ids: &[Uuid]) -> StoreResult<Vec<Project>> {
        let sql = format!("SELECT {} FROM projects WHERE id = ANY($1)", PROJECT_COLUMNS);
        Ok(sqlx::query_as::<_, Project>(&sql)
            .bind(ids)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn areas_by_pillars(&self, pillar_ids: &[Uuid]) -> StoreResult<Vec<Area>> {
        let sql = format!(
            "SELECT {} FROM areas WHERE pillar_id = ANY($1) AND archived = FALSE ORDER BY sort_order ASC",
            AREA_COLUMNS
        );
        Ok(sqlx::query_as::<_, Area>(&sql)
            .bind(pillar_ids)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn projects_by_areas(&self, area_ids: &[Uuid]) -> StoreResult<Vec<Project>> {
        let sql = format!(
            "SELECT {} FROM projects WHERE area_id = ANY($1) AND archived = FALSE ORDER BY sort_order ASC",
            PROJECT_COLUMNS
        );
        Ok(sqlx::query_as::<_, Project>(&sql)
            .bind(area_ids)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn tasks_by_projects(&self, project_ids: &[Uuid]) -> StoreResult<Vec<Task>> {
        let sql = format!(
            "SELECT {} FROM tasks WHERE project_id = ANY($1) ORDER BY sort_order ASC",
            TASK_COLUMNS
        );
        Ok(sqlx::query_as::<_, Task>(&sql)
            .bind(project_ids)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn subtasks_by_parents(&self, task_ids: &[Uuid]) -> StoreResult<Vec<Task>> {
        let sql = format!(
            "SELECT {} FROM tasks WHERE parent_task_id = ANY($1) ORDER BY sort_order ASC",
            TASK_COLUMNS
        );
        Ok(sqlx::query_as::<_, Task>(&sql)
            .bind(task_ids)
            .fetch_all(&self.pool)
            .await?)
    }
}
