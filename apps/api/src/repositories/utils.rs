//! Shared SQL fragments for the hierarchy tables
//!
//! These constants define the SELECT column lists for each entity type so
//! that every query decodes into the same row struct.

/// SQL columns for pillar queries
pub const PILLAR_COLUMNS: &str = r#"
    id, user_id, name, description, icon, color,
    sort_order, archived,
    time_allocation_percentage, vision_statement,
    created_at, updated_at
"#;

/// SQL columns for area queries
pub const AREA_COLUMNS: &str = r#"
    id, user_id, pillar_id, name, description, icon, color,
    importance, archived, sort_order,
    created_at, updated_at
"#;

/// SQL columns for project queries
pub const PROJECT_COLUMNS: &str = r#"
    id, user_id, area_id, name, description, icon,
    deadline, status, priority, importance,
    completion_percentage, archived, sort_order,
    created_at, updated_at
"#;

/// SQL columns for task queries
pub const TASK_COLUMNS: &str = r#"
    id, user_id, project_id, parent_task_id, name, description,
    status, priority, due_date, reminder_date,
    completed, completed_at, estimated_duration, sort_order,
    created_at, updated_at
"#;

/// Offset of the first row after `page`, used for `has_next_page`
pub fn next_offset(limit: i64, offset: i64) -> i64 {
    offset.saturating_add(limit)
}
