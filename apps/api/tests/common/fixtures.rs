//! Test fixtures for API integration tests
//!
//! Rows are built with sensible defaults; tests tweak the public fields they
//! care about.

#![allow(dead_code)]

use chrono::{DateTime, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::json;
use uuid::Uuid;

use aurum_api::models::{Area, Pillar, Priority, Project, ProjectStatus, Task, TaskStatus};

/// Secret shared by the test verifier and [`access_token`]
pub const TEST_JWT_SECRET: &str = "test-secret-that-is-at-least-32-characters";

pub fn pillar(user_id: Uuid, name: &str, sort_order: i32) -> Pillar {
    let now = Utc::now();
    Pillar {
        id: Uuid::new_v4(),
        user_id,
        name: name.to_string(),
        description: None,
        icon: None,
        color: Some("#F4B400".to_string()),
        sort_order,
        archived: false,
        time_allocation_percentage: None,
        vision_statement: None,
        created_at: now,
        updated_at: now,
    }
}

pub fn area(user_id: Uuid, pillar_id: Option<Uuid>, name: &str, sort_order: i32) -> Area {
    let now = Utc::now();
    Area {
        id: Uuid::new_v4(),
        user_id,
        pillar_id,
        name: name.to_string(),
        description: None,
        icon: None,
        color: None,
        importance: 3,
        archived: false,
        sort_order,
        created_at: now,
        updated_at: now,
    }
}

pub fn project(user_id: Uuid, area_id: Uuid, name: &str, sort_order: i32) -> Project {
    let now = Utc::now();
    Project {
        id: Uuid::new_v4(),
        user_id,
        area_id,
        name: name.to_string(),
        description: None,
        icon: None,
        deadline: None,
        status: ProjectStatus::NotStarted,
        priority: Priority::Medium,
        importance: 3,
        completion_percentage: 0.0,
        archived: false,
        sort_order,
        created_at: now,
        updated_at: now,
    }
}

pub fn task(user_id: Uuid, project_id: Uuid, name: &str, sort_order: i32) -> Task {
    let now = Utc::now();
    Task {
        id: Uuid::new_v4(),
        user_id,
        project_id,
        parent_task_id: None,
        name: name.to_string(),
        description: None,
        status: TaskStatus::Todo,
        priority: Priority::Medium,
        due_date: None,
        reminder_date: None,
        completed: false,
        completed_at: None,
        estimated_duration: None,
        sort_order,
        created_at: now,
        updated_at: now,
    }
}

pub fn subtask(parent: &Task, name: &str, sort_order: i32) -> Task {
    Task {
        parent_task_id: Some(parent.id),
        ..task(parent.user_id, parent.project_id, name, sort_order)
    }
}

/// Created `minutes` before now, for ordering-sensitive tests
pub fn minutes_ago(minutes: i64) -> DateTime<Utc> {
    Utc::now() - chrono::Duration::minutes(minutes)
}

/// Access token for `user_id` as the auth provider would issue it
pub fn access_token(user_id: Uuid) -> String {
    let claims = json!({
        "sub": user_id,
        "email": "viewer@example.com",
        "role": "authenticated",
        "aud": "authenticated",
        "exp": Utc::now().timestamp() + 3600,
    });
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_JWT_SECRET.as_bytes()),
    )
    .expect("failed to sign test token")
}
