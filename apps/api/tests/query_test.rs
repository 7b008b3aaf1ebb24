//! Integration tests for the root queries

mod common;

use std::sync::Arc;

use aurum_api::models::{Priority, ProjectStatus};
use rstest::rstest;
use serde_json::json;
use uuid::Uuid;

use common::*;

#[rstest]
#[case("{ pillars { id } }")]
#[case("{ areas { id } }")]
#[case("{ projects { totalCount } }")]
#[case("{ tasks { totalCount } }")]
#[tokio::test]
async fn test_root_queries_require_authentication(#[case] query: &str) {
    let store = Arc::new(MockHierarchyStore::new());

    let response = execute(&store, None, query).await;

    assert_eq!(response.errors.len(), 1);
    assert_eq!(response.errors[0].message, "Authentication required");
    assert!(store.calls().is_empty());
}

#[tokio::test]
async fn test_pillars_are_scoped_to_viewer() {
    let alice = Uuid::new_v4();
    let bob = Uuid::new_v4();
    let store = Arc::new(MockHierarchyStore::new().with_pillars([
        pillar(alice, "Health", 1),
        pillar(alice, "Career", 0),
        pillar(bob, "Hobbies", 0),
    ]));

    let data = data(execute(&store, Some(alice), "{ pillars { name } }").await);

    assert_eq!(
        data,
        json!({ "pillars": [{ "name": "Career" }, { "name": "Health" }] })
    );
}

#[tokio::test]
async fn test_archived_pillars_are_opt_in() {
    let user = Uuid::new_v4();
    let mut old = pillar(user, "Old", 0);
    old.archived = true;
    let store = Arc::new(MockHierarchyStore::new().with_pillars([old, pillar(user, "New", 1)]));

    let active = data(execute(&store, Some(user), "{ pillars { name } }").await);
    let archived = data(execute(&store, Some(user), "{ pillars(archived: true) { name } }").await);

    assert_eq!(active, json!({ "pillars": [{ "name": "New" }] }));
    assert_eq!(archived, json!({ "pillars": [{ "name": "Old" }] }));
}

#[tokio::test]
async fn test_archived_children_are_hidden_from_relationships() {
    let user = Uuid::new_v4();
    let health = pillar(user, "Health", 0);
    let mut retired = area(user, Some(health.id), "Retired", 0);
    retired.archived = true;
    let store = Arc::new(
        MockHierarchyStore::new()
            .with_pillars([health.clone()])
            .with_areas([retired, area(user, Some(health.id), "Fitness", 1)]),
    );

    let data = data(execute(&store, Some(user), "{ pillars { areas { name } } }").await);

    assert_eq!(data["pillars"][0]["areas"], json!([{ "name": "Fitness" }]));
}

#[tokio::test]
async fn test_areas_filtered_by_pillar() {
    let user = Uuid::new_v4();
    let health = pillar(user, "Health", 0);
    let store = Arc::new(MockHierarchyStore::new().with_areas([
        area(user, Some(health.id), "Fitness", 0),
        area(user, None, "Inbox", 1),
    ]));

    let query = format!(r#"{{ areas(pillarId: "{}") {{ name pillarId }} }}"#, health.id);
    let data = data(execute(&store, Some(user), &query).await);

    assert_eq!(
        data,
        json!({ "areas": [{ "name": "Fitness", "pillarId": health.id }] })
    );
}

#[rstest]
#[case(0, 2, 2, true)]
#[case(2, 2, 2, true)]
#[case(4, 2, 1, false)]
#[case(10, 2, 0, false)]
#[tokio::test]
async fn test_projects_pagination(
    #[case] offset: i32,
    #[case] limit: i32,
    #[case] expected_len: usize,
    #[case] expected_has_next: bool,
) {
    let user = Uuid::new_v4();
    let area_id = Uuid::new_v4();
    let projects = (0..5).map(|i| {
        let mut p = project(user, area_id, &format!("Project {}", i), i);
        p.created_at = minutes_ago(i as i64);
        p
    });
    let store = Arc::new(MockHierarchyStore::new().with_projects(projects));

    let query = format!(
        "{{ projects(pagination: {{ limit: {}, offset: {} }}) {{ projects {{ name }} totalCount hasNextPage }} }}",
        limit, offset
    );
    let data = data(execute(&store, Some(user), &query).await);

    assert_eq!(data["projects"]["totalCount"], 5);
    assert_eq!(data["projects"]["hasNextPage"], expected_has_next);
    assert_eq!(
        data["projects"]["projects"].as_array().unwrap().len(),
        expected_len
    );
}

#[tokio::test]
async fn test_projects_newest_first_with_default_page() {
    let user = Uuid::new_v4();
    let area_id = Uuid::new_v4();
    let mut older = project(user, area_id, "Older", 0);
    older.created_at = minutes_ago(10);
    let newer = project(user, area_id, "Newer", 1);
    let store = Arc::new(MockHierarchyStore::new().with_projects([older, newer]));

    let data = data(
        execute(&store, Some(user), "{ projects { projects { name } hasNextPage } }").await,
    );

    assert_eq!(
        data,
        json!({
            "projects": {
                "projects": [{ "name": "Newer" }, { "name": "Older" }],
                "hasNextPage": false,
            }
        })
    );
}

#[tokio::test]
async fn test_projects_filter() {
    let user = Uuid::new_v4();
    let area_id = Uuid::new_v4();
    let mut urgent = project(user, area_id, "Urgent", 0);
    urgent.priority = Priority::High;
    urgent.status = ProjectStatus::InProgress;
    let mut shelved = project(user, area_id, "Shelved", 1);
    shelved.priority = Priority::High;
    shelved.archived = true;
    let store = Arc::new(MockHierarchyStore::new().with_projects([
        urgent,
        shelved,
        project(user, area_id, "Someday", 2),
    ]));

    let query = r#"{
        projects(filter: { priority: HIGH }) { projects { name status priority } totalCount }
    }"#;
    let data = data(execute(&store, Some(user), query).await);

    assert_eq!(
        data,
        json!({
            "projects": {
                "projects": [{ "name": "Urgent", "status": "IN_PROGRESS", "priority": "HIGH" }],
                "totalCount": 1,
            }
        })
    );
}

#[tokio::test]
async fn test_tasks_filter_by_due_date() {
    let user = Uuid::new_v4();
    let project_id = Uuid::new_v4();
    let mut overdue = task(user, project_id, "File taxes", 0);
    overdue.due_date = Some(minutes_ago(60));
    let store = Arc::new(
        MockHierarchyStore::new()
            .with_tasks([overdue, task(user, project_id, "Read a book", 1)]),
    );

    let query = r#"{
        tasks(filter: { hasDueDate: true }) { tasks { name isOverdue } totalCount hasNextPage }
    }"#;
    let data = data(execute(&store, Some(user), query).await);

    assert_eq!(
        data,
        json!({
            "tasks": {
                "tasks": [{ "name": "File taxes", "isOverdue": true }],
                "totalCount": 1,
                "hasNextPage": false,
            }
        })
    );
}

#[tokio::test]
async fn test_single_lookups_are_scoped_to_viewer() {
    let alice = Uuid::new_v4();
    let bob = Uuid::new_v4();
    let theirs = project(bob, Uuid::new_v4(), "Bob's", 0);
    let mine = project(alice, Uuid::new_v4(), "Alice's", 0);
    let store = Arc::new(
        MockHierarchyStore::new().with_projects([theirs.clone(), mine.clone()]),
    );

    let query = format!(
        r#"{{ mine: project(id: "{}") {{ name }} theirs: project(id: "{}") {{ name }} }}"#,
        mine.id, theirs.id
    );
    let data = data(execute(&store, Some(alice), &query).await);

    assert_eq!(
        data,
        json!({ "mine": { "name": "Alice's" }, "theirs": null })
    );
}

#[tokio::test]
async fn test_task_walks_up_and_down() {
    let user = Uuid::new_v4();
    let area_id = Uuid::new_v4();
    let launch = project(user, area_id, "Launch", 0);
    let parent = task(user, launch.id, "Ship", 0);
    let child = subtask(&parent, "Write notes", 0);
    let store = Arc::new(
        MockHierarchyStore::new()
            .with_projects([launch.clone()])
            .with_tasks([parent.clone(), child]),
    );

    let query = format!(
        r#"{{ task(id: "{}") {{ name project {{ name }} subtasks {{ name parentTaskId }} }} }}"#,
        parent.id
    );
    let data = data(execute(&store, Some(user), &query).await);

    assert_eq!(
        data,
        json!({
            "task": {
                "name": "Ship",
                "project": { "name": "Launch" },
                "subtasks": [{ "name": "Write notes", "parentTaskId": parent.id }],
            }
        })
    );
}

#[tokio::test]
async fn test_me_is_null_for_anonymous_requests() {
    let store = Arc::new(MockHierarchyStore::new());

    let anonymous = data(execute(&store, None, "{ me { id } }").await);
    let user = Uuid::new_v4();
    let signed_in = data(execute(&store, Some(user), "{ me { id email } }").await);

    assert_eq!(anonymous, json!({ "me": null }));
    assert_eq!(signed_in, json!({ "me": { "id": user, "email": null } }));
    assert!(store.calls().is_empty());
}

#[tokio::test]
async fn test_dashboard_requires_authentication() {
    let store = Arc::new(MockHierarchyStore::new());

    let response = execute(&store, None, "{ dashboard { recentTasks { id } } }").await;

    assert_eq!(response.errors[0].message, "Authentication required");
    assert!(store.calls().is_empty());
}

#[tokio::test]
async fn test_dashboard_summarizes_viewer_rows() {
    let user = Uuid::new_v4();
    let health = pillar(user, "Health", 0);
    let fitness = area(user, Some(health.id), "Fitness", 0);
    let mut marathon = project(user, fitness.id, "Marathon", 0);
    marathon.status = ProjectStatus::InProgress;
    marathon.completion_percentage = 50.0;
    let mut done = task(user, marathon.id, "Buy shoes", 0);
    done.completed = true;
    done.created_at = minutes_ago(30);
    let mut late = task(user, marathon.id, "Register", 1);
    late.due_date = Some(minutes_ago(60 * 24));
    late.created_at = minutes_ago(20);
    let fresh = task(user, marathon.id, "Plan route", 2);
    let store = Arc::new(
        MockHierarchyStore::new()
            .with_pillars([health, pillar(Uuid::new_v4(), "Not mine", 0)])
            .with_areas([fitness])
            .with_projects([marathon])
            .with_tasks([done, late, fresh, task(Uuid::new_v4(), Uuid::new_v4(), "Not mine", 0)]),
    );

    let data = data(
        execute(
            &store,
            Some(user),
            r#"{
                dashboard {
                    userStats {
                        totalPillars totalAreas
                        taskStats { total completed overdue }
                        projectStats { total inProgress averageCompletion }
                    }
                    recentTasks { name }
                    upcomingDeadlines { name }
                }
            }"#,
        )
        .await,
    );

    assert_eq!(
        data["dashboard"],
        json!({
            "userStats": {
                "totalPillars": 1,
                "totalAreas": 1,
                "taskStats": { "total": 3, "completed": 1, "overdue": 1 },
                "projectStats": { "total": 1, "inProgress": 1, "averageCompletion": 50.0 },
            },
            "recentTasks": [{ "name": "Plan route" }, { "name": "Register" }],
            "upcomingDeadlines": [{ "name": "Register" }],
        })
    );
    assert_eq!(store.calls_to("all_tasks_for_user"), vec![vec![user]]);
}
