//! HTTP-level integration tests for the project-scoped `/tasks` resource.
//!
//! Covers creation defaults, the one-shot `completed_at` stamp, append-only
//! notes, project scoping, and role gating.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, create_test_user, delete_auth, get_auth, post_json_auth, put_json_auth, token_for,
};
use crestline_core::roles::Role;
use crestline_db::models::project::CreateProject;
use crestline_db::models::user::User;
use crestline_db::repositories::ProjectRepo;
use sqlx::PgPool;

/// Insert a project directly and return its id.
async fn seed_project(pool: &PgPool, owner: &User) -> i64 {
    let input = CreateProject {
        title: "Harbor Offices".to_string(),
        description: "Fit-out".to_string(),
        location: "Dockside".to_string(),
        category: "commercial".to_string(),
        status: crestline_core::status::ProjectStatus::Ongoing,
        area: "10,000 sq ft".to_string(),
        square_feet: Some(10_000),
        timeline: "2026".to_string(),
        images: None,
        progress: None,
    };
    ProjectRepo::create(pool, &input, owner.id)
        .await
        .expect("project creation should succeed")
        .id
}

/// Task creation defaults status to pending and priority to medium.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_applies_defaults(pool: PgPool) {
    let (manager, _) = create_test_user(&pool, "manager@crestline.test", Role::Manager).await;
    let project_id = seed_project(&pool, &manager).await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "title": "Pour foundation", "description": "Block A" });
    let response = post_json_auth(
        app,
        &format!("/api/v1/projects/{project_id}/tasks"),
        body,
        &token_for(&manager),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "pending");
    assert_eq!(json["data"]["priority"], "medium");
    assert_eq!(json["data"]["notes"], serde_json::json!([]));
    assert!(json["data"]["completed_at"].is_null());
}

/// Creating a task under a missing project returns 404.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_under_unknown_project_is_404(pool: PgPool) {
    let (manager, _) = create_test_user(&pool, "manager@crestline.test", Role::Manager).await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "title": "Orphan", "description": "" });
    let response = post_json_auth(
        app,
        "/api/v1/projects/777/tasks",
        body,
        &token_for(&manager),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// `completed_at` is stamped on the first transition to completed and
/// survives both a repeat write and a move away from completed.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_completed_at_is_one_shot(pool: PgPool) {
    let (manager, _) = create_test_user(&pool, "manager@crestline.test", Role::Manager).await;
    let project_id = seed_project(&pool, &manager).await;
    let token = token_for(&manager);

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "title": "Wiring", "description": "" });
    let response = post_json_auth(
        app,
        &format!("/api/v1/projects/{project_id}/tasks"),
        body,
        &token,
    )
    .await;
    let task_id = body_json(response).await["data"]["id"].as_i64().unwrap();
    let uri = format!("/api/v1/projects/{project_id}/tasks/{task_id}");

    // First completion stamps the timestamp.
    let app = common::build_test_app(pool.clone());
    let response = put_json_auth(app, &uri, serde_json::json!({ "status": "completed" }), &token).await;
    let stamped = body_json(response).await["data"]["completed_at"]
        .as_str()
        .expect("completed_at must be set")
        .to_string();

    // Reopening does not clear it.
    let app = common::build_test_app(pool.clone());
    let response =
        put_json_auth(app, &uri, serde_json::json!({ "status": "in-progress" }), &token).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "in-progress");
    assert_eq!(json["data"]["completed_at"], stamped, "reopen must not clear the stamp");

    // Completing again does not move it.
    let app = common::build_test_app(pool);
    let response = put_json_auth(app, &uri, serde_json::json!({ "status": "completed" }), &token).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["completed_at"], stamped, "second completion must not restamp");
}

/// Notes append in order and carry author and timestamp.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_notes_append_in_order(pool: PgPool) {
    let (manager, _) = create_test_user(&pool, "manager@crestline.test", Role::Manager).await;
    let (viewer, _) = create_test_user(&pool, "viewer@crestline.test", Role::Viewer).await;
    let project_id = seed_project(&pool, &manager).await;

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "title": "Inspection", "description": "" });
    let response = post_json_auth(
        app,
        &format!("/api/v1/projects/{project_id}/tasks"),
        body,
        &token_for(&manager),
    )
    .await;
    let task_id = body_json(response).await["data"]["id"].as_i64().unwrap();
    let uri = format!("/api/v1/projects/{project_id}/tasks/{task_id}/notes");

    // Viewers may add notes even though they cannot create tasks.
    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        &uri,
        serde_json::json!({ "content": "first walkthrough done" }),
        &token_for(&viewer),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        &uri,
        serde_json::json!({ "content": "punch list sent" }),
        &token_for(&manager),
    )
    .await;
    let json = body_json(response).await;
    let notes = json["data"]["notes"].as_array().unwrap();
    assert_eq!(notes.len(), 2);
    assert_eq!(notes[0]["content"], "first walkthrough done");
    assert_eq!(notes[0]["created_by"], viewer.id);
    assert_eq!(notes[1]["content"], "punch list sent");
    assert_eq!(notes[1]["created_by"], manager.id);
    assert!(notes[1]["created_at"].is_string());
}

/// An empty note is rejected with 400.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_empty_note_is_rejected(pool: PgPool) {
    let (manager, _) = create_test_user(&pool, "manager@crestline.test", Role::Manager).await;
    let project_id = seed_project(&pool, &manager).await;

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "title": "Snagging", "description": "" });
    let response = post_json_auth(
        app,
        &format!("/api/v1/projects/{project_id}/tasks"),
        body,
        &token_for(&manager),
    )
    .await;
    let task_id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        &format!("/api/v1/projects/{project_id}/tasks/{task_id}/notes"),
        serde_json::json!({ "content": "   " }),
        &token_for(&manager),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// A task is only addressable through its owning project.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_task_is_scoped_to_project(pool: PgPool) {
    let (manager, _) = create_test_user(&pool, "manager@crestline.test", Role::Manager).await;
    let project_a = seed_project(&pool, &manager).await;
    let project_b = seed_project(&pool, &manager).await;
    let token = token_for(&manager);

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "title": "Scoped", "description": "" });
    let response = post_json_auth(
        app,
        &format!("/api/v1/projects/{project_a}/tasks"),
        body,
        &token,
    )
    .await;
    let task_id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let app = common::build_test_app(pool);
    let response = get_auth(
        app,
        &format!("/api/v1/projects/{project_b}/tasks/{task_id}"),
        &token,
    )
    .await;
    assert_eq!(
        response.status(),
        StatusCode::NOT_FOUND,
        "task must not resolve under a different project"
    );
}

/// Viewers can read tasks but cannot create, update, or delete them.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_viewer_reads_but_cannot_mutate(pool: PgPool) {
    let (manager, _) = create_test_user(&pool, "manager@crestline.test", Role::Manager).await;
    let (viewer, _) = create_test_user(&pool, "viewer@crestline.test", Role::Viewer).await;
    let project_id = seed_project(&pool, &manager).await;
    let viewer_token = token_for(&viewer);

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "title": "Readable", "description": "" });
    let response = post_json_auth(
        app,
        &format!("/api/v1/projects/{project_id}/tasks"),
        body,
        &token_for(&manager),
    )
    .await;
    let task_id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let response = get_auth(
        app,
        &format!("/api/v1/projects/{project_id}/tasks"),
        &viewer_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        &format!("/api/v1/projects/{project_id}/tasks"),
        serde_json::json!({ "title": "Denied", "description": "" }),
        &viewer_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let app = common::build_test_app(pool.clone());
    let response = put_json_auth(
        app,
        &format!("/api/v1/projects/{project_id}/tasks/{task_id}"),
        serde_json::json!({ "status": "completed" }),
        &viewer_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let app = common::build_test_app(pool.clone());
    let response = delete_auth(
        app,
        &format!("/api/v1/projects/{project_id}/tasks/{task_id}"),
        &viewer_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // The forbidden update and delete left the task untouched.
    let app = common::build_test_app(pool);
    let response = get_auth(
        app,
        &format!("/api/v1/projects/{project_id}/tasks/{task_id}"),
        &viewer_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "pending");
}
