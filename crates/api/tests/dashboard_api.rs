//! HTTP-level integration tests for the `/dashboard` resource.

mod common;

use axum::http::StatusCode;
use common::{body_json, create_test_user, get, get_auth, token_for};
use crestline_core::roles::Role;
use crestline_core::status::{ProjectStatus, TaskStatus};
use crestline_db::models::project::CreateProject;
use crestline_db::models::task::{CreateTask, UpdateTask};
use crestline_db::models::user::User;
use crestline_db::repositories::{ProjectRepo, TaskRepo};
use sqlx::PgPool;

async fn seed_project(pool: &PgPool, owner: &User, title: &str, category: &str, status: ProjectStatus) -> i64 {
    let input = CreateProject {
        title: title.to_string(),
        description: String::new(),
        location: "Town".to_string(),
        category: category.to_string(),
        status,
        area: "1,000 sq ft".to_string(),
        square_feet: Some(1000),
        timeline: "2026".to_string(),
        images: None,
        progress: None,
    };
    ProjectRepo::create(pool, &input, owner.id)
        .await
        .expect("project creation should succeed")
        .id
}

async fn seed_task(pool: &PgPool, project_id: i64, owner: &User, status: TaskStatus) {
    let task = TaskRepo::create(
        pool,
        project_id,
        &CreateTask {
            title: "t".to_string(),
            description: String::new(),
            status: None,
            priority: None,
            assigned_to: None,
        },
        owner.id,
    )
    .await
    .expect("task creation should succeed");

    if status != TaskStatus::Pending {
        TaskRepo::update(
            pool,
            project_id,
            task.id,
            &UpdateTask {
                status: Some(status),
                ..Default::default()
            },
        )
        .await
        .expect("task update should succeed");
    }
}

/// Metrics require authentication.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_metrics_require_auth(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/dashboard/metrics").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// An empty database yields all-zero counts and a 0.0 completion rate.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_empty_database_yields_zeros(pool: PgPool) {
    let (viewer, _) = create_test_user(&pool, "viewer@crestline.test", Role::Viewer).await;
    let app = common::build_test_app(pool);

    let response = get_auth(app, "/api/v1/dashboard/metrics", &token_for(&viewer)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["total_projects"], 0);
    assert_eq!(json["data"]["total_tasks"], 0);
    assert_eq!(json["data"]["completion_rate"], 0.0);
    assert_eq!(json["data"]["recent_projects"], serde_json::json!([]));
}

/// Counts, category buckets, and the rounded completion rate line up with
/// the seeded population.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_metrics_aggregate_population(pool: PgPool) {
    let (manager, _) = create_test_user(&pool, "manager@crestline.test", Role::Manager).await;

    let a = seed_project(&pool, &manager, "A", "residential", ProjectStatus::Completed).await;
    let b = seed_project(&pool, &manager, "B", "residential", ProjectStatus::Completed).await;
    let c = seed_project(&pool, &manager, "C", "commercial", ProjectStatus::Ongoing).await;

    seed_task(&pool, a, &manager, TaskStatus::Completed).await;
    seed_task(&pool, b, &manager, TaskStatus::InProgress).await;
    seed_task(&pool, c, &manager, TaskStatus::Pending).await;
    seed_task(&pool, c, &manager, TaskStatus::Pending).await;

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/dashboard/metrics", &token_for(&manager)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let data = &json["data"];
    assert_eq!(data["total_projects"], 3);
    assert_eq!(data["projects_by_status"]["completed"], 2);
    assert_eq!(data["projects_by_status"]["ongoing"], 1);
    assert_eq!(data["projects_by_status"]["on-hold"], 0);
    assert_eq!(data["projects_by_category"]["residential"], 2);
    assert_eq!(data["projects_by_category"]["commercial"], 1);
    assert_eq!(data["total_tasks"], 4);
    assert_eq!(data["tasks_by_status"]["pending"], 2);
    assert_eq!(data["tasks_by_status"]["in-progress"], 1);
    assert_eq!(data["tasks_by_status"]["completed"], 1);
    // 2 of 3 projects completed, rounded to two decimals.
    assert_eq!(data["completion_rate"], 66.67);
}

/// The recent sample is capped at five projects, newest first.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_recent_projects_capped_at_five(pool: PgPool) {
    let (manager, _) = create_test_user(&pool, "manager@crestline.test", Role::Manager).await;

    for i in 0..7 {
        seed_project(
            &pool,
            &manager,
            &format!("P{i}"),
            "residential",
            ProjectStatus::Upcoming,
        )
        .await;
    }

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/dashboard/metrics", &token_for(&manager)).await;
    let json = body_json(response).await;

    let recent = json["data"]["recent_projects"].as_array().unwrap();
    assert_eq!(recent.len(), 5);
    assert_eq!(json["data"]["total_projects"], 7, "totals still cover everything");
}
