//! Handlers for the `/dashboard` resource.

use axum::extract::State;
use axum::Json;
use crestline_core::dashboard::{aggregate, MetricTotals};
use crestline_db::models::project::{Project, ProjectFilters};
use crestline_db::repositories::{ProjectRepo, TaskRepo};
use serde::Serialize;

use crate::error::AppResult;
use crate::middleware::rbac::RequireAuth;
use crate::response::DataResponse;
use crate::state::AppState;

/// Number of recently created projects included in the dashboard payload.
const RECENT_PROJECT_LIMIT: usize = 5;

/// Dashboard payload: aggregate totals plus a recency-ordered sample.
#[derive(Debug, Serialize)]
pub struct DashboardMetrics {
    #[serde(flatten)]
    pub totals: MetricTotals,
    /// The five most recently created projects, newest first.
    pub recent_projects: Vec<Project>,
}

/// GET /api/v1/dashboard/metrics
///
/// Aggregates every project and every task into status/category counts and
/// the completion rate. A failure to list one project's tasks is logged and
/// that project contributes zero tasks; the dashboard never fails outright
/// because a single task query did.
pub async fn metrics(
    State(state): State<AppState>,
    RequireAuth(_): RequireAuth,
) -> AppResult<Json<DataResponse<DashboardMetrics>>> {
    let projects = ProjectRepo::list(&state.pool, &ProjectFilters::default()).await?;

    let mut task_statuses = Vec::new();
    for project in &projects {
        match TaskRepo::list_statuses_for_project(&state.pool, project.id).await {
            Ok(statuses) => task_statuses.extend(statuses),
            Err(e) => {
                tracing::warn!(project_id = project.id, error = %e, "Failed to list tasks for dashboard");
            }
        }
    }

    let totals = aggregate(
        projects.iter().map(|p| (p.status, p.category.as_str())),
        task_statuses,
    );

    // The list is already created_at-descending, so the head is the sample.
    let recent_projects = projects
        .into_iter()
        .take(RECENT_PROJECT_LIMIT)
        .collect();

    Ok(Json(DataResponse {
        data: DashboardMetrics {
            totals,
            recent_projects,
        },
    }))
}
