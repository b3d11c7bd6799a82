//! Route definitions for the `/dashboard` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::dashboard;
use crate::state::AppState;

/// Routes mounted at `/dashboard`.
///
/// ```text
/// GET /metrics  -> metrics (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/metrics", get(dashboard::metrics))
}
