//! Route definitions for the `/projects` resource.
//!
//! Also nests task routes under `/projects/{project_id}/tasks`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{project, task};
use crate::state::AppState;

/// Routes mounted at `/projects`.
///
/// ```text
/// GET    /                                  -> list (public)
/// POST   /                                  -> create (manager)
/// GET    /{id}                              -> get_by_id (public)
/// PUT    /{id}                              -> update (manager)
/// DELETE /{id}                              -> delete (manager, cascades tasks)
/// POST   /{id}/images                       -> upload_image (manager)
/// DELETE /{id}/images                       -> remove_image (manager)
///
/// GET    /{project_id}/tasks                -> list (auth)
/// POST   /{project_id}/tasks                -> create (manager)
/// GET    /{project_id}/tasks/{id}           -> get_by_id (auth)
/// PUT    /{project_id}/tasks/{id}           -> update (manager)
/// DELETE /{project_id}/tasks/{id}           -> delete (manager)
/// POST   /{project_id}/tasks/{id}/notes     -> add_note (auth)
/// ```
pub fn router() -> Router<AppState> {
    let task_routes = Router::new()
        .route("/", get(task::list).post(task::create))
        .route(
            "/{id}",
            get(task::get_by_id).put(task::update).delete(task::delete),
        )
        .route("/{id}/notes", post(task::add_note));

    Router::new()
        .route("/", get(project::list).post(project::create))
        .route(
            "/{id}",
            get(project::get_by_id)
                .put(project::update)
                .delete(project::delete),
        )
        .route(
            "/{id}/images",
            post(project::upload_image).delete(project::remove_image),
        )
        .nest("/{project_id}/tasks", task_routes)
}
