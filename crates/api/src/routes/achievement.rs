//! Route definitions for the `/achievements` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::achievement;
use crate::state::AppState;

/// Routes mounted at `/achievements`.
///
/// ```text
/// GET    /             -> list (public)
/// POST   /             -> create (manager)
/// GET    /{id}         -> get_by_id (public)
/// PUT    /{id}         -> update (manager)
/// DELETE /{id}         -> delete (manager)
/// POST   /{id}/image   -> upload_image (manager)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(achievement::list).post(achievement::create))
        .route(
            "/{id}",
            get(achievement::get_by_id)
                .put(achievement::update)
                .delete(achievement::delete),
        )
        .route("/{id}/image", post(achievement::upload_image))
}
