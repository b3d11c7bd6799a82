//! Route definitions for the public `/leads` endpoints.

use axum::routing::post;
use axum::Router;

use crate::handlers::lead;
use crate::state::AppState;

/// Routes mounted at `/leads`. Both are public and append-only.
///
/// ```text
/// POST /contact    -> contact
/// POST /quotation  -> quotation
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/contact", post(lead::contact))
        .route("/quotation", post(lead::quotation))
}
