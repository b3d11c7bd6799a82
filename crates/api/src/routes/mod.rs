pub mod achievement;
pub mod admin;
pub mod auth;
pub mod dashboard;
pub mod health;
pub mod lead;
pub mod project;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/setup                                      first-run admin creation (public, one-shot)
/// /auth/login                                      login (public)
/// /auth/refresh                                    refresh (public)
/// /auth/logout                                     logout (requires auth)
/// /auth/me                                         own profile (requires auth)
///
/// /admin/users                                     list, create (admin only)
/// /admin/users/{id}                                update (admin only)
///
/// /projects                                        list (public), create (manager)
/// /projects/{id}                                   get (public), update, delete (manager)
/// /projects/{id}/images                            upload (POST), remove (DELETE) (manager)
/// /projects/{project_id}/tasks                     list (auth), create (manager)
/// /projects/{project_id}/tasks/{id}                get (auth), update, delete (manager)
/// /projects/{project_id}/tasks/{id}/notes          append note (auth)
///
/// /dashboard/metrics                               aggregated metrics (auth)
///
/// /leads/contact                                   contact form submission (public)
/// /leads/quotation                                 quotation request + estimate (public)
///
/// /achievements                                    list (public), create (manager)
/// /achievements/{id}                               get (public), update, delete (manager)
/// /achievements/{id}/image                         upload image (manager)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Authentication routes (setup, login, refresh, logout, me).
        .nest("/auth", auth::router())
        // Admin routes (user management).
        .nest("/admin", admin::router())
        // Project routes (also nests project-scoped tasks).
        .nest("/projects", project::router())
        // Dashboard metrics.
        .nest("/dashboard", dashboard::router())
        // Public lead capture.
        .nest("/leads", lead::router())
        // Achievements showcase.
        .nest("/achievements", achievement::router())
}
