pub mod admin;
pub mod auth;
pub mod catalog;
pub mod health;
pub mod session;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/signup                     register (public)
/// /auth/login                      login (public)
/// /auth/refresh                    refresh (public)
/// /auth/logout                     logout (requires auth)
///
/// /session/gate                    access-gate evaluation (polled)
///
/// /catalog/products                product list (gated)
/// /catalog/categories              category list (gated)
///
/// /admin/gate                      admin gate check
/// /admin/users                     approval queue (admin only)
/// /admin/users/{user_id}/status    approve / reject (admin only)
/// /admin/categories[...]           category CRUD (admin only)
/// /admin/products[...]             product CRUD (admin only)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/session", session::router())
        .nest("/catalog", catalog::router())
        .nest("/admin", admin::router())
}
