//! Route definitions for the `/session` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::session;
use crate::state::AppState;

/// Routes mounted at `/session`.
///
/// ```text
/// GET /gate -> full access-gate evaluation (polled by protected pages)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/gate", get(session::check_gate))
}
