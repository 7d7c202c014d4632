//! Route definitions for the `/catalog` resource (gated reads).

use axum::routing::get;
use axum::Router;

use crate::handlers::catalog;
use crate::state::AppState;

/// Routes mounted at `/catalog`. All require passing the access gate.
///
/// ```text
/// GET /products   -> product list with category names
/// GET /categories -> category list
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/products", get(catalog::list_products))
        .route("/categories", get(catalog::list_categories))
}
