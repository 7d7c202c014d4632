//! Route definitions for the `/admin` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{admin, categories, products};
use crate::state::AppState;

/// Routes mounted at `/admin`. The gate check is open to any authenticated
/// caller; everything else requires the configured administrator.
///
/// ```text
/// GET /gate                       -> admin gate check
///
/// GET /users?status=              -> approval queue (default: pending)
/// PUT /users/{user_id}/status     -> approve / reject a registration
///
/// GET    /categories              -> list
/// POST   /categories              -> create
/// PUT    /categories/{id}         -> rename
/// DELETE /categories/{id}         -> delete (refused while products remain)
///
/// GET    /products                -> list with category names
/// POST   /products                -> create
/// GET    /products/{id}           -> fetch one
/// PUT    /products/{id}           -> partial update
/// DELETE /products/{id}           -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/gate", get(admin::check_gate))
        .route("/users", get(admin::list_users))
        .route("/users/{user_id}/status", put(admin::update_user_status))
        .route(
            "/categories",
            get(categories::list_categories).post(categories::create_category),
        )
        .route(
            "/categories/{id}",
            put(categories::update_category).delete(categories::delete_category),
        )
        .route(
            "/products",
            get(products::list_products).post(products::create_product),
        )
        .route(
            "/products/{id}",
            get(products::get_product)
                .put(products::update_product)
                .delete(products::delete_product),
        )
}
