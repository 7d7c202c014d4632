//! Catalog read handlers, protected by the access gate.
//!
//! These are the only routes behind [`GateUser`]: reaching them requires an
//! authenticated, approved account whose device binding matches. The data
//! itself is not per-user.

use axum::extract::State;
use axum::Json;
use vitrine_db::models::category::Category;
use vitrine_db::models::product::ProductWithCategory;
use vitrine_db::repositories::{CategoryRepo, ProductRepo};

use crate::error::AppResult;
use crate::middleware::gate::GateUser;
use crate::state::AppState;

/// GET /api/v1/catalog/products
///
/// Full product list with category names, newest first.
pub async fn list_products(
    State(state): State<AppState>,
    _user: GateUser,
) -> AppResult<Json<Vec<ProductWithCategory>>> {
    let products = ProductRepo::list_with_category(&state.pool).await?;
    Ok(Json(products))
}

/// GET /api/v1/catalog/categories
///
/// Categories ordered by name, for the catalog filter bar.
pub async fn list_categories(
    State(state): State<AppState>,
    _user: GateUser,
) -> AppResult<Json<Vec<Category>>> {
    let categories = CategoryRepo::list(&state.pool).await?;
    Ok(Json(categories))
}
