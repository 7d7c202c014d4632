//! Product management handlers (admin only).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use vitrine_core::error::CoreError;
use vitrine_core::types::DbId;
use vitrine_db::models::product::{CreateProduct, Product, ProductWithCategory, UpdateProduct};
use vitrine_db::repositories::ProductRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::admin::AdminUser;
use crate::state::AppState;

const MSG_INVALID_PRICE: &str = "Preço inválido.";

/// POST /api/v1/admin/products
pub async fn create_product(
    State(state): State<AppState>,
    _admin: AdminUser,
    Json(input): Json<CreateProduct>,
) -> AppResult<(StatusCode, Json<Product>)> {
    validate_price(input.price)?;
    let product = ProductRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// GET /api/v1/admin/products
///
/// Same joined listing the catalog serves; the admin view edits from it.
pub async fn list_products(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> AppResult<Json<Vec<ProductWithCategory>>> {
    let products = ProductRepo::list_with_category(&state.pool).await?;
    Ok(Json(products))
}

/// GET /api/v1/admin/products/{id}
pub async fn get_product(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Product>> {
    let product = ProductRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Product",
                id,
            })
        })?;
    Ok(Json(product))
}

/// PUT /api/v1/admin/products/{id}
///
/// Partial update: absent fields keep their current value.
pub async fn update_product(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProduct>,
) -> AppResult<Json<Product>> {
    if let Some(price) = input.price {
        validate_price(price)?;
    }
    let product = ProductRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Product",
                id,
            })
        })?;
    Ok(Json(product))
}

/// DELETE /api/v1/admin/products/{id}
pub async fn delete_product(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = ProductRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Product",
            id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}

fn validate_price(price: f64) -> Result<(), AppError> {
    if !price.is_finite() || price < 0.0 {
        return Err(AppError::Core(CoreError::Validation(
            MSG_INVALID_PRICE.into(),
        )));
    }
    Ok(())
}
