//! Category management handlers (admin only).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use vitrine_core::error::CoreError;
use vitrine_core::types::DbId;
use vitrine_db::models::category::{Category, CategoryInput};
use vitrine_db::repositories::CategoryRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::admin::AdminUser;
use crate::state::AppState;

const MSG_NAME_REQUIRED: &str = "Nome da categoria é obrigatório.";
const MSG_DUPLICATE: &str = "Categoria já existe.";
const MSG_HAS_PRODUCTS: &str = "Não é possível excluir categoria com produtos vinculados.";

/// POST /api/v1/admin/categories
pub async fn create_category(
    State(state): State<AppState>,
    _admin: AdminUser,
    Json(input): Json<CategoryInput>,
) -> AppResult<(StatusCode, Json<Category>)> {
    let name = normalize_name(&input.name)?;
    let category = CategoryRepo::create(&state.pool, &name)
        .await
        .map_err(map_duplicate_name)?;
    Ok((StatusCode::CREATED, Json(category)))
}

/// GET /api/v1/admin/categories
pub async fn list_categories(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> AppResult<Json<Vec<Category>>> {
    let categories = CategoryRepo::list(&state.pool).await?;
    Ok(Json(categories))
}

/// PUT /api/v1/admin/categories/{id}
pub async fn update_category(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<DbId>,
    Json(input): Json<CategoryInput>,
) -> AppResult<Json<Category>> {
    let name = normalize_name(&input.name)?;
    let category = CategoryRepo::update(&state.pool, id, &name)
        .await
        .map_err(map_duplicate_name)?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Category",
                id,
            })
        })?;
    Ok(Json(category))
}

/// DELETE /api/v1/admin/categories/{id}
///
/// Refuses while any product still references the category.
pub async fn delete_category(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let product_count = CategoryRepo::count_products(&state.pool, id).await?;
    if product_count > 0 {
        return Err(AppError::Core(CoreError::Conflict(MSG_HAS_PRODUCTS.into())));
    }

    let deleted = CategoryRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Category",
            id,
        }));
    }

    Ok(StatusCode::NO_CONTENT)
}

fn normalize_name(raw: &str) -> Result<String, AppError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            MSG_NAME_REQUIRED.into(),
        )));
    }
    Ok(name.to_string())
}

fn map_duplicate_name(err: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some("23505")
            && db_err.constraint() == Some("uq_categories_name")
        {
            return AppError::Core(CoreError::Conflict(MSG_DUPLICATE.into()));
        }
    }
    AppError::Database(err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_is_trimmed() {
        assert_eq!(normalize_name("  Bolsas  ").unwrap(), "Bolsas");
    }

    #[test]
    fn test_blank_name_rejected() {
        assert!(normalize_name("   ").is_err());
        assert!(normalize_name("").is_err());
    }
}
