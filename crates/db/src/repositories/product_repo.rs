//! Repository for the `products` table.

use sqlx::PgPool;
use vitrine_core::types::DbId;

use crate::models::product::{CreateProduct, Product, ProductWithCategory, UpdateProduct};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, description, price, category_id, image_path, \
                        color_code, variations, stock, created_at, updated_at";

/// Provides CRUD operations for products.
pub struct ProductRepo;

impl ProductRepo {
    /// Insert a new product, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateProduct) -> Result<Product, sqlx::Error> {
        let query = format!(
            "INSERT INTO products
                (name, description, price, category_id, image_path, color_code, variations, stock)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.price)
            .bind(input.category_id)
            .bind(&input.image_path)
            .bind(&input.color_code)
            .bind(&input.variations)
            .bind(input.stock)
            .fetch_one(pool)
            .await
    }

    /// Find a product by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Product>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM products WHERE id = $1");
        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all products with their category name, newest first.
    pub async fn list_with_category(
        pool: &PgPool,
    ) -> Result<Vec<ProductWithCategory>, sqlx::Error> {
        sqlx::query_as::<_, ProductWithCategory>(
            "SELECT p.id, p.name, p.description, p.price, p.category_id, p.image_path,
                    p.color_code, p.variations, p.stock,
                    c.name AS category_name,
                    p.created_at, p.updated_at
             FROM products p
             JOIN categories c ON c.id = p.category_id
             ORDER BY p.id DESC",
        )
        .fetch_all(pool)
        .await
    }

    /// Update a product. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProduct,
    ) -> Result<Option<Product>, sqlx::Error> {
        let query = format!(
            "UPDATE products SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                price = COALESCE($4, price),
                category_id = COALESCE($5, category_id),
                image_path = COALESCE($6, image_path),
                color_code = COALESCE($7, color_code),
                variations = COALESCE($8, variations),
                stock = COALESCE($9, stock),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.price)
            .bind(input.category_id)
            .bind(&input.image_path)
            .bind(&input.color_code)
            .bind(&input.variations)
            .bind(input.stock)
            .fetch_optional(pool)
            .await
    }

    /// Delete a product. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
