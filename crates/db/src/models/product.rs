//! Product model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vitrine_core::types::{DbId, Timestamp};

/// A row from the `products` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Product {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category_id: DbId,
    pub image_path: String,
    pub color_code: Option<String>,
    /// Optional named price variations, stored as a JSON array of
    /// `{ "name": string, "price": number }`.
    pub variations: Option<serde_json::Value>,
    pub stock: Option<i32>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A product joined with its category name, as served to the catalog view.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProductWithCategory {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category_id: DbId,
    pub image_path: String,
    pub color_code: Option<String>,
    pub variations: Option<serde_json::Value>,
    pub stock: Option<i32>,
    pub category_name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new product.
#[derive(Debug, Deserialize)]
pub struct CreateProduct {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category_id: DbId,
    pub image_path: String,
    pub color_code: Option<String>,
    pub variations: Option<serde_json::Value>,
    pub stock: Option<i32>,
}

/// DTO for updating a product. Only non-`None` fields are applied.
#[derive(Debug, Deserialize)]
pub struct UpdateProduct {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub category_id: Option<DbId>,
    pub image_path: Option<String>,
    pub color_code: Option<String>,
    pub variations: Option<serde_json::Value>,
    pub stock: Option<i32>,
}
