//! Profile model: one approval/registration record per user.

use serde::Serialize;
use sqlx::FromRow;
use vitrine_core::types::{DbId, Timestamp};

/// A row from the `profiles` table.
///
/// At most one per user (`uq_profiles_user_id`). Status starts at `pending`
/// and changes only through administrative action.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Profile {
    pub id: DbId,
    pub user_id: DbId,
    pub full_name: String,
    pub email: String,
    /// One of `pending`, `approved`, `rejected` (CHECK-constrained).
    pub status: String,
    /// CPF or CNPJ supplied at registration.
    pub document: String,
    pub phone: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a profile alongside its user at signup.
pub struct CreateProfile {
    pub user_id: DbId,
    pub full_name: String,
    pub email: String,
    pub document: String,
    pub phone: String,
}
