//! Repository for the `profiles` table.

use sqlx::{PgExecutor, PgPool};
use vitrine_core::approval::ApprovalStatus;
use vitrine_core::types::DbId;

use crate::models::profile::{CreateProfile, Profile};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, user_id, full_name, email, status, document, phone, created_at, updated_at";

/// Provides operations on user profiles.
pub struct ProfileRepo;

impl ProfileRepo {
    /// Insert a new profile with status `pending`, returning the created row.
    ///
    /// Takes a generic executor so signup can run it inside the same
    /// transaction that creates the user.
    pub async fn create<'e>(
        executor: impl PgExecutor<'e>,
        input: &CreateProfile,
    ) -> Result<Profile, sqlx::Error> {
        let query = format!(
            "INSERT INTO profiles (user_id, full_name, email, document, phone)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Profile>(&query)
            .bind(input.user_id)
            .bind(&input.full_name)
            .bind(&input.email)
            .bind(&input.document)
            .bind(&input.phone)
            .fetch_one(executor)
            .await
    }

    /// Find the profile belonging to a user.
    pub async fn find_by_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<Profile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM profiles WHERE user_id = $1");
        sqlx::query_as::<_, Profile>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// List profiles with the given status, oldest registrations first.
    ///
    /// This is the admin approval queue (`status = pending` by default).
    pub async fn list_by_status(
        pool: &PgPool,
        status: ApprovalStatus,
    ) -> Result<Vec<Profile>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM profiles WHERE status = $1 ORDER BY created_at ASC"
        );
        sqlx::query_as::<_, Profile>(&query)
            .bind(status.as_str())
            .fetch_all(pool)
            .await
    }

    /// Set a profile's approval status. Returns the updated row, or `None`
    /// if the user has no profile.
    pub async fn update_status(
        pool: &PgPool,
        user_id: DbId,
        status: ApprovalStatus,
    ) -> Result<Option<Profile>, sqlx::Error> {
        let query = format!(
            "UPDATE profiles SET status = $2, updated_at = NOW()
             WHERE user_id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Profile>(&query)
            .bind(user_id)
            .bind(status.as_str())
            .fetch_optional(pool)
            .await
    }
}
