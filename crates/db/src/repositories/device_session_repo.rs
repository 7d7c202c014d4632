//! Repository for the `device_sessions` table (single-device binding).

use sqlx::PgPool;
use vitrine_core::types::{DbId, Timestamp};

use crate::models::device_session::{DeviceSession, UpsertDeviceSession};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, device_id, is_active, last_seen, created_at, updated_at";

/// Provides operations on the per-user device binding.
pub struct DeviceSessionRepo;

impl DeviceSessionRepo {
    /// Find the device session for a user.
    pub async fn find_by_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<DeviceSession>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM device_sessions WHERE user_id = $1");
        sqlx::query_as::<_, DeviceSession>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Create or replace the user's device binding.
    ///
    /// The overwrite is unconditional: a login from a new device replaces the
    /// stored fingerprint, reactivates the row, and resets `last_seen`. Any
    /// other device holding the old fingerprint is thereby kicked -- its next
    /// gate evaluation observes the mismatch. Two near-simultaneous logins
    /// race on this row and the last write wins.
    pub async fn upsert(
        pool: &PgPool,
        input: &UpsertDeviceSession,
    ) -> Result<DeviceSession, sqlx::Error> {
        let query = format!(
            "INSERT INTO device_sessions (user_id, device_id, is_active, last_seen)
             VALUES ($1, $2, true, NOW())
             ON CONFLICT (user_id) DO UPDATE SET
                device_id = EXCLUDED.device_id,
                is_active = true,
                last_seen = NOW(),
                updated_at = NOW()
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DeviceSession>(&query)
            .bind(input.user_id)
            .bind(&input.device_id)
            .fetch_one(pool)
            .await
    }

    /// Update `last_seen` to now. Returns `true` if a row was updated.
    pub async fn touch_last_seen(pool: &PgPool, user_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE device_sessions SET last_seen = NOW(), updated_at = NOW()
             WHERE user_id = $1",
        )
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Mark the user's binding inactive (logout). Returns `true` if updated.
    ///
    /// The fingerprint is left in place; only `is_active` changes, so an
    /// immediately following gate evaluation redirects to login even though
    /// the fingerprint still matches.
    pub async fn deactivate(pool: &PgPool, user_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE device_sessions SET is_active = false, updated_at = NOW()
             WHERE user_id = $1 AND is_active = true",
        )
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete inactive bindings not seen since `cutoff`. Returns the count.
    pub async fn cleanup_stale(pool: &PgPool, cutoff: Timestamp) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM device_sessions WHERE is_active = false AND last_seen < $1",
        )
        .bind(cutoff)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}
