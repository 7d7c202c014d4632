//! Device-session model: the single-device binding per user.

use sqlx::FromRow;
use vitrine_core::types::{DbId, Timestamp};

/// A row from the `device_sessions` table.
///
/// At most one per user (`uq_device_sessions_user_id`); login upserts it,
/// unconditionally replacing the fingerprint. That overwrite is the kick
/// mechanism: the previous device's next gate check sees the mismatch.
#[derive(Debug, Clone, FromRow)]
pub struct DeviceSession {
    pub id: DbId,
    pub user_id: DbId,
    /// Opaque fingerprint generated and persisted by the client.
    pub device_id: String,
    pub is_active: bool,
    pub last_seen: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for the login-time upsert.
pub struct UpsertDeviceSession {
    pub user_id: DbId,
    pub device_id: String,
}
