//! Gate evaluation service: fetches fresh state, runs the pure gate from
//! `vitrine_core`, and applies the side effects the evaluation requests.
//!
//! Nothing here is cached between calls: every evaluation re-reads the
//! profile and the device-session row, so a remote kick is observed on the
//! caller's next request or poll.

use vitrine_core::approval::ApprovalStatus;
use vitrine_core::gate::{self, GateEvaluation, GateInput, SessionBinding};

use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use vitrine_db::repositories::{AuthSessionRepo, DeviceSessionRepo, ProfileRepo};

/// Evaluate the access gate for an authenticated caller.
///
/// Fetch failures are folded into the gate input as "missing" (spec'd
/// behaviour: every failure resolves to a redirect, never an ambiguous
/// error). Side effects:
///
/// - forced logout revokes all of the user's refresh sessions, so a stale
///   tab cannot silently continue once its access token expires;
/// - on allow, `last_seen` is touched best-effort.
pub async fn evaluate_access(
    state: &AppState,
    user: &AuthUser,
    device_id: Option<&str>,
) -> GateEvaluation {
    let profile_status = fetch_profile_status(state, user.user_id).await;

    // The binding only matters once the profile is approved and a local
    // fingerprint exists; the gate short-circuits before it otherwise.
    let binding = if profile_status == Some(ApprovalStatus::Approved) && device_id.is_some() {
        fetch_binding(state, user.user_id).await
    } else {
        None
    };

    let input = GateInput {
        authenticated: true,
        profile_status,
        local_device_id: device_id.map(str::to_string),
        binding,
    };
    let evaluation = gate::evaluate(&input);

    if evaluation.force_logout {
        force_logout(state, user.user_id).await;
    }

    if evaluation.touch_last_seen {
        // Fire-and-forget: a failed timestamp write never blocks access.
        if let Err(e) = DeviceSessionRepo::touch_last_seen(&state.pool, user.user_id).await {
            tracing::warn!(user_id = user.user_id, error = %e, "Failed to update last_seen");
        }
    }

    evaluation
}

/// Revoke all refresh sessions for the user.
pub async fn force_logout(state: &AppState, user_id: i64) {
    match AuthSessionRepo::revoke_all_for_user(&state.pool, user_id).await {
        Ok(revoked) => {
            tracing::info!(user_id, revoked, "Forced logout: revoked refresh sessions");
        }
        Err(e) => {
            tracing::error!(user_id, error = %e, "Forced logout: failed to revoke sessions");
        }
    }
}

/// Fetch the profile's approval status, treating any failure as absence.
async fn fetch_profile_status(state: &AppState, user_id: i64) -> Option<ApprovalStatus> {
    let profile = match ProfileRepo::find_by_user(&state.pool, user_id).await {
        Ok(profile) => profile?,
        Err(e) => {
            tracing::warn!(user_id, error = %e, "Profile fetch failed during gate evaluation");
            return None;
        }
    };
    match profile.status.parse() {
        Ok(status) => Some(status),
        Err(e) => {
            // The CHECK constraint makes this unreachable in practice.
            tracing::error!(user_id, error = %e, "Profile row carries an invalid status");
            None
        }
    }
}

/// Fetch the device-session row, treating any failure as absence.
async fn fetch_binding(state: &AppState, user_id: i64) -> Option<SessionBinding> {
    match DeviceSessionRepo::find_by_user(&state.pool, user_id).await {
        Ok(row) => row.map(|row| SessionBinding {
            device_id: row.device_id,
            is_active: row.is_active,
        }),
        Err(e) => {
            tracing::warn!(user_id, error = %e, "Device session fetch failed during gate evaluation");
            None
        }
    }
}
