//! Administrative handlers: the admin gate check, the approval queue, and
//! status changes.
//!
//! Every handler except the gate check takes [`AdminUser`], so authorization
//! is the configured-identifier match -- approval status and device binding
//! are never consulted on this surface.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use vitrine_core::approval::{validate_admin_transition, ApprovalStatus};
use vitrine_core::error::CoreError;
use vitrine_core::types::DbId;
use vitrine_db::models::profile::Profile;
use vitrine_db::repositories::ProfileRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::admin::AdminUser;
use crate::middleware::auth::OptionalAuthUser;
use crate::state::AppState;

/// Verdict of the admin gate check.
#[derive(Debug, Serialize)]
pub struct AdminGateResponse {
    pub decision: &'static str,
    pub redirect_to: &'static str,
}

/// GET /api/v1/admin/gate
///
/// Decide whether the caller may enter the admin area. Unlike a forced user
/// logout, a failed admin check only redirects; the caller's tokens stay
/// valid.
pub async fn check_gate(
    State(state): State<AppState>,
    OptionalAuthUser(maybe_user): OptionalAuthUser,
) -> Json<AdminGateResponse> {
    let allowed = maybe_user
        .map(|user| state.config.admin.matches(user.user_id, &user.email))
        .unwrap_or(false);

    if allowed {
        Json(AdminGateResponse {
            decision: "allow",
            redirect_to: "/admin_dashboard",
        })
    } else {
        Json(AdminGateResponse {
            decision: "redirect_login",
            redirect_to: "/login",
        })
    }
}

/// Query parameters for the approval queue listing.
#[derive(Debug, Deserialize)]
pub struct ListUsersQuery {
    /// Filter by approval status. Defaults to `pending`.
    pub status: Option<String>,
}

/// GET /api/v1/admin/users?status=pending
///
/// List registrations with the given status, oldest first.
pub async fn list_users(
    State(state): State<AppState>,
    _admin: AdminUser,
    Query(query): Query<ListUsersQuery>,
) -> AppResult<Json<Vec<Profile>>> {
    let status = match query.status.as_deref() {
        None => ApprovalStatus::Pending,
        Some(raw) => raw
            .parse()
            .map_err(|e: String| AppError::Core(CoreError::Validation(e)))?,
    };

    let profiles = ProfileRepo::list_by_status(&state.pool, status).await?;
    Ok(Json(profiles))
}

/// Request body for a status change.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

/// PUT /api/v1/admin/users/{user_id}/status
///
/// Approve or reject a registration. Reversals between `approved` and
/// `rejected` are allowed; moving a record back to `pending` is not.
pub async fn update_user_status(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(user_id): Path<DbId>,
    Json(input): Json<UpdateStatusRequest>,
) -> AppResult<Json<Profile>> {
    let target: ApprovalStatus = input
        .status
        .parse()
        .map_err(|e: String| AppError::Core(CoreError::Validation(e)))?;

    let profile = ProfileRepo::find_by_user(&state.pool, user_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Profile",
                id: user_id,
            })
        })?;

    let current: ApprovalStatus = profile
        .status
        .parse()
        .map_err(|e: String| AppError::InternalError(e))?;
    validate_admin_transition(current, target)
        .map_err(|e| AppError::Core(CoreError::Validation(e)))?;

    let updated = ProfileRepo::update_status(&state.pool, user_id, target)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Profile",
                id: user_id,
            })
        })?;

    tracing::info!(user_id, status = %target, "Registration status changed");

    Ok(Json(updated))
}
