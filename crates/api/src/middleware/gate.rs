//! Access-gate extractor for protected catalog routes.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use vitrine_core::gate::GateDecision;

use super::auth::AuthUser;
use super::device::fingerprint_from_parts;
use crate::access::evaluate_access;
use crate::error::AppError;
use crate::state::AppState;

/// An authenticated, approved user whose device binding passed the gate.
///
/// Every extraction runs the full gate evaluation against fresh store state
/// -- profile status, device fingerprint, session binding -- so a kick from
/// a newer login elsewhere is detected on the next protected request.
///
/// ```ignore
/// async fn protected(GateUser(user): GateUser) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct GateUser(pub AuthUser);

impl FromRequestParts<AppState> for GateUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::RedirectLogin)?;

        let device_id = fingerprint_from_parts(parts);
        let evaluation = evaluate_access(state, &user, device_id.as_deref()).await;

        match evaluation.decision {
            GateDecision::Allow => Ok(GateUser(user)),
            GateDecision::RedirectLogin => Err(AppError::RedirectLogin),
            GateDecision::RedirectPending => Err(AppError::RedirectPending),
        }
    }
}
