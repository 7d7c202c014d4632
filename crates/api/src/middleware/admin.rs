//! Administrator extractor.
//!
//! Narrower than the general gate: no profile-status lookup and no device
//! binding, by design. Authorization is solely the configured-identifier
//! match from `vitrine_core::admin`.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// The authenticated administrator.
///
/// Rejects with the login redirect when the caller is not authenticated or
/// does not match the configured admin id/email -- a successful sign-in to
/// the identity provider is not sufficient.
pub struct AdminUser(pub AuthUser);

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::RedirectLogin)?;

        if !state.config.admin.matches(user.user_id, &user.email) {
            return Err(AppError::RedirectLogin);
        }

        Ok(AdminUser(user))
    }
}
