//! Session-gate polling endpoint.
//!
//! Clients on protected pages poll this endpoint (the web client uses a 60s
//! interval) so a kick or a status change is observed within one period even
//! when the user is idle. The response is always `200 OK`; the verdict is in
//! the body, never the status code, so the client can distinguish "redirect
//! me" from transport failures.

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use vitrine_core::gate::GateDecision;

use crate::access::evaluate_access;
use crate::middleware::auth::OptionalAuthUser;
use crate::middleware::device::DeviceFingerprint;
use crate::state::AppState;

/// Verdict of a gate check.
#[derive(Debug, Serialize)]
pub struct GateCheckResponse {
    /// One of `allow`, `redirect_login`, `redirect_pending`.
    pub decision: &'static str,
    /// Where the client should navigate when not allowed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_to: Option<&'static str>,
}

impl From<GateDecision> for GateCheckResponse {
    fn from(decision: GateDecision) -> Self {
        match decision {
            GateDecision::Allow => GateCheckResponse {
                decision: "allow",
                redirect_to: None,
            },
            GateDecision::RedirectLogin => GateCheckResponse {
                decision: "redirect_login",
                redirect_to: Some("/login"),
            },
            GateDecision::RedirectPending => GateCheckResponse {
                decision: "redirect_pending",
                redirect_to: Some("/pendente"),
            },
        }
    }
}

/// GET /api/v1/session/gate
///
/// Run a full gate evaluation for the caller. Unauthenticated callers get the
/// login redirect rather than a 401 so the polling loop stays uniform.
pub async fn check_gate(
    State(state): State<AppState>,
    OptionalAuthUser(maybe_user): OptionalAuthUser,
    DeviceFingerprint(device_id): DeviceFingerprint,
) -> Json<GateCheckResponse> {
    let Some(user) = maybe_user else {
        return Json(GateCheckResponse::from(GateDecision::RedirectLogin));
    };

    let evaluation = evaluate_access(&state, &user, device_id.as_deref()).await;
    Json(GateCheckResponse::from(evaluation.decision))
}
