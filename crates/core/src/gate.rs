//! The access gate: the decision function run for every protected view.
//!
//! The gate composes three facts fetched fresh from the store -- the profile's
//! approval status, the caller's local device fingerprint, and the single
//! device-session row for the identity -- into one of three outcomes:
//! allow, redirect to login, or redirect to the pending screen.
//!
//! Evaluation is pure; the caller is responsible for fetching the inputs and
//! for carrying out the side effects the evaluation requests (revoking the
//! identity's tokens on a forced logout, touching `last_seen` on allow).

use crate::approval::ApprovalStatus;

/// Outcome of a gate evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// Render the protected view.
    Allow,
    /// Send the caller to `/login`.
    RedirectLogin,
    /// Send the caller to `/pendente`.
    ///
    /// Both `pending` and `rejected` profiles land here. That collapses two
    /// distinct states onto one screen, which is the observed product
    /// behaviour and is kept as-is.
    RedirectPending,
}

/// The device-session row for an identity, as read from the session registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionBinding {
    /// Fingerprint written by the most recent login.
    pub device_id: String,
    /// Cleared by logout; a new login sets it back to true.
    pub is_active: bool,
}

/// Everything the gate needs to decide, fetched fresh by the caller.
///
/// `None` uniformly means "missing or could not be fetched" -- the gate does
/// not distinguish a transport failure from an absent row, so every failure
/// resolves deterministically to a redirect instead of hanging ambiguous.
#[derive(Debug, Clone)]
pub struct GateInput {
    /// Whether an authenticated session exists at all.
    pub authenticated: bool,
    /// Approval status from the profile row.
    pub profile_status: Option<ApprovalStatus>,
    /// The fingerprint presented by the calling device.
    pub local_device_id: Option<String>,
    /// The identity's device-session row.
    pub binding: Option<SessionBinding>,
}

/// A gate decision plus the side effects the caller must apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateEvaluation {
    pub decision: GateDecision,
    /// Invalidate the identity's tokens before redirecting, so a stale tab
    /// cannot silently continue.
    pub force_logout: bool,
    /// Update the session row's `last_seen` to now. Best-effort: a failed
    /// write never blocks access.
    pub touch_last_seen: bool,
}

impl GateEvaluation {
    fn redirect_login(force_logout: bool) -> Self {
        GateEvaluation {
            decision: GateDecision::RedirectLogin,
            force_logout,
            touch_last_seen: false,
        }
    }

    fn redirect_pending() -> Self {
        GateEvaluation {
            decision: GateDecision::RedirectPending,
            force_logout: false,
            touch_last_seen: false,
        }
    }

    fn allow() -> Self {
        GateEvaluation {
            decision: GateDecision::Allow,
            force_logout: false,
            touch_last_seen: true,
        }
    }
}

/// Evaluate the access gate for one protected-view check.
///
/// Order matters and is fixed:
///
/// 1. no authenticated session -> redirect to login
/// 2. missing profile -> redirect to login (invalid account)
/// 3. status other than approved -> redirect to pending
/// 4. no local fingerprint -> forced logout, redirect to login
/// 5. no session row -> forced logout, redirect to login (the gate never
///    creates a session; only login does)
/// 6. fingerprint mismatch or inactive row -> forced logout, redirect to
///    login (a newer login elsewhere overwrote the binding)
/// 7. otherwise allow, touching `last_seen`
pub fn evaluate(input: &GateInput) -> GateEvaluation {
    if !input.authenticated {
        return GateEvaluation::redirect_login(false);
    }

    let Some(status) = input.profile_status else {
        return GateEvaluation::redirect_login(false);
    };

    if status != ApprovalStatus::Approved {
        return GateEvaluation::redirect_pending();
    }

    let Some(local_device_id) = input.local_device_id.as_deref() else {
        return GateEvaluation::redirect_login(true);
    };

    let Some(binding) = &input.binding else {
        return GateEvaluation::redirect_login(true);
    };

    if binding.device_id != local_device_id || !binding.is_active {
        return GateEvaluation::redirect_login(true);
    }

    GateEvaluation::allow()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approved_input(device: &str, binding_device: &str, is_active: bool) -> GateInput {
        GateInput {
            authenticated: true,
            profile_status: Some(ApprovalStatus::Approved),
            local_device_id: Some(device.to_string()),
            binding: Some(SessionBinding {
                device_id: binding_device.to_string(),
                is_active,
            }),
        }
    }

    #[test]
    fn test_no_session_redirects_to_login() {
        let input = GateInput {
            authenticated: false,
            profile_status: Some(ApprovalStatus::Approved),
            local_device_id: Some("dev-x".into()),
            binding: Some(SessionBinding {
                device_id: "dev-x".into(),
                is_active: true,
            }),
        };
        let eval = evaluate(&input);
        assert_eq!(eval.decision, GateDecision::RedirectLogin);
        assert!(!eval.force_logout, "nothing to log out without a session");
    }

    #[test]
    fn test_missing_profile_redirects_to_login() {
        let input = GateInput {
            authenticated: true,
            profile_status: None,
            local_device_id: Some("dev-x".into()),
            binding: None,
        };
        let eval = evaluate(&input);
        assert_eq!(eval.decision, GateDecision::RedirectLogin);
        assert!(!eval.force_logout);
    }

    #[test]
    fn test_pending_redirects_to_pending_regardless_of_binding() {
        for binding in [
            None,
            Some(SessionBinding {
                device_id: "dev-x".into(),
                is_active: true,
            }),
            Some(SessionBinding {
                device_id: "other".into(),
                is_active: false,
            }),
        ] {
            let input = GateInput {
                authenticated: true,
                profile_status: Some(ApprovalStatus::Pending),
                local_device_id: Some("dev-x".into()),
                binding,
            };
            assert_eq!(evaluate(&input).decision, GateDecision::RedirectPending);
        }
    }

    #[test]
    fn test_rejected_also_redirects_to_pending() {
        // Rejected users share the pending screen. Kept as observed.
        let input = GateInput {
            authenticated: true,
            profile_status: Some(ApprovalStatus::Rejected),
            local_device_id: Some("dev-x".into()),
            binding: None,
        };
        assert_eq!(evaluate(&input).decision, GateDecision::RedirectPending);
    }

    #[test]
    fn test_missing_fingerprint_forces_logout() {
        let input = GateInput {
            authenticated: true,
            profile_status: Some(ApprovalStatus::Approved),
            local_device_id: None,
            binding: Some(SessionBinding {
                device_id: "dev-x".into(),
                is_active: true,
            }),
        };
        let eval = evaluate(&input);
        assert_eq!(eval.decision, GateDecision::RedirectLogin);
        assert!(eval.force_logout);
    }

    #[test]
    fn test_missing_session_row_forces_logout() {
        let input = GateInput {
            authenticated: true,
            profile_status: Some(ApprovalStatus::Approved),
            local_device_id: Some("dev-x".into()),
            binding: None,
        };
        let eval = evaluate(&input);
        assert_eq!(eval.decision, GateDecision::RedirectLogin);
        assert!(eval.force_logout, "the gate never creates a session row");
    }

    #[test]
    fn test_matching_active_binding_allows() {
        let eval = evaluate(&approved_input("dev-x", "dev-x", true));
        assert_eq!(eval.decision, GateDecision::Allow);
        assert!(!eval.force_logout);
        assert!(eval.touch_last_seen);
    }

    #[test]
    fn test_kick_fingerprint_mismatch_forces_logout() {
        // A login on device Y overwrote the binding; device X is now stale.
        let eval = evaluate(&approved_input("dev-x", "dev-y", true));
        assert_eq!(eval.decision, GateDecision::RedirectLogin);
        assert!(eval.force_logout);
    }

    #[test]
    fn test_inactive_binding_forces_logout_even_with_matching_fingerprint() {
        // Logout cleared is_active; the fingerprint still matches.
        let eval = evaluate(&approved_input("dev-x", "dev-x", false));
        assert_eq!(eval.decision, GateDecision::RedirectLogin);
        assert!(eval.force_logout);
    }

    #[test]
    fn test_evaluation_is_idempotent_for_unchanged_inputs() {
        let input = approved_input("dev-x", "dev-x", true);
        let first = evaluate(&input);
        let second = evaluate(&input);
        assert_eq!(first, second);
        // The only permitted mutation is the last_seen touch.
        assert!(first.touch_last_seen);
        assert!(!first.force_logout);
    }
}
