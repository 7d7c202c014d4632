//! Account approval status and the rules governing its transitions.
//!
//! Every registered user has exactly one profile whose status starts at
//! [`ApprovalStatus::Pending`]. Only an administrator moves it from there;
//! nothing in the system flips a status automatically.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Approval status of a user profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApprovalStatus {
    /// Registered, awaiting an administrator's decision.
    Pending,
    /// Cleared for catalog access.
    Approved,
    /// Denied by an administrator.
    Rejected,
}

impl ApprovalStatus {
    /// The canonical string stored in the `profiles.status` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            ApprovalStatus::Pending => "pending",
            ApprovalStatus::Approved => "approved",
            ApprovalStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for ApprovalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApprovalStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ApprovalStatus::Pending),
            "approved" => Ok(ApprovalStatus::Approved),
            "rejected" => Ok(ApprovalStatus::Rejected),
            other => Err(format!(
                "Invalid approval status '{other}'. Must be one of: pending, approved, rejected"
            )),
        }
    }
}

/// Validate an administrator-initiated status change.
///
/// An admin decides `approved` or `rejected`; a profile is never returned to
/// `pending`. Re-applying the current decision is a no-op and allowed.
pub fn validate_admin_transition(
    from: ApprovalStatus,
    to: ApprovalStatus,
) -> Result<(), String> {
    if to == ApprovalStatus::Pending {
        return Err("A profile cannot be returned to pending".to_string());
    }
    let _ = from;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_string_round_trip() {
        for status in [
            ApprovalStatus::Pending,
            ApprovalStatus::Approved,
            ApprovalStatus::Rejected,
        ] {
            let parsed: ApprovalStatus = status.as_str().parse().expect("canonical string parses");
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn test_unknown_status_rejected() {
        let result = ApprovalStatus::from_str("banned");
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Invalid approval status"));
    }

    #[test]
    fn test_empty_status_rejected() {
        assert!(ApprovalStatus::from_str("").is_err());
    }

    #[test]
    fn test_admin_can_approve_pending() {
        assert!(validate_admin_transition(ApprovalStatus::Pending, ApprovalStatus::Approved).is_ok());
    }

    #[test]
    fn test_admin_can_reject_pending() {
        assert!(validate_admin_transition(ApprovalStatus::Pending, ApprovalStatus::Rejected).is_ok());
    }

    #[test]
    fn test_admin_can_reverse_a_decision() {
        // No automatic reversal exists, but an admin may change their mind.
        assert!(
            validate_admin_transition(ApprovalStatus::Approved, ApprovalStatus::Rejected).is_ok()
        );
        assert!(
            validate_admin_transition(ApprovalStatus::Rejected, ApprovalStatus::Approved).is_ok()
        );
    }

    #[test]
    fn test_no_return_to_pending() {
        let result =
            validate_admin_transition(ApprovalStatus::Approved, ApprovalStatus::Pending);
        assert!(result.is_err());
    }
}
