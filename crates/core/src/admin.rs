//! The admin identity check.
//!
//! A narrower gate than [`crate::gate`]: no profile-status lookup and no
//! device binding. Authorization is solely "the authenticated identity is the
//! configured administrator", matched by id or by email. Matching both ways
//! supports migrating the admin account between an id-pinned and an
//! email-pinned configuration.

use crate::types::DbId;

/// Deployment-supplied administrator identifiers.
///
/// Injected at construction rather than read from a global, so tests can
/// supply arbitrary values. Either field may be absent; an absent field
/// simply never matches.
#[derive(Debug, Clone, Default)]
pub struct AdminIdentifiers {
    pub user_id: Option<DbId>,
    pub email: Option<String>,
}

impl AdminIdentifiers {
    /// Whether the given identity is the administrator.
    ///
    /// Id match OR email match; either alone is sufficient. With neither
    /// identifier configured the check always denies -- it never degrades
    /// to "always allow".
    pub fn matches(&self, user_id: DbId, email: &str) -> bool {
        let id_match = self.user_id.is_some_and(|admin_id| admin_id == user_id);
        let email_match = self
            .email
            .as_deref()
            .is_some_and(|admin_email| admin_email == email);
        id_match || email_match
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn both() -> AdminIdentifiers {
        AdminIdentifiers {
            user_id: Some(7),
            email: Some("admin@loja.com.br".to_string()),
        }
    }

    #[test]
    fn test_id_match_is_sufficient() {
        assert!(both().matches(7, "someone-else@example.com"));
    }

    #[test]
    fn test_email_match_is_sufficient() {
        assert!(both().matches(999, "admin@loja.com.br"));
    }

    #[test]
    fn test_no_match_denies() {
        // Sign-in may have succeeded upstream; the check still denies.
        assert!(!both().matches(999, "someone-else@example.com"));
    }

    #[test]
    fn test_email_only_configuration() {
        let ids = AdminIdentifiers {
            user_id: None,
            email: Some("admin@loja.com.br".to_string()),
        };
        assert!(ids.matches(1, "admin@loja.com.br"));
        assert!(!ids.matches(1, "other@loja.com.br"));
    }

    #[test]
    fn test_id_only_configuration() {
        let ids = AdminIdentifiers {
            user_id: Some(7),
            email: None,
        };
        assert!(ids.matches(7, "whoever@example.com"));
        assert!(!ids.matches(8, "whoever@example.com"));
    }

    #[test]
    fn test_unconfigured_never_allows() {
        let ids = AdminIdentifiers::default();
        assert!(!ids.matches(1, "admin@loja.com.br"));
    }

    #[test]
    fn test_email_comparison_is_exact() {
        let ids = AdminIdentifiers {
            user_id: None,
            email: Some("admin@loja.com.br".to_string()),
        };
        assert!(!ids.matches(1, "Admin@loja.com.br"));
    }
}
