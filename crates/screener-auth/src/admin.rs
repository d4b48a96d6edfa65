//! Admin authorization policy.

use screener_core::config::AuthConfig;

use crate::identity::VerifiedIdentity;

/// Decides whether a verified identity may administer press links.
///
/// A principal is an admin when its email contains the configured marker.
#[derive(Debug, Clone)]
pub struct AdminPolicy {
    email_marker: String,
}

impl AdminPolicy {
    /// Creates a policy matching emails that contain `email_marker`.
    pub fn new(email_marker: impl Into<String>) -> Self {
        Self {
            email_marker: email_marker.into(),
        }
    }

    /// Creates a policy from auth configuration.
    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(config.admin_email_marker.clone())
    }

    /// Returns the admin email for `identity`, or `None` if it is not an admin.
    pub fn admin_email<'a>(&self, identity: &'a VerifiedIdentity) -> Option<&'a str> {
        identity
            .email
            .as_deref()
            .filter(|email| !self.email_marker.is_empty() && email.contains(&self.email_marker))
    }

    /// Whether `identity` is an admin.
    pub fn is_admin(&self, identity: &VerifiedIdentity) -> bool {
        self.admin_email(identity).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(email: Option<&str>) -> VerifiedIdentity {
        VerifiedIdentity {
            subject: "u".to_string(),
            email: email.map(str::to_string),
        }
    }

    #[test]
    fn test_marker_match() {
        let policy = AdminPolicy::new("developer");
        assert!(policy.is_admin(&identity(Some("lead.developer@studio.test"))));
        assert!(!policy.is_admin(&identity(Some("critic@paper.test"))));
        assert!(!policy.is_admin(&identity(None)));
    }

    #[test]
    fn test_empty_marker_admits_nobody() {
        let policy = AdminPolicy::new("");
        assert!(!policy.is_admin(&identity(Some("anyone@studio.test"))));
    }
}
