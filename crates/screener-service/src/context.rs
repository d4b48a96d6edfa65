//! Request context carrying the authorized admin.

use serde::{Deserialize, Serialize};

/// The admin on whose behalf an operation runs.
///
/// Built by the HTTP layer only after the bearer token has been verified and
/// the admin policy has accepted the identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminContext {
    /// Identity provider subject.
    pub subject: String,
    /// Verified admin email, recorded as `createdBy` on new links.
    pub email: String,
}

impl AdminContext {
    /// Creates a new admin context.
    pub fn new(subject: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            email: email.into(),
        }
    }
}
