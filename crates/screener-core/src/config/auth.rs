//! Admin authentication configuration.

use serde::{Deserialize, Serialize};

/// Settings for verifying admin bearer credentials.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Shared secret for HS256 bearer token verification.
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// Allowed clock skew when checking `exp`, in seconds.
    #[serde(default = "default_leeway")]
    pub leeway_seconds: u64,
    /// Substring a verified email must contain to count as an administrator.
    #[serde(default = "default_admin_marker")]
    pub admin_email_marker: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            leeway_seconds: default_leeway(),
            admin_email_marker: default_admin_marker(),
        }
    }
}

fn default_jwt_secret() -> String {
    "CHANGE_ME_IN_PRODUCTION".to_string()
}

fn default_leeway() -> u64 {
    5
}

fn default_admin_marker() -> String {
    "developer".to_string()
}
