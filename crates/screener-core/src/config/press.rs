//! Press link configuration.

use serde::{Deserialize, Serialize};

/// Settings for issuing and listing press links.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PressConfig {
    /// Public site origin used to build shareable watch URLs.
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,
    /// Number of links returned by the admin listing when no limit is given.
    #[serde(default = "default_list_limit")]
    pub default_list_limit: usize,
}

impl Default for PressConfig {
    fn default() -> Self {
        Self {
            public_base_url: default_public_base_url(),
            default_list_limit: default_list_limit(),
        }
    }
}

fn default_public_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_list_limit() -> usize {
    100
}
