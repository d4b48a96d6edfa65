//! Embedded view event.

use chrono::serde::ts_milliseconds;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One recorded access to a press link. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PressLinkView {
    /// When the view was tracked.
    #[serde(with = "ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
    /// Anonymized client address.
    pub ip_address: String,
    /// Client user agent.
    pub user_agent: String,
    /// Seconds watched, when reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
}

impl PressLinkView {
    /// Creates a view event. `ip_address` must already be anonymized.
    pub fn new(
        timestamp: DateTime<Utc>,
        ip_address: impl Into<String>,
        user_agent: impl Into<String>,
        duration: Option<f64>,
    ) -> Self {
        Self {
            timestamp,
            ip_address: ip_address.into(),
            user_agent: user_agent.into(),
            duration,
        }
    }
}
