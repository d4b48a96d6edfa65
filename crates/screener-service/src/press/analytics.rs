//! View recording with anonymized client addresses.

use std::sync::Arc;

use sha2::{Digest, Sha256};
use tracing::{info, warn};

use screener_core::error::AppError;
use screener_core::result::AppResult;
use screener_core::traits::Clock;
use screener_database::{PressLinkStore, ViewAppend};
use screener_entity::press::{PressLink, PressLinkView};

use super::validity::evaluate;

/// Placeholder used when the client address or user agent is unavailable.
pub const UNKNOWN_CLIENT: &str = "unknown";

/// What the transport layer knows about the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientInfo {
    /// Raw client address, not yet anonymized.
    pub ip_address: String,
    /// Client user agent.
    pub user_agent: String,
}

impl ClientInfo {
    /// Creates client info, substituting `"unknown"` for missing values.
    pub fn new(ip_address: Option<String>, user_agent: Option<String>) -> Self {
        Self {
            ip_address: ip_address.unwrap_or_else(|| UNKNOWN_CLIENT.to_string()),
            user_agent: user_agent.unwrap_or_else(|| UNKNOWN_CLIENT.to_string()),
        }
    }
}

/// One-way, deterministic anonymization of a client address.
///
/// Dotted quads keep their first three octets and replace the last with 8 hex
/// chars of its SHA-256. Anything else becomes the first 16 hex chars of the
/// SHA-256 of the whole string.
pub fn anonymize_ip(ip: &str) -> String {
    let parts: Vec<&str> = ip.split('.').collect();
    if let [a, b, c, last] = parts.as_slice() {
        let digest = hex::encode(Sha256::digest(last.as_bytes()));
        return format!("{a}.{b}.{c}.{}", &digest[..8]);
    }
    let digest = hex::encode(Sha256::digest(ip.as_bytes()));
    digest[..16].to_string()
}

/// Appends view events to usable links.
#[derive(Debug, Clone)]
pub struct ViewRecorder {
    store: Arc<dyn PressLinkStore>,
    clock: Arc<dyn Clock>,
}

impl ViewRecorder {
    /// Creates a new view recorder.
    pub fn new(store: Arc<dyn PressLinkStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Records one view of `link` and returns the updated link.
    ///
    /// Refuses deactivated or expired links. `link` may be stale: the store
    /// re-checks usability and performs the append, the counter bump and the
    /// timestamp moves in one atomic step.
    pub async fn record(
        &self,
        link: &PressLink,
        client: &ClientInfo,
        duration: Option<f64>,
    ) -> AppResult<PressLink> {
        let now = self.clock.now();

        if let Some(reason) = evaluate(Some(link), now).reason() {
            warn!(link_id = %link.id, reason = %reason, "Refused to track view");
            return Err(reason.into_error());
        }

        if duration.is_some_and(|d| !d.is_finite() || d < 0.0) {
            return Err(AppError::validation(
                "Duration must be a non-negative number of seconds",
            ));
        }

        let view = PressLinkView::new(
            now,
            anonymize_ip(&client.ip_address),
            client.user_agent.clone(),
            duration,
        );

        let updated = match self.store.append_view(link.id, view).await? {
            ViewAppend::Recorded(updated) => updated,
            ViewAppend::Missing => return Err(AppError::not_found("Press link not found")),
            ViewAppend::Refused(current) => {
                return Err(match evaluate(Some(&current), now).reason() {
                    Some(reason) => {
                        warn!(
                            link_id = %current.id,
                            reason = %reason,
                            "Link became unusable before view was stored"
                        );
                        reason.into_error()
                    }
                    None => AppError::conflict("Press link changed while recording view"),
                });
            }
        };

        info!(
            link_id = %updated.id,
            view_count = updated.view_count,
            "Press link view tracked"
        );

        Ok(updated)
    }
}
