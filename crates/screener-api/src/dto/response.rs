//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use screener_entity::press::{LinkStatus, PressLink, watch_url};
use screener_service::press::{InvalidReason, LinkValidation, ValidLink};
use screener_service::{CreatedPressLink, PressLinkList};

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// A press link as shown to admins: the stored record without its password
/// hash, plus derived fields.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PressLinkResponse {
    /// The stored link.
    #[serde(flatten)]
    pub link: PressLink,
    /// Whether the link is password gated.
    pub has_password: bool,
    /// Derived lifecycle status.
    pub status: LinkStatus,
    /// Public watch URL.
    pub url: String,
}

impl PressLinkResponse {
    /// Builds the admin view of `link` as of `now`.
    pub fn new(link: PressLink, now: DateTime<Utc>, base_url: &str) -> Self {
        Self {
            has_password: link.requires_password(),
            status: link.status_at(now),
            url: watch_url(base_url, &link.token),
            link,
        }
    }
}

/// Admin listing response.
#[derive(Debug, Clone, Serialize)]
pub struct PressLinkListResponse {
    /// Links, newest first.
    pub links: Vec<PressLinkResponse>,
    /// Number of links returned.
    pub total: usize,
}

impl PressLinkListResponse {
    /// Builds the listing response as of `now`.
    pub fn new(list: PressLinkList, now: DateTime<Utc>, base_url: &str) -> Self {
        Self {
            total: list.total,
            links: list
                .links
                .into_iter()
                .map(|link| PressLinkResponse::new(link, now, base_url))
                .collect(),
        }
    }
}

/// Create response: the link plus what to send the recipient.
#[derive(Debug, Clone, Serialize)]
pub struct CreatedPressLinkResponse {
    /// The stored link.
    pub link: PressLinkResponse,
    /// Public watch URL.
    pub url: String,
    /// The link token.
    pub token: String,
}

impl CreatedPressLinkResponse {
    /// Builds the create response as of `now`.
    pub fn new(created: CreatedPressLink, now: DateTime<Utc>, base_url: &str) -> Self {
        Self {
            link: PressLinkResponse::new(created.link, now, base_url),
            url: created.url,
            token: created.token,
        }
    }
}

/// Public validation response.
///
/// Invalid: `{valid: false, expired, message}`. Valid: `{valid: true,
/// requiresPassword, movieTitle, movieId, videoId}`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkValidationResponse {
    /// Whether the link is usable.
    pub valid: bool,
    /// Whether the link is unusable because it expired.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expired: Option<bool>,
    /// Why the link is unusable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Link metadata when usable.
    #[serde(flatten)]
    pub link: Option<ValidLink>,
}

impl From<LinkValidation> for LinkValidationResponse {
    fn from(validation: LinkValidation) -> Self {
        match validation {
            LinkValidation::Valid(link) => Self {
                valid: true,
                expired: None,
                message: None,
                link: Some(link),
            },
            LinkValidation::Invalid(reason) => Self {
                valid: false,
                expired: Some(reason == InvalidReason::Expired),
                message: Some(reason.message().to_string()),
                link: None,
            },
        }
    }
}

/// Simple message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Message.
    pub message: String,
}

impl MessageResponse {
    /// Creates a message response.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `ok` or `degraded`.
    pub status: String,
    /// Crate version.
    pub version: String,
    /// Store backend reachability.
    pub store: String,
}
