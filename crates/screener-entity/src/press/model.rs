//! Press link entity model.

use chrono::serde::{ts_milliseconds, ts_milliseconds_option};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use screener_core::types::PressLinkId;

use super::status::LinkStatus;
use super::view::PressLinkView;

/// A capability-bearing link granting time-limited access to one screener.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct PressLink {
    /// Store-assigned identifier.
    pub id: PressLinkId,
    /// Public capability token; the only key anonymous callers may use.
    pub token: String,
    /// Hosted video reference.
    pub video_id: String,
    /// Catalog movie reference.
    pub movie_id: i64,
    /// Movie title copied at creation time.
    pub movie_title: String,
    /// Email of the issuing admin.
    pub created_by: String,
    /// Creation instant.
    #[serde(with = "ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    /// Recipient email.
    pub recipient_email: String,
    /// Recipient display name.
    pub recipient_name: String,
    /// Recipient organization (outlet, festival, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    /// Free-form admin notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Absolute expiration instant.
    #[serde(with = "ts_milliseconds")]
    pub expires_at: DateTime<Utc>,
    /// SHA-256 hex digest of the access password, if gated.
    #[serde(rename = "password", default, skip_serializing)]
    pub password_hash: Option<String>,
    /// False once an admin deactivates the link.
    pub active: bool,
    /// Number of tracked views.
    pub view_count: i64,
    /// First tracked view.
    #[serde(
        default,
        with = "ts_milliseconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub first_viewed_at: Option<DateTime<Utc>>,
    /// Most recent tracked view.
    #[serde(
        default,
        with = "ts_milliseconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_viewed_at: Option<DateTime<Utc>>,
    /// Tracked views in chronological order.
    #[sqlx(json)]
    #[serde(default)]
    pub views: Vec<PressLinkView>,
}

impl PressLink {
    /// Whether access is gated by a password.
    pub fn requires_password(&self) -> bool {
        self.password_hash.is_some()
    }

    /// Whether `now` is past the expiration instant.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    /// Lifecycle status as seen at `now`.
    pub fn status_at(&self, now: DateTime<Utc>) -> LinkStatus {
        if !self.active {
            LinkStatus::Inactive
        } else if self.is_expired_at(now) {
            LinkStatus::Expired
        } else {
            LinkStatus::Active
        }
    }

    /// Records a view in place.
    ///
    /// Appends the event, bumps the counter, moves `last_viewed_at` and sets
    /// `first_viewed_at` only the first time. Callers must hold whatever lock
    /// makes this read-modify-write atomic for their store.
    pub fn apply_view(&mut self, view: PressLinkView) {
        let at = view.timestamp;
        self.views.push(view);
        self.view_count += 1;
        self.last_viewed_at = Some(at);
        if self.first_viewed_at.is_none() {
            self.first_viewed_at = Some(at);
        }
    }
}

/// Data required to insert a new press link.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPressLink {
    /// Freshly minted token.
    pub token: String,
    /// Hosted video reference.
    pub video_id: String,
    /// Catalog movie reference.
    pub movie_id: i64,
    /// Movie title.
    pub movie_title: String,
    /// Issuing admin email.
    pub created_by: String,
    /// Creation instant.
    pub created_at: DateTime<Utc>,
    /// Recipient email.
    pub recipient_email: String,
    /// Recipient name.
    pub recipient_name: String,
    /// Recipient organization.
    pub organization: Option<String>,
    /// Admin notes.
    pub notes: Option<String>,
    /// Already-capped expiration instant.
    pub expires_at: DateTime<Utc>,
    /// Already-hashed password.
    pub password_hash: Option<String>,
}

impl NewPressLink {
    /// Materializes the stored record under the given identifier.
    pub fn into_link(self, id: PressLinkId) -> PressLink {
        PressLink {
            id,
            token: self.token,
            video_id: self.video_id,
            movie_id: self.movie_id,
            movie_title: self.movie_title,
            created_by: self.created_by,
            created_at: self.created_at,
            recipient_email: self.recipient_email,
            recipient_name: self.recipient_name,
            organization: self.organization,
            notes: self.notes,
            expires_at: self.expires_at,
            password_hash: self.password_hash,
            active: true,
            view_count: 0,
            first_viewed_at: None,
            last_viewed_at: None,
            views: Vec::new(),
        }
    }
}
