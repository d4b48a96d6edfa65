//! Request DTOs with validation.
//!
//! Instants on the wire are epoch milliseconds.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use validator::{Validate, ValidateEmail};

use screener_core::error::AppError;
use screener_core::result::AppResult;
use screener_entity::press::{Patch, StatusFilter};
use screener_service::press::service::MISSING_FIELDS_MESSAGE;
use screener_service::{CreatePressLink, UpdatePressLink};

/// Create press link request body.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePressLinkRequest {
    /// Hosted video reference.
    pub video_id: Option<String>,
    /// Catalog movie reference.
    pub movie_id: Option<i64>,
    /// Movie title.
    pub movie_title: Option<String>,
    /// Recipient email.
    #[validate(email(message = "Invalid recipient email"))]
    pub recipient_email: Option<String>,
    /// Recipient name.
    pub recipient_name: Option<String>,
    /// Recipient organization.
    pub organization: Option<String>,
    /// Requested expiration, epoch milliseconds.
    pub expires_at: Option<i64>,
    /// Optional access password.
    pub password: Option<String>,
    /// Admin notes.
    pub notes: Option<String>,
}

impl CreatePressLinkRequest {
    /// Checks required fields and formats and converts to service input.
    pub fn into_input(self) -> AppResult<CreatePressLink> {
        let (
            Some(video_id),
            Some(movie_id),
            Some(movie_title),
            Some(recipient_email),
            Some(recipient_name),
            Some(expires_at),
        ) = (
            present(self.video_id.clone()),
            self.movie_id.filter(|id| *id != 0),
            present(self.movie_title.clone()),
            present(self.recipient_email.clone()),
            present(self.recipient_name.clone()),
            self.expires_at,
        )
        else {
            return Err(AppError::validation(MISSING_FIELDS_MESSAGE));
        };

        self.validate()
            .map_err(|e| AppError::validation(format!("Validation failed: {e}")))?;

        Ok(CreatePressLink {
            video_id,
            movie_id,
            movie_title,
            recipient_email,
            recipient_name,
            organization: self.organization,
            expires_at: from_millis(expires_at)?,
            password: self.password,
            notes: self.notes,
        })
    }
}

/// Update press link request body. Omitted fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdatePressLinkRequest {
    /// New recipient email.
    pub recipient_email: Patch<String>,
    /// New recipient name.
    pub recipient_name: Patch<String>,
    /// New organization.
    pub organization: Patch<String>,
    /// New requested expiration, epoch milliseconds.
    pub expires_at: Patch<i64>,
    /// New access password.
    pub password: Patch<String>,
    /// New active flag.
    pub active: Patch<bool>,
    /// New notes.
    pub notes: Patch<String>,
}

impl UpdatePressLinkRequest {
    /// Checks formats and converts to service input.
    pub fn into_input(self) -> AppResult<UpdatePressLink> {
        if let Some(email) = self.recipient_email.as_set() {
            if !email.validate_email() {
                return Err(AppError::validation("Invalid recipient email"));
            }
        }

        let expires_at = match self.expires_at {
            Patch::Set(millis) => Patch::Set(from_millis(millis)?),
            Patch::Unchanged => Patch::Unchanged,
        };

        Ok(UpdatePressLink {
            recipient_email: self.recipient_email,
            recipient_name: self.recipient_name,
            organization: self.organization,
            expires_at,
            password: self.password,
            active: self.active,
            notes: self.notes,
        })
    }
}

/// Query parameters for the admin listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListPressLinksQuery {
    /// `active`, `expired`, `inactive` or `all` (default).
    pub status: Option<String>,
    /// Maximum number of links.
    pub limit: Option<usize>,
}

impl ListPressLinksQuery {
    /// Parses the status filter.
    pub fn status_filter(&self) -> AppResult<StatusFilter> {
        match self.status.as_deref() {
            None | Some("") => Ok(StatusFilter::All),
            Some(raw) => raw.parse().map_err(AppError::validation),
        }
    }
}

/// Password verification request body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VerifyPasswordRequest {
    /// Candidate password.
    #[serde(default)]
    pub password: String,
}

/// View tracking request body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TrackViewRequest {
    /// Seconds watched, when the player reports it.
    pub duration: Option<f64>,
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn from_millis(millis: i64) -> AppResult<DateTime<Utc>> {
    DateTime::from_timestamp_millis(millis)
        .ok_or_else(|| AppError::validation("expiresAt is out of range"))
}
