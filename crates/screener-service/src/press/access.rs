//! Public press link access: validation, password checks, video metadata and
//! view tracking for anonymous token holders.

use std::sync::Arc;

use chrono::serde::ts_milliseconds_option;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};

use screener_auth::PasswordHasher;
use screener_core::error::AppError;
use screener_core::result::AppResult;
use screener_core::traits::Clock;
use screener_database::PressLinkStore;
use screener_entity::press::PressLink;

use super::analytics::{ClientInfo, ViewRecorder};
use super::validity::{InvalidReason, LinkValidity, evaluate};

/// Public metadata of a usable link.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidLink {
    /// Whether a password must be verified before watching.
    pub requires_password: bool,
    /// Movie title.
    pub movie_title: String,
    /// Catalog movie reference.
    pub movie_id: i64,
    /// Hosted video reference.
    pub video_id: String,
}

impl From<&PressLink> for ValidLink {
    fn from(link: &PressLink) -> Self {
        Self {
            requires_password: link.requires_password(),
            movie_title: link.movie_title.clone(),
            movie_id: link.movie_id,
            video_id: link.video_id.clone(),
        }
    }
}

/// Result of validating a token.
#[derive(Debug, Clone, PartialEq)]
pub enum LinkValidation {
    /// The link is usable.
    Valid(ValidLink),
    /// The link is unusable.
    Invalid(InvalidReason),
}

/// Result of checking a link password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PasswordCheck {
    /// Whether access is granted.
    pub valid: bool,
    /// Human-readable outcome.
    pub message: String,
}

impl PasswordCheck {
    fn granted(message: &str) -> Self {
        Self {
            valid: true,
            message: message.to_string(),
        }
    }

    fn denied(message: &str) -> Self {
        Self {
            valid: false,
            message: message.to_string(),
        }
    }
}

/// What a recipient needs to start playback.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PressVideo {
    /// Hosted video reference.
    pub video_id: String,
    /// Catalog movie reference.
    pub movie_id: i64,
    /// Movie title.
    pub movie_title: String,
    /// Whether the link is password gated.
    pub requires_password: bool,
}

/// Counters after a tracked view.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewReceipt {
    /// Total tracked views.
    pub view_count: i64,
    /// First tracked view.
    #[serde(with = "ts_milliseconds_option")]
    pub first_viewed_at: Option<DateTime<Utc>>,
    /// This view.
    #[serde(with = "ts_milliseconds_option")]
    pub last_viewed_at: Option<DateTime<Utc>>,
}

/// Handles anonymous access through press link tokens.
#[derive(Debug, Clone)]
pub struct AccessService {
    /// Press link store.
    store: Arc<dyn PressLinkStore>,
    /// Password hasher for verification.
    hasher: Arc<PasswordHasher>,
    /// View recorder for tracking.
    recorder: ViewRecorder,
    /// Time source.
    clock: Arc<dyn Clock>,
}

impl AccessService {
    /// Creates a new access service.
    pub fn new(
        store: Arc<dyn PressLinkStore>,
        hasher: Arc<PasswordHasher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let recorder = ViewRecorder::new(Arc::clone(&store), Arc::clone(&clock));
        Self {
            store,
            hasher,
            recorder,
            clock,
        }
    }

    /// Reports whether `token` names a usable link, without raising for
    /// unusable ones.
    pub async fn validate(&self, token: &str) -> AppResult<LinkValidation> {
        let link = self.store.find_by_token(token).await?;
        let validation = match link {
            None => LinkValidation::Invalid(InvalidReason::NotFound),
            Some(link) => match evaluate(Some(&link), self.clock.now()) {
                LinkValidity::Valid => LinkValidation::Valid(ValidLink::from(&link)),
                LinkValidity::Invalid(reason) => LinkValidation::Invalid(reason),
            },
        };

        if let LinkValidation::Invalid(reason) = &validation {
            debug!(reason = %reason, "Press link failed validation");
        }
        Ok(validation)
    }

    /// Checks `password` against the link's password.
    pub async fn verify_password(&self, token: &str, password: &str) -> AppResult<PasswordCheck> {
        if password.is_empty() {
            return Err(AppError::validation("Password is required"));
        }

        let Some(link) = self.store.find_by_token(token).await? else {
            return Ok(PasswordCheck::denied(InvalidReason::NotFound.message()));
        };
        if let Some(reason) = evaluate(Some(&link), self.clock.now()).reason() {
            return Ok(PasswordCheck::denied(reason.message()));
        }

        let Some(hash) = link.password_hash.as_deref() else {
            return Ok(PasswordCheck::granted("No password required"));
        };

        if self.hasher.verify_password(password, hash) {
            info!(link_id = %link.id, "Press link password verified");
            Ok(PasswordCheck::granted("Password verified successfully"))
        } else {
            info!(link_id = %link.id, "Press link password rejected");
            Ok(PasswordCheck::denied("Invalid password"))
        }
    }

    /// Returns the video metadata for a usable link.
    ///
    /// Password-gated links require the correct password.
    pub async fn video(&self, token: &str, password: Option<&str>) -> AppResult<PressVideo> {
        let link = self.usable_link(token).await?;

        if let Some(hash) = link.password_hash.as_deref() {
            match password.filter(|p| !p.is_empty()) {
                None => return Err(AppError::unauthorized("Password required")),
                Some(p) if !self.hasher.verify_password(p, hash) => {
                    return Err(AppError::unauthorized("Invalid password"));
                }
                Some(_) => {}
            }
        }

        Ok(PressVideo {
            video_id: link.video_id,
            movie_id: link.movie_id,
            movie_title: link.movie_title,
            requires_password: link.password_hash.is_some(),
        })
    }

    /// Records a view of the link named by `token`.
    pub async fn track_view(
        &self,
        token: &str,
        client: &ClientInfo,
        duration: Option<f64>,
    ) -> AppResult<ViewReceipt> {
        let link = self
            .store
            .find_by_token(token)
            .await?
            .ok_or_else(|| AppError::not_found("Press link not found"))?;

        let updated = self.recorder.record(&link, client, duration).await?;

        Ok(ViewReceipt {
            view_count: updated.view_count,
            first_viewed_at: updated.first_viewed_at,
            last_viewed_at: updated.last_viewed_at,
        })
    }

    /// Fetches the link for `token` and fails unless it is usable.
    async fn usable_link(&self, token: &str) -> AppResult<PressLink> {
        let link = self
            .store
            .find_by_token(token)
            .await?
            .ok_or_else(|| AppError::not_found("Press link not found"))?;
        evaluate(Some(&link), self.clock.now()).into_result()?;
        Ok(link)
    }
}
