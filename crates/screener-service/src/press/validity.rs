//! Link validity and expiration capping.

use std::fmt;

use chrono::{DateTime, Duration, Utc};

use screener_core::error::AppError;
use screener_core::result::AppResult;
use screener_entity::press::PressLink;

/// Longest lifetime a press link may be given, counted from creation or update.
pub const MAX_LINK_LIFETIME_DAYS: i64 = 90;

/// Why a link may not be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidReason {
    /// No link carries the token.
    NotFound,
    /// An admin deactivated the link.
    Deactivated,
    /// The expiration instant has passed.
    Expired,
}

impl InvalidReason {
    /// Message shown to the recipient.
    pub fn message(&self) -> &'static str {
        match self {
            Self::NotFound => "Link not found",
            Self::Deactivated => "Link has been deactivated",
            Self::Expired => "Link has expired",
        }
    }

    /// The error raised when an operation requires a usable link.
    pub fn into_error(self) -> AppError {
        match self {
            Self::NotFound => AppError::not_found(self.message()),
            Self::Deactivated => AppError::deactivated(self.message()),
            Self::Expired => AppError::expired(self.message()),
        }
    }
}

impl fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Outcome of evaluating a link at an instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkValidity {
    /// The link may be used.
    Valid,
    /// The link may not be used.
    Invalid(InvalidReason),
}

impl LinkValidity {
    /// Whether the link may be used.
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// The reason the link is unusable, if it is.
    pub fn reason(&self) -> Option<InvalidReason> {
        match self {
            Self::Valid => None,
            Self::Invalid(reason) => Some(*reason),
        }
    }

    /// `Ok(())` when valid, the matching error otherwise.
    pub fn into_result(self) -> AppResult<()> {
        match self {
            Self::Valid => Ok(()),
            Self::Invalid(reason) => Err(reason.into_error()),
        }
    }
}

/// Decides whether `link` may be used at `now`.
///
/// Checked in order: presence, the active flag, then expiration. A
/// deactivated link reports deactivation even once it has also expired.
pub fn evaluate(link: Option<&PressLink>, now: DateTime<Utc>) -> LinkValidity {
    match link {
        None => LinkValidity::Invalid(InvalidReason::NotFound),
        Some(link) if !link.active => LinkValidity::Invalid(InvalidReason::Deactivated),
        Some(link) if link.is_expired_at(now) => LinkValidity::Invalid(InvalidReason::Expired),
        Some(_) => LinkValidity::Valid,
    }
}

/// Caps `requested` at [`MAX_LINK_LIFETIME_DAYS`] after `now`.
pub fn safe_expiration(requested: DateTime<Utc>, now: DateTime<Utc>) -> DateTime<Utc> {
    requested.min(now + Duration::days(MAX_LINK_LIFETIME_DAYS))
}
