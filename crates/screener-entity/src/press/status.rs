//! Lifecycle status and listing filters.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::model::PressLink;

/// Status of a press link as seen at a given instant.
///
/// `Expired` is computed, never stored; `Inactive` is the stored soft-delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkStatus {
    /// Active and not expired.
    Active,
    /// Past its expiration instant.
    Expired,
    /// Deactivated by an admin.
    Inactive,
}

impl fmt::Display for LinkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Expired => write!(f, "expired"),
            Self::Inactive => write!(f, "inactive"),
        }
    }
}

/// Filter accepted by the admin listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusFilter {
    /// `active == true` and not expired.
    Active,
    /// Expired, regardless of the active flag.
    Expired,
    /// `active == false`.
    Inactive,
    /// Everything.
    #[default]
    All,
}

impl StatusFilter {
    /// The equality condition on `active` the store can evaluate itself.
    pub fn active_flag(&self) -> Option<bool> {
        match self {
            Self::Active => Some(true),
            Self::Inactive => Some(false),
            Self::Expired | Self::All => None,
        }
    }

    /// Whether `link` belongs in the listing at `now`.
    pub fn matches(&self, link: &PressLink, now: DateTime<Utc>) -> bool {
        match self {
            Self::Active => link.active && !link.is_expired_at(now),
            Self::Expired => link.is_expired_at(now),
            Self::Inactive => !link.active,
            Self::All => true,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "expired" => Ok(Self::Expired),
            "inactive" => Ok(Self::Inactive),
            "all" => Ok(Self::All),
            other => Err(format!("Invalid status filter: {other}")),
        }
    }
}
