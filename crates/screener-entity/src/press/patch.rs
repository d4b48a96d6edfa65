//! Typed partial updates.
//!
//! A field that is absent from an update request must leave the stored value
//! alone. [`Patch`] makes that explicit per field instead of relying on
//! "undefined" keys.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::model::PressLink;

/// Either keep the stored value or replace it.
#[derive(Debug, Clone, PartialEq)]
pub enum Patch<T> {
    /// Leave the stored value as is.
    Unchanged,
    /// Replace the stored value.
    Set(T),
}

impl<T> Default for Patch<T> {
    fn default() -> Self {
        Self::Unchanged
    }
}

impl<T> Patch<T> {
    /// Whether this patch replaces the value.
    pub fn is_set(&self) -> bool {
        matches!(self, Self::Set(_))
    }

    /// Whether this patch leaves the value alone.
    pub fn is_unchanged(&self) -> bool {
        matches!(self, Self::Unchanged)
    }

    /// Borrow the replacement value.
    pub fn as_set(&self) -> Option<&T> {
        match self {
            Self::Set(value) => Some(value),
            Self::Unchanged => None,
        }
    }

    /// Convert the replacement value, keeping `Unchanged` as is.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Patch<U> {
        match self {
            Self::Set(value) => Patch::Set(f(value)),
            Self::Unchanged => Patch::Unchanged,
        }
    }

    /// Overwrite `target` if set.
    pub fn apply(self, target: &mut T) {
        if let Self::Set(value) = self {
            *target = value;
        }
    }
}

impl Patch<String> {
    /// Treats a blank replacement string as "no change".
    pub fn ignore_blank(self) -> Self {
        match self {
            Self::Set(value) if value.trim().is_empty() => Self::Unchanged,
            other => other,
        }
    }
}

impl<T> From<Option<T>> for Patch<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Self::Set(value),
            None => Self::Unchanged,
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Patch<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        T::deserialize(deserializer).map(Self::Set)
    }
}

impl<T: Serialize> Serialize for Patch<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Set(value) => value.serialize(serializer),
            Self::Unchanged => serializer.serialize_none(),
        }
    }
}

/// Store-level update of a press link.
///
/// Values here are already normalized: the password is hashed and the
/// expiration capped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PressLinkPatch {
    /// New recipient email.
    pub recipient_email: Patch<String>,
    /// New recipient name.
    pub recipient_name: Patch<String>,
    /// New organization.
    pub organization: Patch<String>,
    /// New notes.
    pub notes: Patch<String>,
    /// New (capped) expiration.
    pub expires_at: Patch<DateTime<Utc>>,
    /// New password hash.
    pub password_hash: Patch<String>,
    /// New active flag.
    pub active: Patch<bool>,
}

impl PressLinkPatch {
    /// The soft-delete patch.
    pub fn deactivate() -> Self {
        Self {
            active: Patch::Set(false),
            ..Self::default()
        }
    }

    /// True when no field would change.
    pub fn is_empty(&self) -> bool {
        self.recipient_email.is_unchanged()
            && self.recipient_name.is_unchanged()
            && self.organization.is_unchanged()
            && self.notes.is_unchanged()
            && self.expires_at.is_unchanged()
            && self.password_hash.is_unchanged()
            && self.active.is_unchanged()
    }

    /// Names of the fields this patch sets, for logging.
    pub fn changed_fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.recipient_email.is_set() {
            fields.push("recipient_email");
        }
        if self.recipient_name.is_set() {
            fields.push("recipient_name");
        }
        if self.organization.is_set() {
            fields.push("organization");
        }
        if self.notes.is_set() {
            fields.push("notes");
        }
        if self.expires_at.is_set() {
            fields.push("expires_at");
        }
        if self.password_hash.is_set() {
            fields.push("password");
        }
        if self.active.is_set() {
            fields.push("active");
        }
        fields
    }

    /// Applies every set field to `link`.
    pub fn apply_to(self, link: &mut PressLink) {
        self.recipient_email.apply(&mut link.recipient_email);
        self.recipient_name.apply(&mut link.recipient_name);
        if let Patch::Set(organization) = self.organization {
            link.organization = Some(organization);
        }
        if let Patch::Set(notes) = self.notes {
            link.notes = Some(notes);
        }
        self.expires_at.apply(&mut link.expires_at);
        if let Patch::Set(hash) = self.password_hash {
            link.password_hash = Some(hash);
        }
        self.active.apply(&mut link.active);
    }
}
