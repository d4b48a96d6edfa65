//! Press links: issue, validate, gate, and track.

pub mod access;
pub mod analytics;
pub mod link;
pub mod service;
pub mod validity;

pub use access::{AccessService, LinkValidation, PasswordCheck, PressVideo, ValidLink, ViewReceipt};
pub use analytics::{ClientInfo, ViewRecorder, anonymize_ip};
pub use link::TokenIssuer;
pub use service::{
    CreatePressLink, CreatedPressLink, PressLinkList, PressLinkService, UpdatePressLink,
};
pub use validity::{InvalidReason, LinkValidity, MAX_LINK_LIFETIME_DAYS, evaluate, safe_expiration};
