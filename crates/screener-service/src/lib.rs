//! # screener-service
//!
//! Business logic for press links. [`PressLinkService`] serves admins;
//! [`AccessService`] serves anonymous recipients holding a token.
//!
//! Services follow constructor injection: the store, clock and hasher are
//! provided at construction time via `Arc` references.

pub mod context;
pub mod press;

pub use context::AdminContext;
pub use press::{
    AccessService, ClientInfo, CreatePressLink, CreatedPressLink, PressLinkList, PressLinkService,
    TokenIssuer, UpdatePressLink, ViewRecorder,
};
