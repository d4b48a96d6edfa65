//! Custom Axum extractors.

pub mod auth;
pub mod client;
pub mod json;

pub use auth::AdminUser;
pub use client::ClientMeta;
pub use json::AppJson;
