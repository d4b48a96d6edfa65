//! Press link handlers: admin management and anonymous token access.

pub mod admin;
pub mod public;
