//! # screener-core
//!
//! Core crate for the press screener service. Contains configuration
//! schemas, the typed press link identifier, the injectable clock, and the
//! unified error system.
//!
//! This crate has **no** internal dependencies on other screener crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
