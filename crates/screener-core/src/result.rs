//! Convenience result type alias for the screener workspace.

use crate::error::AppError;

/// A specialized `Result` type for screener operations.
///
/// Defined so that every crate does not need to write
/// `Result<T, AppError>` explicitly.
pub type AppResult<T> = Result<T, AppError>;
