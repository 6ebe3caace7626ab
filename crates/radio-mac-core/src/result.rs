//! Convenience result type alias for the MAC hook layer.

use crate::error::AppError;

/// A specialized `Result` type for configuration and assembly operations.
///
/// Dispatch itself never fails; only building an engine and loading its
/// configuration return this type.
pub type AppResult<T> = Result<T, AppError>;
