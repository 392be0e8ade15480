//! Error types for timestamp and timezone operations.

/// Errors raised by the transformation functions.
///
/// Predicates such as [`crate::is_iso_date`] never produce these; they answer `false`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SundialError {
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid offset: {0} minutes")]
    InvalidOffset(i32),

    #[error("Invalid format mask: {0}")]
    InvalidFormat(String),
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, SundialError>;
