//! Error types for ID parsing and validation.

use thiserror::Error;

/// Errors that can occur when parsing or validating IDs.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IdError {
    /// The ID string is empty.
    #[error("ID cannot be empty")]
    Empty,

    /// The ID is shorter than its fixed-width timestamp.
    #[error("ID too short: expected at least {expected} characters, got {actual}")]
    TooShort { expected: usize, actual: usize },

    /// The prefix portion is longer than a generated key allows.
    #[error("ID prefix too long: at most {max} characters, got '{actual}'")]
    PrefixTooLong { max: usize, actual: String },

    /// The timestamp portion is not a valid instant.
    #[error("invalid timestamp '{0}'")]
    InvalidTimestamp(String),

    /// A numeric ID is out of range.
    #[error("invalid numeric ID: {0}")]
    InvalidNumber(String),
}

impl IdError {
    /// Returns true if this error indicates the input was empty.
    pub fn is_empty(&self) -> bool {
        matches!(self, IdError::Empty)
    }

    /// Returns true if this error concerns the timestamp portion.
    pub fn is_timestamp_error(&self) -> bool {
        matches!(self, IdError::TooShort { .. } | IdError::InvalidTimestamp(_))
    }
}
