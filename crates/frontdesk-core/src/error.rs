//! Error types for frontdesk-core.

use thiserror::Error;

/// Result type alias for frontdesk-core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the core domain layer.
///
/// All variants are rejected before any write happens; storage and
/// transport failures live in the downstream crates' error types.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Submitted input failed a validation rule.
    #[error("{message}")]
    Validation {
        /// Field that failed validation, when a single field is at fault
        field: Option<String>,
        /// What went wrong
        message: String,
    },

    /// A status string did not name one of the four lifecycle values.
    #[error("Invalid status value")]
    InvalidStatus {
        /// The rejected value
        value: String,
    },
}

impl Error {
    /// Creates a new validation error.
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Error::Validation {
            field: None,
            message: message.into(),
        }
    }

    /// Creates a new validation error with a field name.
    pub fn validation_field<F, M>(field: F, message: M) -> Self
    where
        F: Into<String>,
        M: Into<String>,
    {
        Error::Validation {
            field: Some(field.into()),
            message: message.into(),
        }
    }
}
