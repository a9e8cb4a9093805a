//! Error types for frontdesk-mail.

use thiserror::Error;

/// Result type alias for frontdesk-mail operations.
pub type Result<T> = std::result::Result<T, MailError>;

/// Errors that can occur while building or sending mail.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum MailError {
    /// A required piece of mailer configuration is absent.
    #[error("missing required config: {0}")]
    MissingConfig(String),

    /// An address could not be parsed into a mailbox.
    #[error("invalid email address: {0}")]
    InvalidAddress(String),

    /// The message itself could not be assembled.
    #[error("failed to build message: {0}")]
    Build(String),

    /// The SMTP transport rejected the send.
    #[error("SMTP error: {0}")]
    Smtp(String),
}

impl From<lettre::address::AddressError> for MailError {
    fn from(err: lettre::address::AddressError) -> Self {
        MailError::InvalidAddress(err.to_string())
    }
}

impl From<lettre::error::Error> for MailError {
    fn from(err: lettre::error::Error) -> Self {
        MailError::Build(err.to_string())
    }
}

impl From<lettre::transport::smtp::Error> for MailError {
    fn from(err: lettre::transport::smtp::Error) -> Self {
        MailError::Smtp(err.to_string())
    }
}
