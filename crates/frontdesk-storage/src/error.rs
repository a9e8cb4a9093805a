//! Error types for frontdesk-storage.

use thiserror::Error;

/// Result type alias for frontdesk-storage operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the persistence layer.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Error from frontdesk-core.
    #[error(transparent)]
    Core(#[from] frontdesk_core::Error),

    /// No enquiry exists with the given id.
    #[error("Enquiry not found")]
    NotFound {
        /// The id that matched nothing.
        id: i64,
    },

    /// A uniqueness constraint rejected the write.
    #[error("Duplicate submission detected")]
    Duplicate,

    /// Any other database failure.
    #[error("Database error: {0}")]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        if err
            .as_database_error()
            .is_some_and(|db| db.is_unique_violation())
        {
            Error::Duplicate
        } else {
            Error::Database(err)
        }
    }
}
