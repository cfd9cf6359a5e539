//! Error types for the fhash core library
//!
//! Errors are grouped by category so callers can tell bad input apart from
//! filesystem failures without matching on message strings.

use thiserror::Error;

pub mod internal;
pub mod io;
pub mod validation;

pub use self::io::{IoError, IoErrorKind};
pub use self::validation::ValidationError;
pub use internal::InternalError;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the fhash core library
///
/// - I/O errors: missing, unreadable or non-regular files and directories
/// - Validation errors: empty input, unknown algorithms, bad configuration
/// - Internal errors: cancellation and invariant violations
#[derive(Error, Debug)]
pub enum Error {
    /// I/O related errors
    #[error(transparent)]
    Io(#[from] IoError),

    /// Validation related errors
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Internal library errors
    #[error(transparent)]
    Internal(#[from] InternalError),
}

impl Error {
    /// Whether this error came from an observed abort signal
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Error::Internal(InternalError::Cancelled))
    }
}

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Self::Io(IoError::from_std(source))
    }
}
