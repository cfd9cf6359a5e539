//! Internal library error types

use thiserror::Error;

/// Internal library errors
#[derive(Error, Debug)]
pub enum InternalError {
    /// The caller's abort signal was raised between chunks or files
    #[error("Operation cancelled")]
    Cancelled,
}
