//! Library Error Types
//!
//! Structured errors using `exn` for automatic location tracking and error
//! tree construction.

use derive_more::{Display, Error};
use std::path::PathBuf;

/// A library error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// A directory could not be listed (missing, permissions, not a directory).
    #[display("could not list directory: {}", _0.display())]
    ListDirectory(#[error(not(source))] PathBuf),
    /// The traversal mode name isn't one we know.
    #[display("unknown traversal mode: {_0} (expected \"shallow\" or \"recursive\")")]
    UnknownTraversal(#[error(not(source))] String),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::ListDirectory(_))
    }
}
