//! Top-level Error Types
//!
//! Every stage of a run raises its crate's error into one of these kinds, so
//! the printed error tree starts with the stage that failed.

use derive_more::{Display, Error};
use std::path::PathBuf;

/// A run error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for a run.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    #[display("could not load configuration")]
    Config,
    #[display("could not read title database: {}", _0.display())]
    TitleDatabase(#[error(not(source))] PathBuf),
    #[display("could not scan media directory: {}", _0.display())]
    MediaDirectory(#[error(not(source))] PathBuf),
    #[display("could not open cache directory: {}", _0.display())]
    Cache(#[error(not(source))] PathBuf),
    #[display("could not augment matched titles")]
    Augment,
    #[display("could not write catalog")]
    Output,
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Augment | Self::Output)
    }
}
