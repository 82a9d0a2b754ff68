//! Augmentation Error Types
//!
//! Structured errors using `exn` for automatic location tracking and error
//! tree construction.

use derive_more::{Display, Error};

/// An augmentation error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for augmentation operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Classifies the origin of an augmentation failure.
///
/// Any of these aborts the run: a catalog with some records silently missing
/// their metadata is worse than no catalog.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The HTTP settings can't be used (e.g. a cooldown below the API minimum).
    #[display("invalid HTTP settings: {_0}")]
    Settings(#[error(not(source))] String),
    /// The request for an anime failed (connection, timeout, HTTP status).
    #[display("request for anime {_0} failed")]
    Network(#[error(not(source))] String),
    /// The reply for an anime could not be turned into metadata.
    #[display("unusable metadata for anime {_0}")]
    Parse(#[error(not(source))] String),
    /// Reading or writing the reply cache failed.
    #[display("cache failure for anime {_0}")]
    Cache(#[error(not(source))] String),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Network(_))
    }
}
