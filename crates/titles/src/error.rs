//! Title Error Types
//!
//! Structured errors using `exn` for automatic location tracking and error
//! tree construction.

use derive_more::{Display, Error};

/// A title database error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for title database operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The document could not be read from its source.
    #[display("could not read {_0}")]
    Unreadable(#[error(not(source))] &'static str),
    /// The document is not well-formed XML, or doesn't have the expected shape.
    #[display("malformed {_0}")]
    MalformedXml(#[error(not(source))] &'static str),
    /// The document is well-formed but its root element is not the expected one.
    #[display("unexpected root element <{found}>, expected <{expected}>")]
    UnexpectedRoot {
        /// The root element the document was supposed to have.
        expected: &'static str,
        /// The root element it actually had.
        found: String,
    },
    /// The API answered with an `<error>` document instead of data.
    #[display("AniDB returned an error: {_0}")]
    Remote(#[error(not(source))] String),
    /// The output document could not be written.
    #[display("could not write output document")]
    Output,
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        // Remote errors are usually bans or flood protection; they lift eventually.
        matches!(self, Self::Remote(_) | Self::Output)
    }
}
