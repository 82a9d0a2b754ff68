//! On-disk cache for AniDB API replies.
//!
//! AniDB bans clients that request the same anime too often, so every reply
//! is kept in a [`BlobStore`] keyed by anime ID and reused on later runs.

pub mod error;
mod key;
mod store;

pub use crate::key::validate as validate_key;
pub use crate::store::BlobStore;
