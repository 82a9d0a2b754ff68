//! Augmentation of matched title records with AniDB metadata.
//!
//! Replies from the AniDB HTTP API are cached in a [`BlobStore`](anicat_cache::BlobStore)
//! forever; an anime is requested at most once per cache directory. Requests
//! go through an [`HttpFetcher`], which keeps to the API's rate limit.
//!
//! Enable the `mock` feature to get [`MockFetcher`] for tests.

mod augmenter;
pub mod error;
mod fetch;
#[cfg(any(test, feature = "mock"))]
mod mock;
mod settings;

pub use crate::augmenter::{Augmenter, Source, Summary};
pub use crate::fetch::{Fetcher, HttpFetcher};
#[cfg(any(test, feature = "mock"))]
pub use crate::mock::MockFetcher;
pub use crate::settings::{HttpSettings, MIN_COOLDOWN};
