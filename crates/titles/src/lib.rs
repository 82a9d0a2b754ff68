//! AniDB title records and the index used to match them.
//!
//! - [`parse`] reads the AniDB title dump into [`TitleEntry`] values.
//! - [`TitleIndex`] turns those entries into records, keyed by the canonical
//!   form of every title they're known by.
//! - [`Details`] parses the per-anime metadata fetched from the HTTP API.
//! - [`CatalogDocument`] is the serialized result of a run.

mod details;
mod document;
pub mod error;
mod index;
pub mod models;
pub mod parse;
mod xml;

pub use crate::details::Details;
pub use crate::document::CatalogDocument;
pub use crate::index::{RecordId, TitleIndex};
pub use crate::models::{TitleEntry, TitleRecord};
pub use crate::parse::{parse_title_dump, read_title_dump};
