//! Matching a media library on disk against the AniDB title index.
//!
//! ```no_run
//! use anicat_library::{Matcher, Traversal};
//! use anicat_titles::{TitleIndex, read_title_dump};
//! use std::path::Path;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut index = TitleIndex::build(read_title_dump("anime-titles.xml").unwrap());
//! let scan = Matcher::new(Traversal::Recursive).scan(Path::new("/media/anime"), &mut index).unwrap();
//! let matched = index.take_matched(&scan.found);
//! # Ok(())
//! # }
//! ```

pub mod error;
mod matcher;
mod traversal;
mod walk;

pub use crate::matcher::{Duplicate, Matcher, Scan, Unmatched};
pub use crate::traversal::Traversal;
