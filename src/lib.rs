//! Catalogs a directory of anime against the AniDB title database.
//!
//! A run reads the title dump, builds the canonical title index, matches the
//! entries of a media directory against it, optionally fills in the matched
//! records from the AniDB HTTP API, and returns the result as a
//! [`CatalogDocument`].
//!
//! ```no_run
//! use anicat_config::{Config, Overrides};
//! use std::path::Path;
//!
//! let config = Config::load(None, &Overrides::default()).unwrap();
//! let catalog = anicat::run(Path::new("anime-titles.xml.gz"), Path::new("/media/anime"), &config).unwrap();
//! catalog.write_json(std::io::stdout(), false).unwrap();
//! ```

pub mod error;

use crate::error::{ErrorKind, Result};
use anicat_augment::{Augmenter, Fetcher, HttpFetcher};
use anicat_cache::BlobStore;
use anicat_config::Config;
use anicat_library::{Matcher, Traversal};
use anicat_titles::TitleIndex;
use exn::ResultExt;
use std::path::Path;
use tracing::instrument;

pub use anicat_titles::CatalogDocument;

/// Run the whole pipeline as configured, fetching from AniDB if
/// `config.augment` is set.
///
/// The cache directory is opened (and created) before any other work so a
/// bad cache path fails fast.
#[instrument(skip(config), fields(titledb = %titledb.display(), mediadir = %mediadir.display()))]
pub fn run(titledb: &Path, mediadir: &Path, config: &Config) -> Result<CatalogDocument> {
    if !config.augment {
        tracing::info!("Augmentation disabled");
        return catalog::<HttpFetcher>(titledb, mediadir, config.traversal, None);
    }
    let store = BlobStore::open(&config.cache_dir).or_raise(|| ErrorKind::Cache(config.cache_dir.clone()))?;
    let fetcher = HttpFetcher::new(config.anidb.clone()).or_raise(|| ErrorKind::Augment)?;
    catalog(titledb, mediadir, config.traversal, Some(&Augmenter::new(store, fetcher)))
}

/// Build the catalog for `mediadir`, augmenting matched records with
/// `augmenter` when one is given.
///
/// Records appear in the order they were first matched.
pub fn catalog<F: Fetcher>(
    titledb: &Path,
    mediadir: &Path,
    traversal: Traversal,
    augmenter: Option<&Augmenter<F>>,
) -> Result<CatalogDocument> {
    let entries =
        anicat_titles::read_title_dump(titledb).or_raise(|| ErrorKind::TitleDatabase(titledb.to_path_buf()))?;
    let mut index = TitleIndex::build(entries);
    if index.is_empty() {
        tracing::warn!(titledb = %titledb.display(), "Title database has no titles; nothing can match");
    }
    tracing::info!(records = index.len(), keys = index.key_count(), "Title index built");

    let scan = Matcher::new(traversal)
        .scan(mediadir, &mut index)
        .or_raise(|| ErrorKind::MediaDirectory(mediadir.to_path_buf()))?;
    let mut series = index.take_matched(&scan.found);

    if let Some(augmenter) = augmenter {
        augmenter.augment_all(series.iter_mut()).or_raise(|| ErrorKind::Augment)?;
    }
    Ok(CatalogDocument::new(series))
}
