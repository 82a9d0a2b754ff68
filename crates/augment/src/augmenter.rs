use crate::error::{ErrorKind, Result};
use crate::fetch::Fetcher;
use anicat_cache::BlobStore;
use anicat_titles::{Details, TitleRecord};
use exn::{OptionExt, ResultExt};
use tracing::instrument;

/// Where a record's metadata came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Cache,
    Remote,
}

/// Counts from [`Augmenter::augment_all`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    /// Records filled from replies already in the cache
    pub cached: usize,
    /// Records that needed a request
    pub fetched: usize,
    /// Records that were already augmented
    pub skipped: usize,
}

/// Fills in records from the reply cache, fetching replies the cache lacks.
pub struct Augmenter<F> {
    store: BlobStore,
    fetcher: F,
}
impl<F: Fetcher> Augmenter<F> {
    pub fn new(store: BlobStore, fetcher: F) -> Self {
        Self { store, fetcher }
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Merge the metadata for `record` into it.
    ///
    /// Returns `None` without touching cache or network if the record is
    /// already augmented. Otherwise the reply is fetched only when the cache
    /// has no entry for the record's ID, and the metadata is always parsed
    /// from the cached copy.
    #[instrument(skip_all, fields(id = %record.id))]
    pub fn augment(&self, record: &mut TitleRecord) -> Result<Option<Source>> {
        if record.is_augmented() {
            return Ok(None);
        }
        let id = record.id.as_str();
        let source = if self.store.contains(id).or_raise(|| ErrorKind::Cache(id.to_string()))? {
            Source::Cache
        } else {
            self.fill(id)?;
            Source::Remote
        };
        let payload = self
            .store
            .read(id)
            .or_raise(|| ErrorKind::Cache(id.to_string()))?
            .ok_or_raise(|| ErrorKind::Cache(id.to_string()))?;
        let details = Details::from_xml(&payload).or_raise(|| ErrorKind::Parse(id.to_string()))?;
        record.merge(details);
        tracing::debug!(?source, "Augmented record");
        Ok(Some(source))
    }

    /// Fetch the reply for `id` and store it in the cache.
    fn fill(&self, id: &str) -> Result<()> {
        let payload = self.fetcher.fetch(id)?;
        // Error replies (bans, flood protection) must never be cached.
        Details::from_xml(&payload).or_raise(|| ErrorKind::Parse(id.to_string()))?;
        self.store.write(id, &payload).or_raise(|| ErrorKind::Cache(id.to_string()))?;
        tracing::info!(id, "Fetched and cached anime details");
        Ok(())
    }

    /// Augment every record, in order, stopping at the first failure.
    #[instrument(skip_all)]
    pub fn augment_all<'a>(&self, records: impl IntoIterator<Item = &'a mut TitleRecord>) -> Result<Summary> {
        let mut summary = Summary::default();
        for record in records {
            match self.augment(record)? {
                Some(Source::Cache) => summary.cached += 1,
                Some(Source::Remote) => summary.fetched += 1,
                None => summary.skipped += 1,
            }
        }
        tracing::info!(cached = summary.cached, fetched = summary.fetched, skipped = summary.skipped, "Augmentation finished");
        Ok(summary)
    }
}
