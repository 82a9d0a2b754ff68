//! The canonical-key index over every title in the database.

use crate::models::{TitleEntry, TitleRecord};
use anicat_normalize::{CanonicalKey, normalize_title};
use std::collections::HashMap;
use std::ops::{Index, IndexMut};
use tracing::instrument;

/// Handle to a record stored in a [`TitleIndex`].
///
/// Only valid for the index that handed it out.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId(usize);

/// Maps every normalized title variant to the record it belongs to.
///
/// Records are stored once, in an arena; keys point at a [`RecordId`] rather
/// than a copy, so paths attached through one title are visible through all
/// of the record's other titles.
#[derive(Debug, Default)]
pub struct TitleIndex {
    records: Vec<TitleRecord>,
    keys: HashMap<CanonicalKey, RecordId>,
}
impl TitleIndex {
    /// Build the index from parsed title dump entries.
    ///
    /// - The last `main` title of an entry becomes its display name.
    /// - Every title, whatever its type, is normalized and indexed.
    /// - When titles of different entries normalize to the same key, the
    ///   entry inserted last wins. This is lossy, but deliberate: matching is
    ///   exact-after-normalization only.
    #[instrument(skip_all)]
    pub fn build(entries: impl IntoIterator<Item = TitleEntry>) -> Self {
        let mut index = Self::default();
        for entry in entries {
            let id = RecordId(index.records.len());
            let mut record = TitleRecord::new(entry.id);
            for variant in entry.variants {
                if variant.is_main() {
                    record.name = variant.text.clone();
                }
                let key = normalize_title(&variant.text);
                if let Some(previous) = index.keys.insert(key, id)
                    && previous != id
                {
                    tracing::trace!(
                        title = %variant.text,
                        previous = %index.records[previous.0].id,
                        current = %record.id,
                        "Title key collision; last entry wins"
                    );
                }
            }
            index.records.push(record);
        }
        tracing::debug!(records = index.records.len(), keys = index.keys.len(), "Built title index");
        index
    }

    /// Find the record a canonical key belongs to.
    pub fn lookup(&self, key: &str) -> Option<RecordId> {
        self.keys.get(key).copied()
    }

    /// Number of records (not keys).
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of distinct canonical keys.
    pub fn key_count(&self) -> usize {
        self.keys.len()
    }

    pub fn records(&self) -> impl Iterator<Item = &TitleRecord> {
        self.records.iter()
    }

    /// Consume the index, keeping only the given records in the given order.
    ///
    /// Repeated or unknown IDs are skipped.
    pub fn take_matched(self, ids: &[RecordId]) -> Vec<TitleRecord> {
        let mut slots: Vec<Option<TitleRecord>> = self.records.into_iter().map(Some).collect();
        ids.iter().filter_map(|id| slots.get_mut(id.0).and_then(Option::take)).collect()
    }
}
impl Index<RecordId> for TitleIndex {
    type Output = TitleRecord;
    fn index(&self, id: RecordId) -> &Self::Output {
        &self.records[id.0]
    }
}
impl IndexMut<RecordId> for TitleIndex {
    fn index_mut(&mut self, id: RecordId) -> &mut Self::Output {
        &mut self.records[id.0]
    }
}
