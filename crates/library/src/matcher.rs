use crate::Traversal;
use crate::error::{ErrorKind, Result};
use crate::walk::{self, Entry, ListFn};
use anicat_normalize::{CanonicalKey, Origin, normalize};
use anicat_titles::{RecordId, TitleIndex};
use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::path::{Path, PathBuf};
use tracing::instrument;

/// A filesystem entry whose canonical key isn't in the index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unmatched {
    pub path: PathBuf,
    pub key: CanonicalKey,
}

/// A filesystem entry that matched a record which already had paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Duplicate {
    pub path: PathBuf,
    pub record: RecordId,
}

/// Everything learned from one [`Matcher::scan`].
///
/// Paths themselves are attached to the records in the [`TitleIndex`]; this
/// only says which records were found and what didn't work out.
#[derive(Debug, Default)]
pub struct Scan {
    /// Records that received their first path during this scan, in discovery order
    pub found: Vec<RecordId>,
    /// Entries with media that didn't match any title
    pub unmatched: Vec<Unmatched>,
    /// Entries that matched an already-matched record (paths were still attached)
    pub duplicates: Vec<Duplicate>,
    /// Directories that couldn't be read and were skipped ([`Traversal::Recursive`] only)
    pub skipped: Vec<PathBuf>,
}

/// Walks a media root and attaches matching paths to records of a [`TitleIndex`].
///
/// Only entries that look like media are considered: media files themselves,
/// and directories with at least one media file directly inside them. Each is
/// normalized (as a media file or as a directory name) and looked up:
///
/// - A matching **file** attaches its own path.
/// - A matching **directory** attaches every media file directly inside it,
///   and is never descended into.
/// - A non-matching directory is descended into with [`Traversal::Recursive`],
///   and ignored with [`Traversal::Shallow`]. Symlinked directories are
///   matched like any other but never descended into.
///
/// Misses are logged and collected, never fatal.
#[derive(Clone, Copy)]
pub struct Matcher {
    traversal: Traversal,
    list: ListFn,
}
impl Default for Matcher {
    fn default() -> Self {
        Self::new(Traversal::default())
    }
}
impl Debug for Matcher {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("Matcher").field("traversal", &self.traversal).finish_non_exhaustive()
    }
}
impl Matcher {
    pub fn new(traversal: Traversal) -> Self {
        Self { traversal, list: walk::list }
    }

    /// Match everything below `root` against `index`.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::ListDirectory`] if `root` can't be listed. With
    /// [`Traversal::Shallow`] the same goes for any directory below it; with
    /// [`Traversal::Recursive`] unreadable directories below the root are
    /// logged, recorded in [`Scan::skipped`], and the rest of the tree is
    /// still scanned.
    #[instrument(skip(self, index), fields(root = %root.display(), traversal = %self.traversal))]
    pub fn scan(&self, root: &Path, index: &mut TitleIndex) -> Result<Scan> {
        let mut scan = Scan::default();
        self.scan_dir(root, index, &mut scan)?;
        tracing::info!(
            found = scan.found.len(),
            unmatched = scan.unmatched.len(),
            duplicates = scan.duplicates.len(),
            skipped = scan.skipped.len(),
            "Finished matching media"
        );
        Ok(scan)
    }

    fn scan_dir(&self, dir: &Path, index: &mut TitleIndex, scan: &mut Scan) -> Result<()> {
        for entry in (self.list)(dir)? {
            match self.visit(&entry, index, scan) {
                Ok(()) => {},
                Err(err) if self.traversal == Traversal::Recursive => {
                    let kind: &ErrorKind = &err;
                    tracing::warn!(path = %entry.path.display(), error = %kind, "Skipping unreadable directory");
                    scan.skipped.push(entry.path);
                },
                Err(err) => return Err(err),
            }
        }
        Ok(())
    }

    fn visit(&self, entry: &Entry, index: &mut TitleIndex, scan: &mut Scan) -> Result<()> {
        let has_media = match entry.is_dir {
            true => walk::contains_media(&(self.list)(&entry.path)?),
            false => entry.is_media_file(),
        };
        if !has_media {
            return Ok(());
        }
        let key = normalize(&entry.name, Origin::of_entry(&entry.name, entry.is_dir));
        let Some(id) = index.lookup(&key) else {
            tracing::info!(path = %entry.path.display(), key = %key, "Not matched");
            scan.unmatched.push(Unmatched { path: entry.path.clone(), key });
            if entry.is_dir && self.traversal == Traversal::Recursive {
                match entry.is_symlink {
                    true => tracing::debug!(path = %entry.path.display(), "Not descending into symlinked directory"),
                    false => self.scan_dir(&entry.path, index, scan)?,
                }
            }
            return Ok(());
        };
        let paths = match entry.is_dir {
            true => walk::media_files((self.list)(&entry.path)?),
            false => vec![entry.path.clone()],
        };
        let was_matched = index[id].is_matched();
        let first_match = index[id].attach(paths);
        let record = &index[id];
        if first_match {
            tracing::debug!(path = %entry.path.display(), id = %record.id, name = %record.name, "Matched");
            scan.found.push(id);
        } else if was_matched {
            tracing::info!(path = %entry.path.display(), id = %record.id, name = %record.name, "Duplicate match");
            scan.duplicates.push(Duplicate { path: entry.path.clone(), record: id });
        }
        Ok(())
    }
}
