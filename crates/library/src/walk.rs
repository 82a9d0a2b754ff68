//! Single-level directory listing.

use crate::error::{ErrorKind, Result};
use anicat_normalize::is_media_name;
use exn::ResultExt;
use std::fs;
use std::path::{Path, PathBuf};

/// A child of a listed directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Entry {
    pub name: String,
    /// Full path (the listed directory joined with `name`)
    pub path: PathBuf,
    /// Whether the entry, after following symlinks, is a directory
    pub is_dir: bool,
    pub is_symlink: bool,
}
impl Entry {
    pub fn is_media_file(&self) -> bool {
        !self.is_dir && is_media_name(&self.name)
    }
}

/// Lists the immediate children of a directory.
pub(crate) type ListFn = fn(&Path) -> Result<Vec<Entry>>;

/// List the immediate children of `dir`, sorted by name.
///
/// Symlinks are followed to classify an entry, and flagged. Dropped entries:
/// - names that aren't valid UTF-8, since they can't be normalized or
///   written to the catalog faithfully
/// - entries whose metadata can't be read (most likely broken symlinks)
/// - entries that are neither files nor directories
pub(crate) fn list(dir: &Path) -> Result<Vec<Entry>> {
    let read_dir = fs::read_dir(dir).or_raise(|| ErrorKind::ListDirectory(dir.to_path_buf()))?;
    let mut entries = Vec::new();
    for entry in read_dir {
        let entry = entry.or_raise(|| ErrorKind::ListDirectory(dir.to_path_buf()))?;
        let path = entry.path();
        let Ok(name) = entry.file_name().into_string() else {
            tracing::warn!(path = %path.display(), "Skipping entry with a non UTF-8 name");
            continue;
        };
        let metadata = match fs::metadata(&path) {
            Ok(metadata) => metadata,
            Err(err) => {
                tracing::debug!(path = %path.display(), error = %err, "Skipping unreadable entry");
                continue;
            },
        };
        if !metadata.is_dir() && !metadata.is_file() {
            continue;
        }
        entries.push(Entry {
            name,
            path,
            is_dir: metadata.is_dir(),
            is_symlink: entry.file_type().is_ok_and(|file_type| file_type.is_symlink()),
        });
    }
    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}

/// Paths of the media files among `entries`, in order.
pub(crate) fn media_files(entries: Vec<Entry>) -> Vec<PathBuf> {
    entries.into_iter().filter(Entry::is_media_file).map(|entry| entry.path).collect()
}

/// Whether any of `entries` is a media file.
pub(crate) fn contains_media(entries: &[Entry]) -> bool {
    entries.iter().any(Entry::is_media_file)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(path: impl AsRef<Path>) {
        let path = path.as_ref();
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"").unwrap();
    }

    #[test]
    fn test_list_sorted() {
        let temp_dir = tempfile::tempdir().unwrap();
        touch(temp_dir.path().join("b.mkv"));
        touch(temp_dir.path().join("a.txt"));
        fs::create_dir(temp_dir.path().join("c")).unwrap();
        let entries = list(temp_dir.path()).unwrap();
        let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["a.txt", "b.mkv", "c"]);
        assert!(entries[2].is_dir);
        assert!(entries[1].is_media_file());
        assert!(!entries[0].is_media_file());
    }

    #[test]
    fn test_list_missing_directory() {
        let temp_dir = tempfile::tempdir().unwrap();
        let missing = temp_dir.path().join("missing");
        let err = list(&missing).unwrap_err();
        assert!(matches!(&*err, ErrorKind::ListDirectory(p) if p == &missing));
    }

    #[test]
    fn test_contains_media_is_not_recursive() {
        let temp_dir = tempfile::tempdir().unwrap();
        touch(temp_dir.path().join("Show/Season 1/01.mkv"));
        touch(temp_dir.path().join("Show/cover.jpg"));
        assert!(!contains_media(&list(&temp_dir.path().join("Show")).unwrap()));
        assert!(contains_media(&list(&temp_dir.path().join("Show/Season 1")).unwrap()));
    }

    #[test]
    fn test_directory_with_media_extension_is_not_media() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(temp_dir.path().join("Show/extras.mkv")).unwrap();
        assert!(!contains_media(&list(&temp_dir.path().join("Show")).unwrap()));
    }

    #[test]
    fn test_media_files() {
        let temp_dir = tempfile::tempdir().unwrap();
        touch(temp_dir.path().join("02.mp4"));
        touch(temp_dir.path().join("01.mkv"));
        touch(temp_dir.path().join("01.srt"));
        touch(temp_dir.path().join("nested/03.mkv"));
        let files = media_files(list(temp_dir.path()).unwrap());
        assert_eq!(files, vec![temp_dir.path().join("01.mkv"), temp_dir.path().join("02.mp4")]);
    }

    #[cfg(unix)]
    #[test]
    fn test_broken_symlink_is_dropped() {
        let temp_dir = tempfile::tempdir().unwrap();
        std::os::unix::fs::symlink(temp_dir.path().join("nowhere"), temp_dir.path().join("dangling.mkv")).unwrap();
        assert!(list(temp_dir.path()).unwrap().is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinks_are_followed_and_flagged() {
        let temp_dir = tempfile::tempdir().unwrap();
        touch(temp_dir.path().join("Show/01.mkv"));
        std::os::unix::fs::symlink(temp_dir.path().join("Show"), temp_dir.path().join("Alias")).unwrap();
        let entries = list(temp_dir.path()).unwrap();
        let flags: Vec<_> = entries.iter().map(|e| (e.name.as_str(), e.is_dir, e.is_symlink)).collect();
        assert_eq!(flags, [("Alias", true, true), ("Show", true, false)]);
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_name_is_dropped() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let temp_dir = tempfile::tempdir().unwrap();
        touch(temp_dir.path().join("ep1.mkv"));
        touch(temp_dir.path().join(OsStr::from_bytes(b"ep\xff2.mkv")));
        let files = media_files(list(temp_dir.path()).unwrap());
        assert_eq!(files, vec![temp_dir.path().join("ep1.mkv")]);
    }
}
