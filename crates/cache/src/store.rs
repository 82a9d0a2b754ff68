//! File-per-key blob store.

use crate::error::{ErrorKind, Result};
use crate::key::validate as validate_key;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::instrument;

/// A directory holding one file per key, containing the raw bytes stored
/// under that key.
///
/// The presence of a file means "already fetched"; there is no expiry. The
/// directory is assumed to belong to a single process for the duration of a
/// run.
///
/// # Examples
///
/// ```no_run
/// use anicat_cache::BlobStore;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let store = BlobStore::open("./cache").unwrap();
/// if store.read("23").unwrap().is_none() {
///     store.write("23", b"<anime id=\"23\"/>").unwrap();
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct BlobStore {
    root: PathBuf,
}
impl BlobStore {
    /// Open the store at `root`, creating the directory if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::NotADirectory`] if `root` exists but is a file,
    /// or an I/O error if the directory can't be created.
    pub fn open(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        if root.exists() {
            if !root.is_dir() {
                exn::bail!(ErrorKind::NotADirectory(root));
            }
        } else {
            fs::create_dir_all(&root).map_err(|e| Self::map_io_error(e, &root))?;
            tracing::debug!(root = %root.display(), "Created cache directory");
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Location of the file for `key`.
    pub fn path_for(&self, key: &str) -> Result<PathBuf> {
        Ok(self.root.join(validate_key(key)?))
    }

    pub fn contains(&self, key: &str) -> Result<bool> {
        let path = self.path_for(key)?;
        Ok(path.try_exists().map_err(|e| Self::map_io_error(e, &path))?)
    }

    /// Read the bytes stored under `key`, or `None` if nothing is stored.
    #[instrument(skip(self))]
    pub fn read(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.path_for(key)?;
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Self::map_io_error(e, &path).into()),
        }
    }

    /// Store `data` under `key`, replacing whatever was there.
    ///
    /// The data is written to a temporary file inside the cache directory and
    /// renamed into place, so an interrupted run never leaves a truncated
    /// entry behind.
    #[instrument(skip(self, data), fields(size = data.len()))]
    pub fn write(&self, key: &str, data: &[u8]) -> Result<()> {
        let path = self.path_for(key)?;
        let mut file = NamedTempFile::new_in(&self.root).map_err(|e| Self::map_io_error(e, &self.root))?;
        file.write_all(data).map_err(ErrorKind::Io)?;
        file.as_file().sync_all().map_err(ErrorKind::Io)?;
        file.persist(&path).map_err(|e| Self::map_io_error(e.error, &path))?;
        Ok(())
    }

    fn map_io_error(e: io::Error, path: &Path) -> ErrorKind {
        match e.kind() {
            io::ErrorKind::PermissionDenied => ErrorKind::PermissionDenied(path.to_path_buf()),
            _ => ErrorKind::Io(e),
        }
    }
}
