//! Canonical lookup keys for anime titles and media file names.
//!
//! Both sides of a match (titles from the AniDB dump and names found on disk)
//! go through [`normalize`], so two names that differ only by release noise,
//! punctuation or case collapse to the same [`CanonicalKey`]. The passes run
//! in a fixed order:
//!
//! 1. Media files lose their extension (`.mkv`, `.mp4`).
//! 2. Media files lose trailing episode numbers (a space then 2+ digits).
//! 3. Release noise is removed: `Specials`, `OVA`, `DVD`, `BD`, `Complete`,
//!    version markers (`v2`), episode ranges (`01-12`, `Ep01~12`), `batch`,
//!    resolutions (`720p`, `1080`) and any `(...)` or `[...]` group.
//! 4. Separators are removed: spaces, `-`, `~`, `:`, `?`, `'`, `.`, `_`, and
//!    for database titles also the backtick.
//! 5. The result is lowercased.
//!
//! Noise runs before separators because the noise patterns need the brackets
//! and hyphens that the separator pass deletes.
//!
//! ```
//! use anicat_normalize::{Origin, normalize, normalize_title};
//! let file = normalize("Cowboy Bebop - 01 [BD][720p].mkv", Origin::MediaFile);
//! assert_eq!(file.as_str(), "cowboybebop");
//! assert_eq!(file, normalize_title("Cowboy Bebop"));
//! ```

mod consts;
mod media;

pub use crate::media::{MEDIA_EXTENSIONS, is_media_name};
use std::borrow::Borrow;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::ops::Deref;

/// Where a name came from, which decides the passes applied to it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Origin {
    /// A title variant from the title database.
    Title,
    /// A directory name on disk.
    Directory,
    /// A file name with a recognised media extension.
    MediaFile,
}
impl Origin {
    /// Classify a directory entry by its name.
    ///
    /// Anything that isn't a directory and ends in a media extension is a
    /// [`MediaFile`](Self::MediaFile); everything else is treated as a
    /// [`Directory`](Self::Directory) name.
    pub fn of_entry(name: &str, is_dir: bool) -> Self {
        match !is_dir && is_media_name(name) {
            true => Self::MediaFile,
            false => Self::Directory,
        }
    }
}

/// A normalized, lowercase, noise-free string used purely as a lookup key.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CanonicalKey(String);
impl CanonicalKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
impl Deref for CanonicalKey {
    type Target = str;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
impl AsRef<str> for CanonicalKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
impl Borrow<str> for CanonicalKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}
impl Display for CanonicalKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

/// Reduce a title or file name to its [`CanonicalKey`].
///
/// An empty key is a valid result; it simply won't match anything useful.
pub fn normalize(name: &str, origin: Origin) -> CanonicalKey {
    let mut name = name.to_string();
    if origin == Origin::MediaFile {
        name = consts::EXTENSION_REGEX.replace(&name, "").into_owned();
        name = consts::EPISODE_NUMBER_REGEX.replace_all(&name, "").into_owned();
    }
    name = consts::NOISE_REGEX.replace_all(&name, "").into_owned();
    let tidy = match origin {
        Origin::Title => &consts::TIDY_TITLE_REGEX,
        Origin::Directory | Origin::MediaFile => &consts::TIDY_REGEX,
    };
    CanonicalKey(tidy.replace_all(&name, "").to_lowercase())
}

/// Shorthand for [`normalize`] with [`Origin::Title`].
pub fn normalize_title(title: &str) -> CanonicalKey {
    normalize(title, Origin::Title)
}
