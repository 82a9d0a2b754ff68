use std::path::Path;

/// File extensions (without the leading dot) recognised as media.
pub const MEDIA_EXTENSIONS: [&str; 2] = ["mkv", "mp4"];

/// Returns `true` if the file name ends in a recognised media extension.
///
/// The comparison ignores ASCII case, so `Episode.MKV` counts as media.
///
/// ```
/// use anicat_normalize::is_media_name;
/// assert!(is_media_name("Cowboy Bebop - 01.mkv"));
/// assert!(is_media_name("movie.MP4"));
/// assert!(!is_media_name("cover.jpg"));
/// assert!(!is_media_name("mkv"));
/// ```
#[must_use]
pub fn is_media_name(name: impl AsRef<Path>) -> bool {
    name.as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| MEDIA_EXTENSIONS.iter().any(|media| ext.eq_ignore_ascii_case(media)))
}
