//! Cache key validation.

use crate::error::{ErrorKind, Result};
use std::path::{Component, Path};

/// Validates a cache key for use as a file name directly inside the cache
/// directory: exactly one normal path component, no separators, no `.`/`..`,
/// no null bytes.
///
/// ```
/// use anicat_cache::validate_key;
/// assert!(validate_key("23").is_ok());
/// assert!(validate_key("12345").is_ok());
/// assert!(validate_key("").is_err());
/// assert!(validate_key("..").is_err());
/// assert!(validate_key("a/b").is_err());
/// assert!(validate_key("/etc/passwd").is_err());
/// ```
pub fn validate(key: &str) -> Result<&str> {
    let invalid = || ErrorKind::InvalidKey(key.to_string());
    if key.is_empty() || key.contains('\0') || key.contains(['/', '\\']) {
        exn::bail!(invalid());
    }
    let mut components = Path::new(key).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(name)), None) if name == key => Ok(key),
        _ => exn::bail!(invalid()),
    }
}
