//! Layered configuration for anicat.
//!
//! Values are resolved in this order, later layers winning:
//!
//! 1. Built-in defaults ([`Config::default`]).
//! 2. A TOML file: either the one passed explicitly, or `config.toml` in the
//!    platform configuration directory if it exists.
//! 3. Environment variables prefixed with `ANICAT_`, nested with `__`
//!    (`ANICAT_ANIDB__TIMEOUT_SECS=10`).
//! 4. [`Overrides`] from the command line.
//!
//! ```toml
//! cache_dir = "/var/cache/anicat"
//! traversal = "recursive"
//! augment = true
//!
//! [anidb]
//! client = "myclient"
//! client_version = 2
//! cooldown_secs = 4
//! ```

pub mod error;

use crate::error::{ErrorKind, Result};
use anicat_augment::HttpSettings;
use anicat_library::Traversal;
use directories::ProjectDirs;
use exn::ResultExt;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::instrument;

pub const ENV_PREFIX: &str = "ANICAT_";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where AniDB replies are cached between runs
    pub cache_dir: PathBuf,
    pub traversal: Traversal,
    /// Whether matched records are filled in from AniDB at all
    pub augment: bool,
    pub anidb: HttpSettings,
}
impl Default for Config {
    fn default() -> Self {
        Self {
            cache_dir: PathBuf::from("./cache"),
            traversal: Traversal::default(),
            augment: true,
            anidb: HttpSettings::default(),
        }
    }
}

/// Values given on the command line. Unset fields leave the configured value
/// alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Overrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_dir: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub traversal: Option<Traversal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub augment: Option<bool>,
}

impl Config {
    /// `config.toml` in the platform configuration directory, e.g.
    /// `~/.config/anicat/config.toml` on Linux.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "anicat").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Load, merge and validate every configuration layer.
    ///
    /// An explicit `file` must exist; the default file is optional.
    #[instrument(skip(overrides))]
    pub fn load(file: Option<&Path>, overrides: &Overrides) -> Result<Self> {
        let file = match file {
            Some(path) if !path.is_file() => exn::bail!(ErrorKind::MissingFile(path.to_path_buf())),
            Some(path) => Some(path.to_path_buf()),
            None => Self::default_path().filter(|path| path.is_file()),
        };
        if let Some(path) = &file {
            tracing::debug!(path = %path.display(), "Reading configuration file");
        }
        Self::from_figment(Self::figment(file.as_deref()).merge(Serialized::defaults(overrides)))
    }

    /// Defaults, then `file` (if any), then the environment.
    pub fn figment(file: Option<&Path>) -> Figment {
        let figment = Figment::from(Serialized::defaults(Self::default()));
        let figment = match file {
            Some(path) => figment.merge(Toml::file(path)),
            None => figment,
        };
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    pub fn from_figment(figment: Figment) -> Result<Self> {
        let config: Self = figment.extract().or_raise(|| ErrorKind::Load)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.cache_dir.as_os_str().is_empty() {
            exn::bail!(ErrorKind::Invalid("cache_dir must not be empty".to_string()));
        }
        self.anidb.validate().or_raise(|| ErrorKind::Invalid("anidb".to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;
    use rstest::rstest;

    fn load_jailed(file: Option<&str>, overrides: &Overrides) -> std::result::Result<Config, figment::Error> {
        Config::load(file.map(Path::new), overrides).map_err(|err| figment::Error::from(format!("{err:?}")))
    }

    /// Defaults and a file, without the environment (other tests set it).
    fn from_file(toml: &str) -> Result<Config> {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, toml).unwrap();
        Config::from_figment(Figment::from(Serialized::defaults(Config::default())).merge(Toml::file(&path)))
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_figment(Figment::from(Serialized::defaults(Config::default()))).unwrap();
        assert_eq!(config.cache_dir, PathBuf::from("./cache"));
        assert_eq!(config.traversal, Traversal::Shallow);
        assert!(config.augment);
        assert_eq!(config.anidb.cooldown_secs, 2);
        assert_eq!(config.anidb.timeout_secs, 30);
    }

    #[test]
    fn test_file_then_env_then_overrides() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "anicat.toml",
                r#"
                cache_dir = "from-file"
                traversal = "recursive"

                [anidb]
                client = "tester"
                timeout_secs = 5
                "#,
            )?;
            jail.set_env("ANICAT_ANIDB__TIMEOUT_SECS", "7");
            jail.set_env("ANICAT_AUGMENT", "false");

            let config = load_jailed(Some("anicat.toml"), &Overrides::default())?;
            assert_eq!(config.cache_dir, PathBuf::from("from-file"));
            assert_eq!(config.traversal, Traversal::Recursive);
            assert_eq!(config.anidb.client, "tester");
            assert_eq!(config.anidb.timeout_secs, 7);
            assert!(!config.augment);
            assert_eq!(config.anidb.cooldown_secs, 2);

            let overrides = Overrides {
                cache_dir: Some(PathBuf::from("from-cli")),
                traversal: Some(Traversal::Shallow),
                augment: Some(true),
            };
            let config = load_jailed(Some("anicat.toml"), &overrides)?;
            assert_eq!(config.cache_dir, PathBuf::from("from-cli"));
            assert_eq!(config.traversal, Traversal::Shallow);
            assert!(config.augment);
            Ok(())
        });
    }

    #[test]
    fn test_unset_overrides_keep_configured_values() {
        Jail::expect_with(|jail| {
            jail.create_file("anicat.toml", "cache_dir = \"kept\"")?;
            let overrides = Overrides { traversal: Some(Traversal::Recursive), ..Overrides::default() };
            let config = load_jailed(Some("anicat.toml"), &overrides)?;
            assert_eq!(config.cache_dir, PathBuf::from("kept"));
            assert_eq!(config.traversal, Traversal::Recursive);
            Ok(())
        });
    }

    #[test]
    fn test_missing_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.toml");
        let err = Config::load(Some(&path), &Overrides::default()).unwrap_err();
        assert_eq!(*err, ErrorKind::MissingFile(path));
    }

    #[rstest]
    #[case("[anidb]\ncooldown_secs = 1")]
    #[case("[anidb]\ncooldown_secs = 0")]
    #[case("cache_dir = \"\"")]
    fn test_invalid_values(#[case] toml: &str) {
        let err = from_file(toml).unwrap_err();
        assert!(matches!(&*err, ErrorKind::Invalid(_)));
    }

    #[rstest]
    #[case("traversal = \"sideways\"")]
    #[case("augment = \"maybe\"")]
    #[case("[anidb]\ncooldown_secs = -3")]
    fn test_malformed_values(#[case] toml: &str) {
        let err = from_file(toml).unwrap_err();
        assert_eq!(*err, ErrorKind::Load);
    }
}
