use anicat::error::ErrorKind;
use anicat_augment::{Augmenter, MockFetcher};
use anicat_cache::BlobStore;
use anicat_config::Config;
use anicat_library::Traversal;
use rstest::{fixture, rstest};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

const TITLES: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<animetitles>
  <anime aid="1">
    <title xml:lang="x-jat" type="main">Test Show</title>
    <title xml:lang="en" type="official">The Test Show</title>
  </anime>
  <anime aid="2">
    <title xml:lang="x-jat" type="main">Other Show</title>
  </anime>
</animetitles>"#;

const TEST_SHOW: &str = r#"<anime id="1"><picture>1.jpg</picture><description>A show about tests.</description><tags><tag><name>testing</name></tag></tags></anime>"#;

struct Workspace {
    _dir: TempDir,
    titledb: PathBuf,
    media: PathBuf,
    cache: PathBuf,
}

#[fixture]
fn workspace() -> Workspace {
    let dir = tempfile::tempdir().unwrap();
    let titledb = dir.path().join("anime-titles.xml");
    fs::write(&titledb, TITLES).unwrap();
    let media = dir.path().join("media");
    fs::create_dir_all(media.join("Test Show")).unwrap();
    fs::write(media.join("Test Show").join("ep1.mkv"), b"").unwrap();
    fs::write(media.join("Test Show").join("ep2.mkv"), b"").unwrap();
    fs::write(media.join("notes.txt"), b"").unwrap();
    let cache = dir.path().join("cache");
    Workspace { titledb, media, cache, _dir: dir }
}

fn episodes(media: &Path) -> Vec<PathBuf> {
    vec![media.join("Test Show").join("ep1.mkv"), media.join("Test Show").join("ep2.mkv")]
}

#[rstest]
fn test_catalog_without_augmentation(workspace: Workspace) {
    let catalog =
        anicat::catalog::<MockFetcher>(&workspace.titledb, &workspace.media, Traversal::Shallow, None).unwrap();

    assert_eq!(catalog.series.len(), 1);
    let record = &catalog.series[0];
    assert_eq!(record.id, "1");
    assert_eq!(record.name, "Test Show");
    assert_eq!(record.paths, episodes(&workspace.media));
    assert!(!record.is_augmented());
    assert!(!workspace.cache.exists());
}

#[rstest]
fn test_catalog_with_augmentation(workspace: Workspace) {
    let store = BlobStore::open(&workspace.cache).unwrap();
    let augmenter = Augmenter::new(store, MockFetcher::new().with_response("1", TEST_SHOW));

    let catalog =
        anicat::catalog(&workspace.titledb, &workspace.media, Traversal::Shallow, Some(&augmenter)).unwrap();
    let record = &catalog.series[0];
    assert_eq!(record.picture.as_deref(), Some("1.jpg"));
    assert_eq!(record.description.as_deref(), Some("A show about tests."));
    assert_eq!(record.tags[0].name, "testing");
    assert_eq!(fs::read(workspace.cache.join("1")).unwrap(), TEST_SHOW.as_bytes());

    let again =
        anicat::catalog(&workspace.titledb, &workspace.media, Traversal::Shallow, Some(&augmenter)).unwrap();
    assert_eq!(again.series, catalog.series);
    assert_eq!(augmenter.fetcher().calls(), vec!["1".to_string()]);
}

#[rstest]
fn test_catalog_json_shape(workspace: Workspace) {
    let catalog =
        anicat::catalog::<MockFetcher>(&workspace.titledb, &workspace.media, Traversal::Shallow, None).unwrap();
    let mut out = Vec::new();
    catalog.write_json(&mut out, false).unwrap();

    let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
    let series = json["series"].as_array().unwrap();
    assert_eq!(series.len(), 1);
    assert_eq!(series[0]["ID"], "1");
    assert_eq!(series[0]["name"], "Test Show");
    assert_eq!(series[0]["paths"].as_array().unwrap().len(), 2);
}

#[rstest]
fn test_recursive_traversal_finds_nested_titles(workspace: Workspace) {
    let nested = workspace.media.join("Shelf").join("Other Show");
    fs::create_dir_all(&nested).unwrap();
    fs::write(workspace.media.join("Shelf").join("cover.mkv"), b"").unwrap();
    fs::write(nested.join("01.mp4"), b"").unwrap();

    let shallow =
        anicat::catalog::<MockFetcher>(&workspace.titledb, &workspace.media, Traversal::Shallow, None).unwrap();
    let recursive =
        anicat::catalog::<MockFetcher>(&workspace.titledb, &workspace.media, Traversal::Recursive, None).unwrap();

    assert_eq!(shallow.series.len(), 1);
    let ids: Vec<&str> = recursive.series.iter().map(|record| record.id.as_str()).collect();
    assert_eq!(ids, ["2", "1"]);
}

#[rstest]
fn test_failed_augmentation_is_fatal(workspace: Workspace) {
    let store = BlobStore::open(&workspace.cache).unwrap();
    let augmenter = Augmenter::new(store, MockFetcher::new().with_response("1", "<error>Banned</error>"));

    let err = anicat::catalog(&workspace.titledb, &workspace.media, Traversal::Shallow, Some(&augmenter)).unwrap_err();
    assert_eq!(*err, ErrorKind::Augment);
    assert!(!workspace.cache.join("1").exists());
}

#[rstest]
fn test_missing_inputs(workspace: Workspace) {
    let missing = workspace.media.join("nope");
    let err = anicat::catalog::<MockFetcher>(&missing, &workspace.media, Traversal::Shallow, None).unwrap_err();
    assert_eq!(*err, ErrorKind::TitleDatabase(missing.clone()));

    let err = anicat::catalog::<MockFetcher>(&workspace.titledb, &missing, Traversal::Shallow, None).unwrap_err();
    assert_eq!(*err, ErrorKind::MediaDirectory(missing));
}

#[rstest]
fn test_run_with_augmentation_disabled(workspace: Workspace) {
    let config = Config { augment: false, cache_dir: workspace.cache.clone(), ..Config::default() };
    let catalog = anicat::run(&workspace.titledb, &workspace.media, &config).unwrap();
    assert_eq!(catalog.series.len(), 1);
    assert!(!workspace.cache.exists());
}

fn anicat(workspace: &Workspace, args: &[&str]) -> Command {
    let config = workspace.cache.with_file_name("anicat.toml");
    fs::write(&config, "").unwrap();
    let mut command = Command::new(env!("CARGO_BIN_EXE_anicat"));
    command.env_remove("RUST_LOG").arg("--config").arg(config).args(args);
    command
}

#[rstest]
fn test_binary_writes_catalog_to_stdout(workspace: Workspace) {
    let output = anicat(&workspace, &["--no-augment"])
        .arg(&workspace.titledb)
        .arg(&workspace.media)
        .output()
        .unwrap();

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["series"][0]["ID"], "1");
    assert_eq!(json["series"][0]["name"], "Test Show");
}

#[rstest]
fn test_binary_usage_error(workspace: Workspace) {
    let output = anicat(&workspace, &[]).arg(&workspace.titledb).output().unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
}

#[rstest]
fn test_binary_failure_writes_nothing_to_stdout(workspace: Workspace) {
    let output = anicat(&workspace, &["--no-augment"])
        .arg(workspace.media.join("missing.xml"))
        .arg(&workspace.media)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("could not read title database"));
}

#[cfg(unix)]
#[rstest]
fn test_binary_skips_non_utf8_file_names(workspace: Workspace) {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    fs::write(workspace.media.join("Test Show").join(OsStr::from_bytes(b"ep\xff3.mkv")), b"").unwrap();
    let output = anicat(&workspace, &["--no-augment"])
        .arg(&workspace.titledb)
        .arg(&workspace.media)
        .output()
        .unwrap();

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["series"][0]["paths"].as_array().unwrap().len(), 2);
}
