//! Reading the AniDB title dump (`anime-titles.xml`).
//!
//! The dump lists every anime with all of its titles:
//!
//! ```xml
//! <animetitles>
//!   <anime aid="1">
//!     <title xml:lang="x-jat" type="main">Seikai no Monshou</title>
//!     <title xml:lang="en" type="official">Crest of the Stars</title>
//!   </anime>
//! </animetitles>
//! ```
//!
//! AniDB distributes the dump gzipped; compressed input is detected from its
//! magic bytes and decompressed transparently.

use crate::error::{ErrorKind, Result};
use crate::models::{TitleEntry, TitleVariant};
use crate::xml::expect_root;
use exn::ResultExt;
use flate2::read::GzDecoder;
use serde::Deserialize;
use std::borrow::Cow;
use std::io::Read;
use std::path::Path;
use tracing::instrument;

const DOCUMENT: &str = "title dump";
const ROOT: &str = "animetitles";
const GZIP_MAGIC: [u8; 2] = [0x1F, 0x8B];

#[derive(Deserialize)]
struct Dump {
    #[serde(rename = "anime", default)]
    anime: Vec<DumpAnime>,
}

#[derive(Deserialize)]
struct DumpAnime {
    #[serde(rename = "@aid")]
    aid: String,
    #[serde(rename = "title", default)]
    titles: Vec<DumpTitle>,
}

#[derive(Deserialize)]
struct DumpTitle {
    #[serde(rename = "$text", default)]
    text: String,
    #[serde(rename = "@lang", alias = "@xml:lang", default)]
    language: String,
    #[serde(rename = "@type", default)]
    kind: String,
}

impl From<DumpAnime> for TitleEntry {
    fn from(anime: DumpAnime) -> Self {
        let variants = anime
            .titles
            .into_iter()
            .map(|title| TitleVariant::new(title.text, title.language, title.kind))
            .collect();
        TitleEntry::new(anime.aid, variants)
    }
}

/// Read and parse the title dump at `path`.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn read_title_dump(path: impl AsRef<Path>) -> Result<Vec<TitleEntry>> {
    let bytes = std::fs::read(path.as_ref()).or_raise(|| ErrorKind::Unreadable(DOCUMENT))?;
    parse_title_dump(&bytes)
}

/// Parse a title dump, plain or gzipped, into its entries (in document order).
///
/// # Errors
///
/// - [`ErrorKind::Unreadable`] if gzipped input fails to decompress.
/// - [`ErrorKind::UnexpectedRoot`] if the root element isn't `<animetitles>`.
/// - [`ErrorKind::MalformedXml`] if the XML is broken or an `<anime>` element
///   has no `aid` attribute.
pub fn parse_title_dump(bytes: &[u8]) -> Result<Vec<TitleEntry>> {
    let xml = match bytes.starts_with(&GZIP_MAGIC) {
        true => {
            let mut decompressed = Vec::new();
            GzDecoder::new(bytes)
                .read_to_end(&mut decompressed)
                .or_raise(|| ErrorKind::Unreadable(DOCUMENT))?;
            Cow::Owned(decompressed)
        },
        false => Cow::Borrowed(bytes),
    };
    expect_root(&xml, ROOT, DOCUMENT)?;
    let dump: Dump = quick_xml::de::from_reader(&xml[..]).or_raise(|| ErrorKind::MalformedXml(DOCUMENT))?;
    tracing::debug!(entries = dump.anime.len(), "Parsed title dump");
    Ok(dump.anime.into_iter().map(TitleEntry::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::Compression;
    use flate2::write::GzEncoder;
    use std::io::Write;

    const DUMP: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<animetitles>
  <anime aid="1">
    <title xml:lang="x-jat" type="main">Seikai no Monshou</title>
    <title xml:lang="en" type="official">Crest of the Stars</title>
    <title xml:lang="x-jat" type="short">SnM</title>
  </anime>
  <anime aid="23">
    <title xml:lang="x-jat" type="main">Cowboy Bebop</title>
  </anime>
</animetitles>"#;

    #[test]
    fn test_parse_title_dump() {
        let entries = parse_title_dump(DUMP.as_bytes()).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].id, "1");
        assert_eq!(entries[0].variants.len(), 3);
        assert_eq!(
            entries[0].variants[1],
            TitleVariant::new("Crest of the Stars", "en", "official")
        );
        assert!(entries[0].variants[0].is_main());
        assert_eq!(entries[1].id, "23");
        assert_eq!(entries[1].variants[0].text, "Cowboy Bebop");
    }

    #[test]
    fn test_parse_gzipped_title_dump() {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(DUMP.as_bytes()).unwrap();
        let compressed = encoder.finish().unwrap();
        let entries = parse_title_dump(&compressed).unwrap();
        assert_eq!(entries.len(), 2);
    }

    #[test]
    fn test_parse_empty_dump() {
        let entries = parse_title_dump(b"<animetitles></animetitles>").unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn test_parse_wrong_root() {
        let err = parse_title_dump(b"<anime id=\"1\"></anime>").unwrap_err();
        assert!(matches!(&*err, ErrorKind::UnexpectedRoot { expected: "animetitles", .. }));
    }

    #[test]
    fn test_parse_missing_aid() {
        let err = parse_title_dump(b"<animetitles><anime><title>x</title></anime></animetitles>").unwrap_err();
        assert_eq!(*err, ErrorKind::MalformedXml(DOCUMENT));
    }

    #[test]
    fn test_parse_truncated() {
        assert!(parse_title_dump(b"<animetitles><anime aid=\"1\"><title>").is_err());
    }

    #[test]
    fn test_read_title_dump_missing_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let err = read_title_dump(temp_dir.path().join("missing.xml")).unwrap_err();
        assert_eq!(*err, ErrorKind::Unreadable(DOCUMENT));
    }

    #[test]
    fn test_read_title_dump() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("anime-titles.xml");
        std::fs::write(&path, DUMP).unwrap();
        assert_eq!(read_title_dump(&path).unwrap().len(), 2);
    }
}
