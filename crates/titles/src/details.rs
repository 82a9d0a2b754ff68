//! Extended anime metadata from the AniDB HTTP API (`request=anime`).
//!
//! Only a handful of fields are of interest; everything else in the reply
//! (titles, episodes, characters, ratings...) is ignored.

use crate::error::{ErrorKind, Result};
use crate::models::{Creator, Tag};
use crate::xml::root_element;
use exn::ResultExt;
use serde::Deserialize;
use tracing::instrument;

const DOCUMENT: &str = "anime details";

#[derive(Deserialize)]
struct AnimeXml {
    #[serde(default)]
    picture: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    tags: Option<TagsXml>,
    #[serde(default)]
    creators: Option<CreatorsXml>,
}

#[derive(Deserialize)]
struct TagsXml {
    #[serde(rename = "tag", default)]
    tags: Vec<TagXml>,
}

#[derive(Deserialize)]
struct TagXml {
    #[serde(default)]
    name: String,
}

#[derive(Deserialize)]
struct CreatorsXml {
    #[serde(rename = "name", default)]
    names: Vec<CreatorXml>,
}

#[derive(Deserialize)]
struct CreatorXml {
    #[serde(rename = "@type", default)]
    role: String,
    #[serde(rename = "$text", default)]
    name: String,
}

#[derive(Deserialize)]
struct ApiErrorXml {
    #[serde(rename = "$text", default)]
    message: String,
}

/// Metadata that augments a [`TitleRecord`](crate::models::TitleRecord).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Details {
    /// Picture file name on the AniDB image CDN
    pub picture: Option<String>,
    pub description: Option<String>,
    pub tags: Vec<Tag>,
    pub creators: Vec<Creator>,
}
impl Details {
    /// Parse an `<anime>` reply from the AniDB HTTP API.
    ///
    /// # Errors
    ///
    /// - [`ErrorKind::Remote`] if the reply is an `<error>` document (bans,
    ///   flood protection, unknown client, ...).
    /// - [`ErrorKind::UnexpectedRoot`] for any other root element.
    /// - [`ErrorKind::MalformedXml`] if the XML itself is broken.
    #[instrument(skip(xml), fields(size = xml.len()))]
    pub fn from_xml(xml: &[u8]) -> Result<Self> {
        match root_element(xml, DOCUMENT)?.as_str() {
            "anime" => {},
            "error" => {
                let error: ApiErrorXml =
                    quick_xml::de::from_reader(xml).or_raise(|| ErrorKind::MalformedXml(DOCUMENT))?;
                exn::bail!(ErrorKind::Remote(error.message));
            },
            found => exn::bail!(ErrorKind::UnexpectedRoot { expected: "anime", found: found.to_string() }),
        }
        let anime: AnimeXml = quick_xml::de::from_reader(xml).or_raise(|| ErrorKind::MalformedXml(DOCUMENT))?;
        Ok(anime.into())
    }
}
impl From<AnimeXml> for Details {
    fn from(anime: AnimeXml) -> Self {
        let tags = anime
            .tags
            .map(|tags| tags.tags)
            .unwrap_or_default()
            .into_iter()
            .filter(|tag| !tag.name.is_empty())
            .map(|tag| Tag::from(tag.name))
            .collect();
        let creators = anime
            .creators
            .map(|creators| creators.names)
            .unwrap_or_default()
            .into_iter()
            .filter(|creator| !creator.name.is_empty())
            .map(|creator| Creator::new(creator.role, creator.name))
            .collect();
        Self {
            picture: anime.picture.filter(|s| !s.is_empty()),
            description: anime.description.filter(|s| !s.is_empty()),
            tags,
            creators,
        }
    }
}
