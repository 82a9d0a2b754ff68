use super::{Creator, Tag};
use crate::details::Details;
use serde::Serialize;
use std::path::PathBuf;

/// One anime from the title database, plus everything learned about it
/// during a run.
///
/// Serializes with the field names downstream consumers of the catalog
/// expect (`ID`, `name`, `paths`, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TitleRecord {
    /// AniDB anime ID; numeric in practice, but treated as opaque text
    #[serde(rename = "ID")]
    pub id: String,
    /// Main title
    pub name: String,
    /// Filesystem paths matched to this anime, in discovery order
    pub paths: Vec<PathBuf>,
    pub picture: Option<String>,
    pub description: Option<String>,
    pub tags: Vec<Tag>,
    pub creators: Vec<Creator>,
}
impl TitleRecord {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into(), ..Self::default() }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Whether at least one path has been attached.
    pub fn is_matched(&self) -> bool {
        !self.paths.is_empty()
    }

    /// Whether any of the extended fields have been filled in.
    pub fn is_augmented(&self) -> bool {
        self.picture.is_some() || self.description.is_some() || !self.tags.is_empty() || !self.creators.is_empty()
    }

    /// Append paths, returning `true` if this turned an unmatched record into
    /// a matched one (its first match).
    pub fn attach(&mut self, paths: impl IntoIterator<Item = PathBuf>) -> bool {
        let was_matched = self.is_matched();
        self.paths.extend(paths);
        !was_matched && self.is_matched()
    }

    /// Copy extended metadata into the record. Fields missing from the
    /// details leave the record's current values alone.
    pub fn merge(&mut self, details: Details) {
        let Details { picture, description, tags, creators } = details;
        if picture.is_some() {
            self.picture = picture;
        }
        if description.is_some() {
            self.description = description;
        }
        if !tags.is_empty() {
            self.tags = tags;
        }
        if !creators.is_empty() {
            self.creators = creators;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attach_reports_first_match_only() {
        let mut record = TitleRecord::new("1");
        assert!(!record.attach(Vec::new()));
        assert!(record.attach([PathBuf::from("a.mkv")]));
        assert!(!record.attach([PathBuf::from("b.mkv")]));
        assert_eq!(record.paths, vec![PathBuf::from("a.mkv"), PathBuf::from("b.mkv")]);
    }

    #[test]
    fn test_merge_keeps_existing_values() {
        let mut record = TitleRecord::new("1");
        record.description = Some("old".to_string());
        record.merge(Details {
            picture: Some("1.jpg".to_string()),
            description: None,
            tags: vec![Tag::from("space".to_string())],
            creators: vec![],
        });
        assert_eq!(record.picture.as_deref(), Some("1.jpg"));
        assert_eq!(record.description.as_deref(), Some("old"));
        assert_eq!(record.tags.len(), 1);
        assert!(record.is_augmented());
    }

    #[test]
    fn test_serialized_field_names() {
        let record = TitleRecord::new("23").with_name("Cowboy Bebop");
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["ID"], "23");
        assert_eq!(json["name"], "Cowboy Bebop");
        assert!(json["paths"].as_array().unwrap().is_empty());
        assert!(json["picture"].is_null());
    }
}
