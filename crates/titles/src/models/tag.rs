use serde::Serialize;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// A descriptive tag attached to an anime (genre, setting, theme, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Tag {
    pub name: String,
}
impl From<String> for Tag {
    fn from(name: String) -> Self {
        Self { name }
    }
}
impl Display for Tag {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.name)
    }
}
