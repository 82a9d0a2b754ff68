use serde::Serialize;

/// A person or company credited on an anime.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Creator {
    /// Credit type as AniDB reports it (e.g. "Direction", "Animation Work")
    pub role: String,
    pub name: String,
}
impl Creator {
    pub fn new(role: impl Into<String>, name: impl Into<String>) -> Self {
        Self { role: role.into(), name: name.into() }
    }
}
