use crate::error::{Error, ErrorKind};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

/// How far below the media root the matcher looks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Traversal {
    /// Only the immediate children of the root. A matching directory is taken
    /// as a whole; a non-matching one is ignored.
    #[default]
    Shallow,
    /// Like [`Shallow`](Self::Shallow), but directories that don't match
    /// (and contain media) are searched for matches of their own.
    Recursive,
}
impl Traversal {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Shallow => "shallow",
            Self::Recursive => "recursive",
        }
    }
}
impl FromStr for Traversal {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "shallow" => Ok(Self::Shallow),
            "recursive" => Ok(Self::Recursive),
            _ => exn::bail!(ErrorKind::UnknownTraversal(s.to_string())),
        }
    }
}
impl Display for Traversal {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}
