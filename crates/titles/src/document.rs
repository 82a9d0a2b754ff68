use crate::error::{ErrorKind, Result};
use crate::models::TitleRecord;
use exn::ResultExt;
use serde::Serialize;
use std::io::Write;

/// The catalog emitted at the end of a run: every matched record, in the
/// order it was discovered.
#[derive(Debug, Default, Serialize)]
pub struct CatalogDocument {
    pub series: Vec<TitleRecord>,
}
impl CatalogDocument {
    pub fn new(series: Vec<TitleRecord>) -> Self {
        Self { series }
    }

    /// Serialize to JSON, compact unless `pretty` is set.
    pub fn to_json(&self, pretty: bool) -> Result<Vec<u8>> {
        match pretty {
            true => serde_json::to_vec_pretty(self),
            false => serde_json::to_vec(self),
        }
        .or_raise(|| ErrorKind::Output)
    }

    /// Serialize as JSON into `writer`.
    ///
    /// Nothing is written unless the whole document serialized.
    pub fn write_json(&self, mut writer: impl Write, pretty: bool) -> Result<()> {
        let json = self.to_json(pretty)?;
        writer.write_all(&json).or_raise(|| ErrorKind::Output)?;
        writer.flush().or_raise(|| ErrorKind::Output)
    }
}
