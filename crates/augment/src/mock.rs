//! In-memory [`Fetcher`] for tests.

use crate::error::{ErrorKind, Result};
use crate::fetch::Fetcher;
use exn::OptionExt;
use std::cell::RefCell;
use std::collections::HashMap;

/// Serves canned replies and records every ID it was asked for.
///
/// Asking for an ID without a canned reply fails like a network error.
#[derive(Debug, Default)]
pub struct MockFetcher {
    responses: HashMap<String, Vec<u8>>,
    calls: RefCell<Vec<String>>,
}
impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(mut self, id: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        self.responses.insert(id.into(), body.into());
        self
    }

    /// IDs fetched so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}
impl Fetcher for MockFetcher {
    fn fetch(&self, id: &str) -> Result<Vec<u8>> {
        self.calls.borrow_mut().push(id.to_string());
        self.responses.get(id).cloned().ok_or_raise(|| ErrorKind::Network(id.to_string()))
    }
}
