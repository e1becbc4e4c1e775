//! Event provider that re-reads a JSON file on every fetch.
//!
//! Handy for demos and for driving the monitor without a backend.

use std::path::{Path, PathBuf};

use tracing::debug;

use super::decode_events;
use super::traits::EventProvider;
use crate::calendar::RawEvent;
use crate::error::FetchError;

pub struct FileEventProvider {
    path: PathBuf,
}

impl FileEventProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl EventProvider for FileEventProvider {
    fn name(&self) -> &str {
        "file"
    }

    fn fetch(&mut self) -> Result<Vec<RawEvent>, FetchError> {
        debug!(path = %self.path.display(), "reading events");
        let body = std::fs::read_to_string(&self.path)?;
        decode_events(&body)
    }
}
