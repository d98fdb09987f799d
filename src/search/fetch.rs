//! Query index fetching.
//!
//! The index endpoint is an opaque external collaborator: a single JSON
//! document with a `data` array of records. The [`IndexFetcher`] trait
//! allows dependency injection for testing; production uses
//! [`FileIndexFetcher`], which re-reads the document on every fired query
//! so each keystroke-triggered fetch is independent.

use crate::search::QueryIndex;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Source of the query index.
pub trait IndexFetcher: Send + Sync {
    /// Fetch and parse the full index document.
    fn fetch(&self) -> Result<QueryIndex>;

    /// Fetch, degrading any failure (missing file, malformed JSON) to an
    /// empty index. The widget must never see a distinct error state.
    fn fetch_or_empty(&self) -> QueryIndex {
        match self.fetch() {
            Ok(index) => index,
            Err(e) => {
                eprintln!("Warning: search index fetch failed: {:#}", e);
                QueryIndex::default()
            }
        }
    }
}

/// Reads the query index from a JSON file (e.g. `query-index.json`).
#[derive(Debug, Clone)]
pub struct FileIndexFetcher {
    path: PathBuf,
}

impl FileIndexFetcher {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl IndexFetcher for FileIndexFetcher {
    fn fetch(&self) -> Result<QueryIndex> {
        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read query index: {}", self.path.display()))?;
        let index: QueryIndex = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse query index: {}", self.path.display()))?;
        Ok(index)
    }
}
