//! # Search Module
//!
//! The autocomplete site-search widget and its supporting pieces.
//!
//! ## Components
//!
//! - [`SearchWidget`] - the interaction state machine (open/close, debounce,
//!   keyboard navigation, status announcements)
//! - [`IndexFetcher`] - abstraction over the query index source
//! - [`filter_records`] - the query evaluation contract
//!
//! ## Query evaluation
//!
//! The widget fetches the full index (a single JSON document with a `data`
//! array) on every fired query and filters client-side: a record matches
//! when its title or description contains the lowercased query as a
//! substring. The first 5 matches, in source order, are retained.

pub mod fetch;
pub mod widget;

pub use fetch::{FileIndexFetcher, IndexFetcher};
pub use widget::{SearchAction, SearchState, SearchWidget};

use serde::{Deserialize, Serialize};

/// Maximum number of results rendered for a query.
pub const MAX_RESULTS: usize = 5;

/// One record of the remote query index. Any subset of fields may be
/// absent; an absent title/description never matches.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchRecord {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub path: String,
}

/// The query index document: `{ "data": [ ... ] }`. Extra top-level fields
/// (e.g. a generation timestamp) are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueryIndex {
    #[serde(default)]
    pub data: Vec<SearchRecord>,
}

/// Case-insensitive substring match against title or description, first
/// [`MAX_RESULTS`] matches in source order.
pub fn filter_records(records: &[SearchRecord], query: &str) -> Vec<SearchRecord> {
    let lower_query = query.to_lowercase();
    records
        .iter()
        .filter(|item| {
            item.title.to_lowercase().contains(&lower_query)
                || item.description.to_lowercase().contains(&lower_query)
        })
        .take(MAX_RESULTS)
        .cloned()
        .collect()
}
