//! # Index Module
//!
//! The page-indexing helper: walks authored page documents, extracts one
//! structured record per course row from `courses-list` blocks, and writes
//! the `query-index.json` document the search widget fetches.
//!
//! ## Expected table shape
//!
//! The courses-list block is a fixed tabular layout: a 2-row header
//! followed by data rows of at least 8 columns
//! (code, title, description, type, mode, campus, duration, area).
//! Shorter rows are skipped, not errors.

use crate::block::{Block, Page};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::OnceLock;
use walkdir::WalkDir;

/// Rows of header to skip at the top of every courses-list block.
const HEADER_ROWS: usize = 2;

/// Minimum number of columns a data row must carry.
const MIN_COLUMNS: usize = 8;

/// One course, as emitted into the search index. The search widget only
/// reads `title`, `description` and `path`; the rest feed the search
/// results page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseRecord {
    pub path: String,
    pub code: String,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub course_type: String,
    pub mode: String,
    pub campus: String,
    pub duration: String,
    pub area: String,
}

/// The generated index document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedIndex {
    pub generated: DateTime<Utc>,
    pub data: Vec<CourseRecord>,
}

fn area_sanitizer() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"["\n]"#).expect("static pattern compiles"))
}

/// Extract course records from a single page. Returns an empty list when
/// the page has no courses-list block.
pub fn extract_courses(page: &Page) -> Vec<CourseRecord> {
    page.blocks
        .iter()
        .filter(|b| b.name == "courses-list")
        .flat_map(|block| extract_from_block(block, &page.path))
        .collect()
}

fn extract_from_block(block: &Block, page_path: &str) -> Vec<CourseRecord> {
    let mut records = Vec::new();

    for row in block.rows.iter().skip(HEADER_ROWS) {
        if row.len() < MIN_COLUMNS {
            continue;
        }
        let col = |i: usize| {
            row.get(i)
                .map(|c| c.text_content().to_string())
                .unwrap_or_default()
        };
        records.push(CourseRecord {
            path: page_path.to_string(),
            code: col(0),
            title: col(1),
            description: col(2),
            course_type: col(3),
            mode: col(4),
            campus: col(5),
            duration: col(6),
            area: area_sanitizer()
                .replace_all(&col(7), "")
                .trim()
                .to_string(),
        });
    }

    records
}

/// Walk a content directory for page documents and build the full index.
/// Pages that fail to parse log a warning and are skipped; indexing of the
/// remaining pages continues.
pub fn generate_index(content_dir: &Path) -> Result<GeneratedIndex> {
    if !content_dir.is_dir() {
        anyhow::bail!(
            "Content path '{}' is not a directory",
            content_dir.display()
        );
    }

    let mut data = Vec::new();
    let mut entries: Vec<_> = WalkDir::new(content_dir)
        .into_iter()
        .filter_map(|e| match e {
            Ok(entry) => Some(entry),
            Err(err) => {
                eprintln!("Warning: Failed to read directory entry: {}", err);
                None
            }
        })
        .filter(|e| {
            e.path().is_file() && e.path().extension().is_some_and(|ext| ext == "json")
        })
        .collect();

    // Deterministic output regardless of filesystem order.
    entries.sort_by(|a, b| a.path().cmp(b.path()));

    for entry in entries {
        match Page::load(entry.path()) {
            Ok(page) => data.extend(extract_courses(&page)),
            Err(e) => eprintln!("Warning: skipping page: {:#}", e),
        }
    }

    Ok(GeneratedIndex {
        generated: Utc::now(),
        data,
    })
}

/// Serialize the index to disk (pretty JSON).
pub fn write_index(index: &GeneratedIndex, out_path: &Path) -> Result<()> {
    let contents =
        serde_json::to_string_pretty(index).context("Failed to serialize query index")?;
    fs::write(out_path, contents)
        .with_context(|| format!("Failed to write query index: {}", out_path.display()))?;
    Ok(())
}
