//! # Block Module
//!
//! This module provides the page/block content model and the decoration
//! step that turns authored blocks into typed widgets.
//!
//! ## Page documents
//!
//! The authoring pipeline emits pages as an ordered list of blocks, each a
//! grid of rows and cells. A cell carries plain text, an image reference, a
//! link, or any combination:
//!
//! ```json
//! {
//!   "path": "/courses",
//!   "blocks": [
//!     { "name": "alertbanner", "rows": [[{ "text": "Enrolment closes Friday" }]] },
//!     { "name": "teaser", "variants": ["image-left"], "rows": [...] }
//!   ]
//! }
//! ```
//!
//! ## Decoration
//!
//! [`decorate_page`] walks the blocks in order and enhances each one
//! independently. A block that fails to decorate (missing required content,
//! unknown name) logs a warning and is skipped; it never aborts its
//! siblings.

pub mod alert_banner;
pub mod teaser;

pub use alert_banner::AlertBanner;
pub use teaser::{Teaser, TeaserLayout};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// A single authored cell. Any subset of fields may be present.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cell {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
}

impl Cell {
    /// Trimmed text content, or the empty string when absent.
    pub fn text_content(&self) -> &str {
        self.text.as_deref().map(str::trim).unwrap_or("")
    }
}

/// One authored row: an ordered list of cells.
pub type Row = Vec<Cell>;

/// A discrete, independently enhanced content region on a page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    pub name: String,
    /// Variant flags from the authoring pipeline (e.g. "image-left").
    #[serde(default)]
    pub variants: Vec<String>,
    #[serde(default)]
    pub rows: Vec<Row>,
}

impl Block {
    pub fn has_variant(&self, variant: &str) -> bool {
        self.variants.iter().any(|v| v == variant)
    }

    /// First cell of the given row, if present.
    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.rows.get(row).and_then(|r| r.get(col))
    }
}

/// A page document as emitted by the authoring pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    /// Site-relative path of the page (e.g. "/courses/biology").
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub blocks: Vec<Block>,
}

impl Page {
    /// Load a page document from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read page document: {}", path.display()))?;
        let page: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse page document: {}", path.display()))?;
        Ok(page)
    }
}

/// Configuration extracted from an authored search block: row 0 is an
/// optional icon image, row 1 a label (defaults to "Search").
#[derive(Debug, Clone, PartialEq)]
pub struct SearchBarConfig {
    pub icon: Option<String>,
    pub label: String,
}

impl Default for SearchBarConfig {
    fn default() -> Self {
        Self {
            icon: None,
            label: "Search".to_string(),
        }
    }
}

impl SearchBarConfig {
    pub fn from_block(block: &Block) -> Self {
        let icon = block.cell(0, 0).and_then(|c| c.image.clone());
        let label = block
            .cell(1, 0)
            .map(|c| c.text_content().to_string())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| "Search".to_string());
        Self { icon, label }
    }
}

/// A block after decoration. Blocks that only configure another widget
/// (the search bar) or that fail to decorate do not appear here.
#[derive(Debug, Clone)]
pub enum DecoratedBlock {
    AlertBanner(AlertBanner),
    Teaser(Teaser),
}

/// Result of decorating a whole page.
#[derive(Debug, Clone, Default)]
pub struct DecoratedPage {
    pub blocks: Vec<DecoratedBlock>,
    /// Search bar configuration, when the page carries a search block.
    pub search_bar: Option<SearchBarConfig>,
}

/// Decorate every block on a page. Each block's enhancement is independent:
/// a failure logs a warning to stderr and skips that block only.
pub fn decorate_page(page: &Page) -> DecoratedPage {
    let mut decorated = DecoratedPage::default();

    for block in &page.blocks {
        match block.name.as_str() {
            "alertbanner" => match AlertBanner::decorate(block) {
                Ok(banner) => decorated.blocks.push(DecoratedBlock::AlertBanner(banner)),
                Err(e) => eprintln!("Warning: alertbanner block skipped: {}", e),
            },
            "teaser" => match Teaser::decorate(block) {
                Ok(teaser) => decorated.blocks.push(DecoratedBlock::Teaser(teaser)),
                Err(e) => eprintln!("Warning: teaser block skipped: {}", e),
            },
            "search" => {
                decorated.search_bar = Some(SearchBarConfig::from_block(block));
            }
            // The courses-list block is data for the indexer, not a widget.
            "courses-list" => {}
            other => {
                eprintln!("Warning: unknown block type '{}' skipped", other);
            }
        }
    }

    decorated
}
