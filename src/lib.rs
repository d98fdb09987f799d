//! Blockdeck - A TUI previewer for block-authored content pages
//!
//! This library provides the core functionality for parsing page documents
//! produced by a content authoring pipeline, decorating their blocks into
//! interactive widgets (alert banner, teaser, site search), and generating
//! the JSON search index consumed by the search widget.

pub mod block;
pub mod index;
pub mod search;
pub mod ui;
