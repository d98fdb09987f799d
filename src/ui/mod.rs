//! # UI Module
//!
//! Terminal user interface for the page previewer.
//!
//! ## Components
//!
//! - [`App`] - application state (decorated blocks, focus, search plumbing)
//! - [`mod@render`] - rendering functions for drawing the TUI
//! - [`theme::Theme`] - color themes
//! - [`config::Config`] - persisted configuration
//!
//! ## Layout
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │                 Alert banner                     │
//! ├─────────────────────────────────────────────────┤
//! │                                                  │
//! │                   Teasers                        │
//! │                                                  │
//! ├─────────────────────────────────────────────────┤
//! │  Search bar                                      │
//! │  Results listbox (when open)                     │
//! ├─────────────────────────────────────────────────┤
//! │  Status line (live region)          Key hints    │
//! └─────────────────────────────────────────────────┘
//! ```

pub mod app;
pub mod config;
pub mod render;
pub mod theme;

pub use app::App;
pub use render::render;
