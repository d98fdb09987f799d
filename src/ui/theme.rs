//! # Theme System
//!
//! Centralized color themes for the previewer. Rendering code references
//! theme fields instead of hardcoding `ratatui::style::Color` values; the
//! active theme is chosen via `--theme` or the persisted config.

use ratatui::style::Color;

/// All colors used by the TUI, grouped by semantic role.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Human-readable name, matched case-insensitively by `--theme`.
    pub name: &'static str,

    /// Main background for panels.
    pub bg: Color,
    /// Primary text color.
    pub fg: Color,
    /// Muted/secondary text (hints, placeholders, separators).
    pub fg_dim: Color,
    /// Primary accent: focused borders, selected-item background.
    pub accent: Color,
    /// Secondary accent: CTA links, highlighted query text.
    pub secondary: Color,
    /// Error / alert indicator.
    pub error: Color,
    /// Background for banner and image-backdrop surfaces.
    pub selection_bg: Color,
}

impl Theme {
    /// Return the list of all built-in themes (order = display order).
    pub fn all() -> &'static [Theme] {
        &BUILT_IN_THEMES
    }

    /// Find a built-in theme by name (case-insensitive).
    pub fn by_name(name: &str) -> Option<&'static Theme> {
        BUILT_IN_THEMES
            .iter()
            .find(|t| t.name.eq_ignore_ascii_case(name))
    }

    /// Return the default theme (Catppuccin Mocha).
    pub fn default_theme() -> &'static Theme {
        &BUILT_IN_THEMES[0]
    }
}

static BUILT_IN_THEMES: [Theme; 3] = [
    // 0 - Catppuccin Mocha (default)
    Theme {
        name: "Catppuccin Mocha",
        bg: Color::Rgb(30, 30, 46),
        fg: Color::Rgb(205, 214, 244),
        fg_dim: Color::Rgb(108, 112, 134),
        accent: Color::Rgb(137, 180, 250),
        secondary: Color::Rgb(249, 226, 175),
        error: Color::Rgb(243, 139, 168),
        selection_bg: Color::Rgb(69, 71, 90),
    },
    // 1 - Nord
    Theme {
        name: "Nord",
        bg: Color::Rgb(46, 52, 64),
        fg: Color::Rgb(216, 222, 233),
        fg_dim: Color::Rgb(76, 86, 106),
        accent: Color::Rgb(136, 192, 208),
        secondary: Color::Rgb(235, 203, 139),
        error: Color::Rgb(191, 97, 106),
        selection_bg: Color::Rgb(59, 66, 82),
    },
    // 2 - Dracula
    Theme {
        name: "Dracula",
        bg: Color::Rgb(40, 42, 54),
        fg: Color::Rgb(248, 248, 242),
        fg_dim: Color::Rgb(98, 114, 164),
        accent: Color::Rgb(189, 147, 249),
        secondary: Color::Rgb(241, 250, 140),
        error: Color::Rgb(255, 85, 85),
        selection_bg: Color::Rgb(68, 71, 90),
    },
];
