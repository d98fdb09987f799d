//! Dismissible alert banner block.
//!
//! Accepts one authored row of rich text and renders it as a full-width
//! banner with a close control. Dismissal is a pure visual hide: the banner
//! stays out of the layout for the rest of the session but nothing is
//! persisted across runs.

use crate::block::Block;
use crate::ui::theme::Theme;
use anyhow::{anyhow, Result};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

#[derive(Debug, Clone, PartialEq)]
pub struct AlertBanner {
    pub message: String,
    pub dismissed: bool,
}

impl AlertBanner {
    /// Build the banner from its authored block: row 0, cell 0 carries the
    /// message text.
    pub fn decorate(block: &Block) -> Result<Self> {
        let message = block
            .cell(0, 0)
            .map(|c| c.text_content().to_string())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| anyhow!("no message row"))?;

        Ok(Self {
            message,
            dismissed: false,
        })
    }

    /// Hide the banner. Visual only; no persistence.
    pub fn dismiss(&mut self) {
        self.dismissed = true;
    }

    pub fn is_visible(&self) -> bool {
        !self.dismissed
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme, focused: bool) {
        if self.dismissed {
            return;
        }

        let close_style = if focused {
            Style::default()
                .fg(theme.bg)
                .bg(theme.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.fg_dim)
        };

        let line = Line::from(vec![
            Span::styled("[!] ", Style::default().fg(theme.error)),
            Span::styled(self.message.clone(), Style::default().fg(theme.fg)),
            Span::raw("  "),
            Span::styled("[x] Close Alert", close_style),
        ]);

        let banner = Paragraph::new(line)
            .style(Style::default().bg(theme.selection_bg))
            .centered();
        frame.render_widget(banner, area);
    }
}
