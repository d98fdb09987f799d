//! Teaser block.
//!
//! Supports two design variants:
//! - Background: text overlaid on the image area (default)
//! - Side-by-side: image and text next to each other
//!
//! Variant flags:
//! - `image-left` - image pane on the left, text on the right
//! - `image-right` - mirrored arrangement
//!
//! Expected authored structure:
//! - Row 0: image
//! - Row 1: text content (cells: optional pre-title, title, description)
//! - Row 2: optional CTA link

use crate::block::Block;
use crate::ui::theme::Theme;
use anyhow::{anyhow, Result};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block as UiBlock, Borders, Paragraph, Wrap},
    Frame,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeaserLayout {
    /// Text overlay on the image area.
    Background,
    /// Image pane beside the text; `mirrored` puts the image on the right.
    SideBySide { mirrored: bool },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Teaser {
    pub image: String,
    pub pre_title: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub cta: Option<Cta>,
    pub layout: TeaserLayout,
}

/// Call-to-action link: label + target.
#[derive(Debug, Clone, PartialEq)]
pub struct Cta {
    pub label: String,
    pub href: String,
}

impl Teaser {
    /// Build the teaser from its authored block. A missing image is an
    /// error; the caller logs a warning and leaves the block undecorated.
    pub fn decorate(block: &Block) -> Result<Self> {
        let image = block
            .rows
            .first()
            .and_then(|row| row.iter().find_map(|c| c.image.clone()))
            .ok_or_else(|| anyhow!("no image found"))?;

        // Text row cells: [pre-title, title, description...]. A single cell
        // is treated as the title.
        let text_row = block.rows.get(1).map(Vec::as_slice).unwrap_or(&[]);
        let (pre_title, title, description) = match text_row {
            [] => (None, String::new(), None),
            [only] => (None, only.text_content().to_string(), None),
            [pre, title, rest @ ..] => {
                let pre = Some(pre.text_content().to_string()).filter(|t| !t.is_empty());
                let description = rest
                    .iter()
                    .map(|c| c.text_content().to_string())
                    .filter(|t| !t.is_empty())
                    .collect::<Vec<_>>()
                    .join(" ");
                (
                    pre,
                    title.text_content().to_string(),
                    Some(description).filter(|d| !d.is_empty()),
                )
            }
        };

        let cta = block.rows.get(2).and_then(|row| {
            row.iter().find(|c| c.link.is_some()).map(|c| Cta {
                label: {
                    let label = c.text_content();
                    if label.is_empty() {
                        "Learn more".to_string()
                    } else {
                        label.to_string()
                    }
                },
                // find() guarantees link is present
                href: c.link.clone().unwrap_or_default(),
            })
        });

        let layout = if block.has_variant("image-right") {
            TeaserLayout::SideBySide { mirrored: true }
        } else if block.has_variant("image-left") {
            TeaserLayout::SideBySide { mirrored: false }
        } else {
            TeaserLayout::Background
        };

        Ok(Self {
            image,
            pre_title,
            title,
            description,
            cta,
            layout,
        })
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        match self.layout {
            TeaserLayout::Background => self.render_background(frame, area, theme),
            TeaserLayout::SideBySide { mirrored } => {
                self.render_side_by_side(frame, area, theme, mirrored);
            }
        }
    }

    fn content_lines(&self, theme: &Theme) -> Vec<Line<'_>> {
        let mut lines = Vec::new();
        if let Some(ref pre) = self.pre_title {
            lines.push(Line::from(Span::styled(
                pre.as_str(),
                Style::default().fg(theme.fg_dim),
            )));
        }
        lines.push(Line::from(Span::styled(
            self.title.as_str(),
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )));
        if let Some(ref desc) = self.description {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                desc.as_str(),
                Style::default().fg(theme.fg),
            )));
        }
        if let Some(ref cta) = self.cta {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                format!("[ {} ] -> {}", cta.label, cta.href),
                Style::default()
                    .fg(theme.secondary)
                    .add_modifier(Modifier::BOLD),
            )));
        }
        lines
    }

    fn render_background(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        // The image becomes a shaded backdrop; text stacks over it.
        let backdrop = UiBlock::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", self.image))
            .border_style(Style::default().fg(theme.fg_dim))
            .style(Style::default().bg(theme.selection_bg));
        let inner = backdrop.inner(area);
        frame.render_widget(backdrop, area);

        let overlay = Paragraph::new(self.content_lines(theme))
            .wrap(Wrap { trim: true })
            .centered();
        frame.render_widget(overlay, inner);
    }

    fn render_side_by_side(&self, frame: &mut Frame, area: Rect, theme: &Theme, mirrored: bool) {
        let halves = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(area);

        let (image_area, text_area) = if mirrored {
            (halves[1], halves[0])
        } else {
            (halves[0], halves[1])
        };

        let image_pane = Paragraph::new(Line::from(Span::styled(
            self.image.as_str(),
            Style::default().fg(theme.fg_dim),
        )))
        .block(
            UiBlock::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.fg_dim)),
        )
        .centered();
        frame.render_widget(image_pane, image_area);

        let text_pane = Paragraph::new(self.content_lines(theme))
            .block(UiBlock::default().borders(Borders::ALL))
            .wrap(Wrap { trim: true });
        frame.render_widget(text_pane, text_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::Cell;

    fn text_cell(text: &str) -> Cell {
        Cell {
            text: Some(text.to_string()),
            ..Cell::default()
        }
    }

    fn image_cell(src: &str) -> Cell {
        Cell {
            image: Some(src.to_string()),
            ..Cell::default()
        }
    }

    fn full_block(variants: Vec<&str>) -> Block {
        Block {
            name: "teaser".to_string(),
            variants: variants.into_iter().map(String::from).collect(),
            rows: vec![
                vec![image_cell("/media/campus.png")],
                vec![
                    text_cell("Study with us"),
                    text_cell("Biology Degrees"),
                    text_cell("Three-year programs"),
                    text_cell("across two campuses."),
                ],
                vec![Cell {
                    text: Some("Apply now".to_string()),
                    link: Some("/apply".to_string()),
                    ..Cell::default()
                }],
            ],
        }
    }

    #[test]
    fn test_decorate_full_block() {
        let teaser = Teaser::decorate(&full_block(vec![])).unwrap();
        assert_eq!(teaser.image, "/media/campus.png");
        assert_eq!(teaser.pre_title.as_deref(), Some("Study with us"));
        assert_eq!(teaser.title, "Biology Degrees");
        assert_eq!(
            teaser.description.as_deref(),
            Some("Three-year programs across two campuses.")
        );
        let cta = teaser.cta.unwrap();
        assert_eq!(cta.label, "Apply now");
        assert_eq!(cta.href, "/apply");
        assert_eq!(teaser.layout, TeaserLayout::Background);
    }

    #[test]
    fn test_decorate_missing_image_fails() {
        let block = Block {
            name: "teaser".to_string(),
            variants: vec![],
            rows: vec![vec![text_cell("text only")]],
        };
        assert!(Teaser::decorate(&block).is_err());
    }

    #[test]
    fn test_variant_selection() {
        let left = Teaser::decorate(&full_block(vec!["image-left"])).unwrap();
        assert_eq!(left.layout, TeaserLayout::SideBySide { mirrored: false });

        let right = Teaser::decorate(&full_block(vec!["image-right"])).unwrap();
        assert_eq!(right.layout, TeaserLayout::SideBySide { mirrored: true });

        let bg = Teaser::decorate(&full_block(vec!["text-center"])).unwrap();
        assert_eq!(bg.layout, TeaserLayout::Background);
    }

    #[test]
    fn test_single_text_cell_is_title() {
        let block = Block {
            name: "teaser".to_string(),
            variants: vec![],
            rows: vec![
                vec![image_cell("/media/x.png")],
                vec![text_cell("Just a title")],
            ],
        };
        let teaser = Teaser::decorate(&block).unwrap();
        assert!(teaser.pre_title.is_none());
        assert_eq!(teaser.title, "Just a title");
        assert!(teaser.description.is_none());
        assert!(teaser.cta.is_none());
    }

    #[test]
    fn test_cta_without_label_gets_default() {
        let mut block = full_block(vec![]);
        block.rows[2] = vec![Cell {
            link: Some("/enrol".to_string()),
            ..Cell::default()
        }];
        let teaser = Teaser::decorate(&block).unwrap();
        let cta = teaser.cta.unwrap();
        assert_eq!(cta.label, "Learn more");
        assert_eq!(cta.href, "/enrol");
    }
}
