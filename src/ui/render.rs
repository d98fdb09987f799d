//! Rendering for the page previewer.
//!
//! [`render`] draws the decorated block stack and returns the [`PageAreas`]
//! it laid out, so the event loop can hit-test mouse events against the
//! same geometry.

use crate::block::DecoratedBlock;
use crate::search::{SearchState, SearchWidget};
use crate::ui::app::{App, FocusTarget, PageAreas};
use crate::ui::theme::Theme;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block as UiBlock, Borders, List, ListItem, Paragraph},
    Frame,
};

pub fn render(frame: &mut Frame, app: &App) -> PageAreas {
    let areas = compute_areas(app, frame.area());

    if let Some(banner_area) = areas.banner {
        if let Some((i, banner)) = first_visible_banner(app) {
            let focused = app.focused() == Some(FocusTarget::Banner(i));
            banner.render(frame, banner_area, &app.theme, focused);
        }
    }

    let mut teaser_areas = areas.teasers.iter();
    for block in &app.blocks {
        if let DecoratedBlock::Teaser(teaser) = block {
            if let Some(area) = teaser_areas.next() {
                teaser.render(frame, *area, &app.theme);
            }
        }
    }

    if let (Some(widget), Some(bar_area)) = (app.search.as_ref(), areas.search_bar) {
        let focused = app.focused() == Some(FocusTarget::SearchBar);
        render_search_bar(frame, widget, bar_area, &app.theme, focused);
        if let Some(results_area) = areas.results {
            render_results(frame, widget, results_area, &app.theme);
        }
    }

    render_status(frame, app, areas.status);

    areas
}

/// Compute the layout for the current app state. Pure with respect to the
/// frame: mouse handling recomputes the same areas from the terminal size.
pub fn compute_areas(app: &App, area: Rect) -> PageAreas {
    let has_banner = first_visible_banner(app).is_some();
    let teaser_count = app
        .blocks
        .iter()
        .filter(|b| matches!(b, DecoratedBlock::Teaser(_)))
        .count();
    let search = app.search.as_ref();

    let mut constraints = Vec::new();
    if has_banner {
        constraints.push(Constraint::Length(1));
    }
    for _ in 0..teaser_count {
        constraints.push(Constraint::Fill(1));
    }
    if search.is_some() {
        constraints.push(Constraint::Length(3));
    }
    let results_height = search.filter(|w| w.panel_visible()).map(|w| {
        // One row per option, the placeholder counts as one, plus borders.
        w.results().len().max(1) as u16 + 2
    });
    if let Some(height) = results_height {
        constraints.push(Constraint::Length(height));
    }
    constraints.push(Constraint::Length(1)); // status line

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    let mut next = 0;
    let mut take = || {
        let rect = chunks[next];
        next += 1;
        rect
    };

    PageAreas {
        banner: has_banner.then(&mut take),
        teasers: (0..teaser_count).map(|_| take()).collect(),
        search_bar: search.is_some().then(&mut take),
        results: results_height.is_some().then(&mut take),
        status: take(),
    }
}

fn first_visible_banner(app: &App) -> Option<(usize, &crate::block::AlertBanner)> {
    app.blocks.iter().enumerate().find_map(|(i, b)| match b {
        DecoratedBlock::AlertBanner(banner) if banner.is_visible() => Some((i, banner)),
        _ => None,
    })
}

fn render_search_bar(
    frame: &mut Frame,
    widget: &SearchWidget,
    area: Rect,
    theme: &Theme,
    focused: bool,
) {
    let border_color = if widget.is_open() || focused {
        theme.accent
    } else {
        theme.fg_dim
    };

    let line = if widget.is_open() {
        Line::from(vec![
            Span::styled(
                format!("{}: ", widget.label()),
                Style::default().fg(theme.fg_dim),
            ),
            Span::styled(widget.input().to_string(), Style::default().fg(theme.fg)),
            Span::styled("▏", Style::default().fg(theme.accent)),
        ])
    } else {
        let icon = widget.icon().unwrap_or("🔍");
        Line::from(vec![
            Span::raw(format!("{} ", icon)),
            Span::styled(widget.label().to_string(), Style::default().fg(theme.fg)),
            Span::styled(
                "  (press / to open)",
                Style::default().fg(theme.fg_dim),
            ),
        ])
    };

    let title = if widget.is_open() {
        " Search  [Esc] Clear "
    } else {
        " Search "
    };

    let bar = Paragraph::new(line).block(
        UiBlock::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(Style::default().fg(border_color)),
    );
    frame.render_widget(bar, area);
}

fn render_results(frame: &mut Frame, widget: &SearchWidget, area: Rect, theme: &Theme) {
    let items: Vec<ListItem> = if widget.results().is_empty() {
        // Disabled placeholder option.
        vec![ListItem::new("No results found.").style(Style::default().fg(theme.fg_dim))]
    } else {
        widget
            .results()
            .iter()
            .enumerate()
            .map(|(i, result)| {
                let selected = widget.focus_index() == i as isize;
                let style = if selected {
                    Style::default()
                        .fg(theme.bg)
                        .bg(theme.accent)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(theme.fg)
                };
                let title = if result.title.is_empty() {
                    "Untitled"
                } else {
                    &result.title
                };
                ListItem::new(title.to_string()).style(style)
            })
            .collect()
    };

    let marker = if widget.expanded() { "expanded" } else { "collapsed" };
    let list = List::new(items).block(
        UiBlock::default()
            .borders(Borders::ALL)
            .title(format!(" Results ({}) ", marker))
            .border_style(Style::default().fg(theme.fg_dim)),
    );
    frame.render_widget(list, area);
}

/// Status footer: the live region on the left, key hints on the right.
fn render_status(frame: &mut Frame, app: &App, area: Rect) {
    // The live region text; falls back to the page path when nothing is
    // being announced.
    let status = app
        .search
        .as_ref()
        .map(SearchWidget::status_text)
        .filter(|s| !s.is_empty())
        .unwrap_or(app.page_path.as_str());

    let hints = match app.search.as_ref().map(SearchWidget::state) {
        Some(SearchState::Closed) | None => "[Tab] Focus  [Enter] Activate  [/] Search  [Q] Quit",
        Some(_) => "[↑↓] Navigate  [Enter] Go  [Esc] Close",
    };

    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(hints.len() as u16)])
        .split(area);

    let live_region = Paragraph::new(status.to_string()).style(Style::default().fg(app.theme.fg));
    frame.render_widget(live_region, halves[0]);

    let footer = Paragraph::new(hints).style(Style::default().fg(app.theme.fg_dim));
    frame.render_widget(footer, halves[1]);
}
