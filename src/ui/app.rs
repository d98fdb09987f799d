//! Application state for the page previewer.
//!
//! One [`App`] hosts a decorated page: the block stack, the search widget
//! (when the page carries a search block), focus cycling between the
//! interactive blocks, and the async plumbing that resolves fired search
//! queries. Each block's state is private to this instance; nothing is
//! shared process-wide.

use crate::block::{DecoratedBlock, DecoratedPage};
use crate::search::{IndexFetcher, QueryIndex, SearchAction, SearchWidget};
use crate::ui::theme::Theme;
use crossterm::event::{KeyCode, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;

/// A completed fetch travelling back to the event loop.
type FetchCompletion = (u64, String, QueryIndex);

/// Which interactive element has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusTarget {
    /// Index into the decorated block list (a visible alert banner).
    Banner(usize),
    SearchBar,
}

/// Screen areas of the interactive elements, recomputed per frame by the
/// layout helper and reused for mouse hit-testing.
#[derive(Debug, Clone, Default)]
pub struct PageAreas {
    pub banner: Option<Rect>,
    pub teasers: Vec<Rect>,
    pub search_bar: Option<Rect>,
    pub results: Option<Rect>,
    pub status: Rect,
}

pub struct App {
    pub blocks: Vec<DecoratedBlock>,
    pub search: Option<SearchWidget>,
    pub page_path: String,
    pub theme: Theme,
    pub should_quit: bool,
    /// Target path handed to stdout after the terminal is restored.
    pub navigation: Option<String>,
    focus_index: usize,
    fetcher: Arc<dyn IndexFetcher>,
    fetch_tx: mpsc::UnboundedSender<FetchCompletion>,
    fetch_rx: mpsc::UnboundedReceiver<FetchCompletion>,
}

impl App {
    pub fn new(page: DecoratedPage, page_path: String, fetcher: Arc<dyn IndexFetcher>, theme: Theme) -> Self {
        let search = page.search_bar.map(SearchWidget::new);
        let (fetch_tx, fetch_rx) = mpsc::unbounded_channel();
        Self {
            blocks: page.blocks,
            search,
            page_path,
            theme,
            should_quit: false,
            navigation: None,
            focus_index: 0,
            fetcher,
            fetch_tx,
            fetch_rx,
        }
    }

    /// The interactive elements, in visual order. Dismissed banners drop
    /// out of the cycle.
    pub fn focus_targets(&self) -> Vec<FocusTarget> {
        let mut targets = Vec::new();
        for (i, block) in self.blocks.iter().enumerate() {
            if let DecoratedBlock::AlertBanner(banner) = block {
                if banner.is_visible() {
                    targets.push(FocusTarget::Banner(i));
                }
            }
        }
        if self.search.is_some() {
            targets.push(FocusTarget::SearchBar);
        }
        targets
    }

    pub fn focused(&self) -> Option<FocusTarget> {
        let targets = self.focus_targets();
        targets.get(self.focus_index.min(targets.len().saturating_sub(1))).copied()
    }

    pub fn cycle_focus(&mut self) {
        let count = self.focus_targets().len();
        if count > 0 {
            self.focus_index = (self.focus_index + 1) % count;
        }
    }

    fn search_is_open(&self) -> bool {
        self.search.as_ref().is_some_and(SearchWidget::is_open)
    }

    /// Whether the event loop should use a short poll timeout so the
    /// debounce trailing edge fires promptly.
    pub fn wants_fast_tick(&self) -> bool {
        self.search
            .as_ref()
            .is_some_and(SearchWidget::debounce_pending)
    }

    /// Advance time-driven state: fire due debounces and dispatch their
    /// fetches onto the runtime.
    pub fn tick(&mut self, now: Instant) {
        let Some(widget) = self.search.as_mut() else {
            return;
        };
        if let Some(request) = widget.poll(now) {
            let fetcher = Arc::clone(&self.fetcher);
            let tx = self.fetch_tx.clone();
            tokio::spawn(async move {
                let index = tokio::task::spawn_blocking(move || fetcher.fetch_or_empty())
                    .await
                    .unwrap_or_default();
                // Receiver dropped means the app is shutting down.
                let _ = tx.send((request.generation, request.query, index));
            });
        }
    }

    /// Drain completed fetches into the widget (stale ones are discarded
    /// inside `apply_index`).
    pub fn drain_completions(&mut self) {
        while let Ok((generation, query, index)) = self.fetch_rx.try_recv() {
            if let Some(widget) = self.search.as_mut() {
                widget.apply_index(generation, &query, &index);
            }
        }
    }

    pub fn handle_key(&mut self, code: KeyCode, now: Instant) {
        // An open search widget captures all keys.
        if self.search_is_open() {
            if let Some(widget) = self.search.as_mut() {
                match widget.handle_key(code, now) {
                    SearchAction::Navigate(path) => {
                        self.navigation = Some(path);
                        self.should_quit = true;
                    }
                    SearchAction::None => {}
                }
            }
            return;
        }

        match code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            KeyCode::Tab => {
                self.cycle_focus();
            }
            KeyCode::Char('/') => {
                if let Some(widget) = self.search.as_mut() {
                    widget.open();
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => self.activate_focused(),
            _ => {}
        }
    }

    /// Keyboard activation of the focused element: Enter/Space dismisses a
    /// banner, opens the search bar.
    fn activate_focused(&mut self) {
        match self.focused() {
            Some(FocusTarget::Banner(i)) => {
                if let Some(DecoratedBlock::AlertBanner(banner)) = self.blocks.get_mut(i) {
                    banner.dismiss();
                    self.focus_index = 0;
                }
            }
            Some(FocusTarget::SearchBar) => {
                if let Some(widget) = self.search.as_mut() {
                    widget.open();
                }
            }
            None => {}
        }
    }

    pub fn handle_mouse(&mut self, event: MouseEvent, areas: &PageAreas, now: Instant) {
        let pos = (event.column, event.row);
        match event.kind {
            MouseEventKind::Moved => {
                // Hover over a rendered option sets the focus index only.
                if let Some(index) = result_at(areas, pos) {
                    if let Some(widget) = self.search.as_mut() {
                        widget.set_focus(index);
                    }
                }
            }
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(index) = result_at(areas, pos) {
                    if let Some(widget) = self.search.as_mut() {
                        // Rows below the last option are dead space.
                        if index < widget.results().len() {
                            widget.set_focus(index);
                            if let SearchAction::Navigate(path) =
                                widget.handle_key(KeyCode::Enter, now)
                            {
                                self.navigation = Some(path);
                                self.should_quit = true;
                            }
                        }
                    }
                } else if hit(areas.banner, pos) {
                    // Click anywhere on the banner activates its close
                    // control.
                    if let Some(FocusTarget::Banner(i)) = self.focus_targets().first().copied() {
                        if let Some(DecoratedBlock::AlertBanner(banner)) = self.blocks.get_mut(i) {
                            banner.dismiss();
                        }
                    }
                } else if hit(areas.search_bar, pos) {
                    if let Some(widget) = self.search.as_mut() {
                        widget.open();
                    }
                }
            }
            _ => {}
        }
    }
}

fn hit(area: Option<Rect>, (column, row): (u16, u16)) -> bool {
    area.is_some_and(|a| {
        column >= a.x && column < a.x + a.width && row >= a.y && row < a.y + a.height
    })
}

/// Map a screen position to an option index inside the results listbox
/// (the panel body starts one row below its border).
fn result_at(areas: &PageAreas, (column, row): (u16, u16)) -> Option<usize> {
    let area = areas.results?;
    if !hit(Some(area), (column, row)) {
        return None;
    }
    let inner_top = area.y + 1;
    if row < inner_top || row >= area.y + area.height.saturating_sub(1) {
        return None;
    }
    Some((row - inner_top) as usize)
}
