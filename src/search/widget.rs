//! The autocomplete search widget's interaction state machine.
//!
//! ## States
//!
//! - `Closed` - only the open control is visible
//! - `OpenEmpty` - input revealed, query shorter than 3 characters
//! - `Searching` - debounce timer pending or a fetch in flight
//! - `Results` - a result set rendered (possibly the empty placeholder)
//!
//! ## Timing and ordering
//!
//! The debounce is a polled deadline: every keystroke at or above the query
//! threshold re-arms a 300 ms deadline, and [`SearchWidget::poll`] fires the
//! trailing edge when the event loop ticks past it. Each fired query bumps a
//! request generation; [`SearchWidget::apply_index`] discards completions
//! carrying an older generation, so a slow response for an earlier query can
//! never overwrite a newer one. All widget state is owned by the instance -
//! multiple widgets on one page never share timers.

use crate::block::SearchBarConfig;
use crate::search::{filter_records, QueryIndex, SearchRecord};
use crossterm::event::KeyCode;
use std::time::{Duration, Instant};

/// Minimum query length before a search fires.
pub const MIN_QUERY_LEN: usize = 3;

/// Trailing-edge debounce window.
pub const DEBOUNCE: Duration = Duration::from_millis(300);

const PROMPT_STATUS: &str = "Start typing to see suggestions.";
const SEARCHING_STATUS: &str = "Searching...";

/// Logical widget state, derived from the instance fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchState {
    Closed,
    OpenEmpty,
    Searching,
    Results,
}

/// What the host application should do after a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchAction {
    None,
    /// Navigate to the given site-relative path.
    Navigate(String),
}

/// A fired query, to be resolved against the index fetcher. The completion
/// must be handed back via [`SearchWidget::apply_index`] with the same
/// generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub generation: u64,
    pub query: String,
}

/// One mounted search widget instance.
#[derive(Debug, Clone)]
pub struct SearchWidget {
    config: SearchBarConfig,
    open: bool,
    input: String,
    results: Vec<SearchRecord>,
    /// -1 = no selection, otherwise an index into `results`.
    focus: isize,
    panel_visible: bool,
    status: String,
    /// Deadline for the pending debounce, if any.
    debounce_deadline: Option<Instant>,
    in_flight: bool,
    /// Request generation; completions with an older generation are stale.
    generation: u64,
}

impl SearchWidget {
    pub fn new(config: SearchBarConfig) -> Self {
        Self {
            config,
            open: false,
            input: String::new(),
            results: Vec::new(),
            focus: -1,
            panel_visible: false,
            status: String::new(),
            debounce_deadline: None,
            in_flight: false,
            generation: 0,
        }
    }

    pub fn label(&self) -> &str {
        &self.config.label
    }

    pub fn icon(&self) -> Option<&str> {
        self.config.icon.as_deref()
    }

    pub fn state(&self) -> SearchState {
        if !self.open {
            SearchState::Closed
        } else if self.debounce_deadline.is_some() || self.in_flight {
            SearchState::Searching
        } else if self.panel_visible {
            SearchState::Results
        } else {
            SearchState::OpenEmpty
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// The combobox expanded flag: true iff a non-empty result list is
    /// visible. The empty placeholder keeps the panel visible but not
    /// expanded.
    pub fn expanded(&self) -> bool {
        self.panel_visible && !self.results.is_empty()
    }

    pub fn panel_visible(&self) -> bool {
        self.panel_visible
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// Trimmed current query text.
    pub fn query(&self) -> &str {
        self.input.trim()
    }

    /// The live-region text announced to assistive technology.
    pub fn status_text(&self) -> &str {
        &self.status
    }

    pub fn results(&self) -> &[SearchRecord] {
        &self.results
    }

    pub fn focus_index(&self) -> isize {
        self.focus
    }

    pub fn focused_result(&self) -> Option<&SearchRecord> {
        usize::try_from(self.focus)
            .ok()
            .and_then(|i| self.results.get(i))
    }

    /// Whether the event loop should poll on a short timeout to catch the
    /// debounce trailing edge promptly.
    pub fn debounce_pending(&self) -> bool {
        self.debounce_deadline.is_some()
    }

    /// Activate the open control: reveal the input and prompt.
    pub fn open(&mut self) {
        self.open = true;
        self.panel_visible = false;
        self.status = PROMPT_STATUS.to_string();
    }

    /// Activate the close control (or cancel key): full reset back to
    /// `Closed` from any open sub-state.
    pub fn close(&mut self) {
        self.open = false;
        self.input.clear();
        self.results.clear();
        self.focus = -1;
        self.panel_visible = false;
        self.status.clear();
        self.debounce_deadline = None;
        self.in_flight = false;
        // Supersede any fetch still in flight.
        self.generation += 1;
    }

    /// Handle a key press while the widget is open. `now` drives the
    /// debounce clock.
    pub fn handle_key(&mut self, code: KeyCode, now: Instant) -> SearchAction {
        match code {
            KeyCode::Esc => {
                self.close();
                SearchAction::None
            }
            KeyCode::Down => {
                self.focus_next();
                SearchAction::None
            }
            KeyCode::Up => {
                self.focus_previous();
                SearchAction::None
            }
            KeyCode::Enter => self.submit(),
            KeyCode::Backspace => {
                self.input.pop();
                self.input_changed(now);
                SearchAction::None
            }
            KeyCode::Char(c) => {
                self.input.push(c);
                self.input_changed(now);
                SearchAction::None
            }
            _ => SearchAction::None,
        }
    }

    /// Arrow-down: cycle forward with wraparound; no-op with zero results.
    pub fn focus_next(&mut self) {
        let len = self.results.len() as isize;
        if len > 0 {
            self.focus = if self.focus < len - 1 { self.focus + 1 } else { 0 };
        }
    }

    /// Arrow-up: cycle backward with wraparound; no-op with zero results.
    pub fn focus_previous(&mut self) {
        let len = self.results.len() as isize;
        if len > 0 {
            self.focus = if self.focus > 0 { self.focus - 1 } else { len - 1 };
        }
    }

    /// Pointer hover over a rendered result: set the focus index without
    /// touching the result set. Out-of-range indices are ignored.
    pub fn set_focus(&mut self, index: usize) {
        if index < self.results.len() {
            self.focus = index as isize;
        }
    }

    /// Enter: activate the focused result, or treat the raw input as a
    /// direct search-page query.
    fn submit(&mut self) -> SearchAction {
        if let Some(result) = self.focused_result() {
            return SearchAction::Navigate(result.path.clone());
        }
        let query = self.input.trim();
        if query.is_empty() {
            SearchAction::None
        } else {
            SearchAction::Navigate(format!("/search?q={}", urlencoding::encode(query)))
        }
    }

    /// Re-evaluate after any input edit: (re)arm the debounce at or above
    /// the threshold, otherwise fall back to the quiescent prompt state.
    fn input_changed(&mut self, now: Instant) {
        let query_len = self.input.trim().chars().count();

        if query_len >= MIN_QUERY_LEN {
            self.status = SEARCHING_STATUS.to_string();
            self.debounce_deadline = Some(now + DEBOUNCE);
        } else {
            self.debounce_deadline = None;
            self.in_flight = false;
            // A response for the superseded query must not surface later.
            self.generation += 1;
            self.panel_visible = false;
            self.results.clear();
            self.focus = -1;
            self.status = PROMPT_STATUS.to_string();
        }
    }

    /// Fire the debounce trailing edge when its deadline has passed.
    /// Returns the request the host should resolve against the fetcher.
    pub fn poll(&mut self, now: Instant) -> Option<FetchRequest> {
        let deadline = self.debounce_deadline?;
        if now < deadline {
            return None;
        }
        self.debounce_deadline = None;
        self.generation += 1;
        self.in_flight = true;
        Some(FetchRequest {
            generation: self.generation,
            query: self.input.trim().to_string(),
        })
    }

    /// Deliver a completed fetch. Stale generations (an older query, or a
    /// fetch superseded by close/clear) are discarded; the most recent
    /// query always wins.
    pub fn apply_index(&mut self, generation: u64, query: &str, index: &QueryIndex) {
        if generation != self.generation || !self.open {
            return;
        }
        self.in_flight = false;
        self.results = filter_records(&index.data, query);
        self.focus = -1;
        self.panel_visible = true;

        let count = self.results.len();
        self.status = if count > 0 {
            format!(
                "{} result{} found for {}.",
                count,
                if count == 1 { "" } else { "s" },
                query
            )
        } else {
            format!("{} - did not return any results.", query)
        };
    }
}
