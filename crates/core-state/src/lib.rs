//! Menu session state.
//!
//! [`MenuState`] is the single owner of everything one menu invocation
//! mutates: the query line, the active candidate source, the match list, the
//! page window, the selection overlay, and the history log. Every operation
//! takes `&mut MenuState` and runs a complete cycle (edit, rebuild, page
//! recompute) before returning, so callers never observe a match list that is
//! stale relative to the query.
//!
//! Source views:
//! - `SourceView::Items` matches against the loaded [`ItemStore`].
//! - `SourceView::History` matches against a store built from the history
//!   records. The item store is left untouched while this view is active.
//!
//! Selections are keyed by item-store ids, so toggling is only meaningful in
//! the items view; in the history view it is a no-op.

pub mod history;
pub mod pager;
pub mod selection;

pub use history::{DEFAULT_HISTORY_MAX, HistoryDirection, HistoryLog};
pub use pager::{Layout, PageWindow, Pager, WidthFn};
pub use selection::SelectionSet;

use core_items::{Candidate, ItemId, ItemStore, PrioritySet};
use core_match::{MatchList, Matcher};
use core_text::{CaseRule, DEFAULT_WORD_DELIMITERS, QueryLine, WidthOracle};
use serde_json::Value;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SourceView {
    #[default]
    Items,
    History,
}

/// What the caller should print on accept, and what to commit to history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Output {
    pub lines: Vec<String>,
    pub history_entry: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AcceptOutcome {
    /// The highlighted item held a nested object; its keys are now the item
    /// store and the menu stays open.
    Descended,
    /// The menu is done.
    Emit(Output),
}

pub struct MenuState {
    query: QueryLine,
    items: ItemStore,
    history_items: ItemStore,
    view: SourceView,
    matcher: Matcher,
    matches: MatchList,
    pager: Pager,
    selection: SelectionSet,
    history: HistoryLog,
    oracle: Box<dyn WidthOracle>,
    word_delimiters: String,
}

impl std::fmt::Debug for MenuState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MenuState")
            .field("query_len", &self.query.as_str().len())
            .field("items", &self.items.len())
            .field("view", &self.view)
            .field("matches", &self.matches.len())
            .field("window", &self.pager.window())
            .finish_non_exhaustive()
    }
}

impl MenuState {
    pub fn new(
        items: ItemStore,
        matcher: Matcher,
        layout: Layout,
        history: HistoryLog,
        oracle: Box<dyn WidthOracle>,
    ) -> Self {
        let mut state = Self {
            query: QueryLine::new(),
            items,
            history_items: ItemStore::new(),
            view: SourceView::Items,
            matcher,
            matches: MatchList::default(),
            pager: Pager::new(layout),
            selection: SelectionSet::new(),
            history,
            oracle,
            word_delimiters: DEFAULT_WORD_DELIMITERS.to_owned(),
        };
        state.rematch();
        state
    }

    pub fn with_word_delimiters(mut self, delimiters: impl Into<String>) -> Self {
        self.word_delimiters = delimiters.into();
        self
    }

    pub fn word_delimiters(&self) -> &str {
        &self.word_delimiters
    }

    pub fn query(&self) -> &QueryLine {
        &self.query
    }

    /// Apply a text edit to the query; rematches when `edit` reports a change.
    pub fn edit_query(&mut self, edit: impl FnOnce(&mut QueryLine, &str) -> bool) -> bool {
        let changed = edit(&mut self.query, &self.word_delimiters);
        if changed {
            self.rematch();
        }
        changed
    }

    /// Apply a cursor-only movement to the query. The text must not change.
    pub fn move_cursor(&mut self, motion: impl FnOnce(&mut QueryLine, &str)) {
        let before = self.query.as_str().len();
        motion(&mut self.query, &self.word_delimiters);
        debug_assert_eq!(before, self.query.as_str().len());
    }

    /// Replace the whole query (cursor at end) and rematch.
    pub fn set_query(&mut self, text: &str) {
        self.query.set(text);
        self.rematch();
    }

    pub fn view(&self) -> SourceView {
        self.view
    }

    pub fn items(&self) -> &ItemStore {
        &self.items
    }

    /// Store the matcher currently runs against.
    pub fn active_store(&self) -> &ItemStore {
        match self.view {
            SourceView::Items => &self.items,
            SourceView::History => &self.history_items,
        }
    }

    pub fn matcher(&self) -> Matcher {
        self.matcher
    }

    pub fn matches(&self) -> &MatchList {
        &self.matches
    }

    pub fn pager(&self) -> &Pager {
        &self.pager
    }

    pub fn window(&self) -> PageWindow {
        self.pager.window()
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    pub fn oracle(&self) -> &dyn WidthOracle {
        &*self.oracle
    }

    /// Visible page as candidates, in list order.
    pub fn visible(&self) -> Vec<&Candidate> {
        let store = self.active_store();
        self.pager
            .visible(&self.matches)
            .into_iter()
            .filter_map(|id| store.get(id))
            .collect()
    }

    pub fn highlighted(&self) -> Option<&Candidate> {
        self.pager.sel().and_then(|id| self.active_store().get(id))
    }

    pub fn is_highlighted(&self, id: ItemId) -> bool {
        self.pager.sel() == Some(id)
    }

    /// Selection membership of an id from the active store.
    pub fn is_selected(&self, id: ItemId) -> bool {
        self.view == SourceView::Items && self.selection.is_selected(id)
    }

    /// Char indices of `text` matched by the current query.
    pub fn highlights(&self, text: &str) -> Vec<usize> {
        if text.is_empty() || self.query.is_empty() {
            return Vec::new();
        }
        self.matcher.highlight(text, self.query.as_str())
    }

    /// `(position, total)`: 1-based rank of the last visible match and the
    /// size of the active store.
    pub fn counter(&self) -> (usize, usize) {
        (self.pager.position(&self.matches), self.active_store().len())
    }

    /// Widest item in the loaded store according to the width oracle.
    pub fn max_item_width(&self) -> u32 {
        self.items.max_width(&*self.oracle)
    }

    /// Rebuild the match list from the active store and re-anchor the page.
    pub fn rematch(&mut self) {
        let store = match self.view {
            SourceView::Items => &self.items,
            SourceView::History => &self.history_items,
        };
        self.matches = self.matcher.rebuild(store.as_slice(), self.query.as_str());
        let oracle = &*self.oracle;
        let width = |id: ItemId| store.text(id).map_or(0, |t| oracle.measure(t));
        self.pager.reset(&self.matches, &width);
    }

    /// Replace the layout (terminal resize). The highlight is kept and the
    /// page restarts at it.
    pub fn set_layout(&mut self, layout: Layout) {
        self.navigate(|pager, list, width| {
            pager.relayout(layout, list, width);
            true
        });
    }

    fn navigate(&mut self, op: impl FnOnce(&mut Pager, &MatchList, WidthFn<'_>) -> bool) -> bool {
        let store = match self.view {
            SourceView::Items => &self.items,
            SourceView::History => &self.history_items,
        };
        let oracle = &*self.oracle;
        let width = |id: ItemId| store.text(id).map_or(0, |t| oracle.measure(t));
        op(&mut self.pager, &self.matches, &width)
    }

    pub fn page_next(&mut self) -> bool {
        self.navigate(Pager::page_next)
    }

    pub fn page_prev(&mut self) -> bool {
        self.navigate(Pager::page_prev)
    }

    pub fn up(&mut self) -> bool {
        self.navigate(Pager::up)
    }

    pub fn down(&mut self) -> bool {
        self.navigate(Pager::down)
    }

    pub fn grid_left(&mut self) -> bool {
        self.navigate(Pager::grid_left)
    }

    pub fn grid_right(&mut self) -> bool {
        self.navigate(Pager::grid_right)
    }

    /// Home: when the head is already highlighted this is a query-cursor
    /// command, otherwise jump to the first page.
    pub fn home(&mut self) -> bool {
        if self.pager.sel() == self.matches.head() {
            self.query.move_home();
            return true;
        }
        self.navigate(Pager::home)
    }

    /// End: first moves the query cursor to the end of the text; once it is
    /// there, jumps to the last page and highlights the tail.
    pub fn end(&mut self) -> bool {
        if !self.query.cursor_at_end() {
            self.query.move_end();
            return true;
        }
        self.navigate(Pager::end)
    }

    /// Toggle the highlighted item in the selection overlay.
    pub fn toggle_selection(&mut self) -> bool {
        if self.view != SourceView::Items {
            return false;
        }
        let Some(id) = self.pager.sel() else {
            return false;
        };
        self.selection.toggle(id);
        true
    }

    /// Switch between item and history sources. Requires a history file.
    pub fn toggle_history_view(&mut self) -> bool {
        if !self.history.is_persistent() {
            return false;
        }
        self.view = match self.view {
            SourceView::Items => {
                self.history_items = ItemStore::from_lines(
                    self.history.records().iter().cloned(),
                    &PrioritySet::default(),
                    CaseRule::Sensitive,
                );
                SourceView::History
            }
            SourceView::History => {
                self.history_items = ItemStore::new();
                SourceView::Items
            }
        };
        debug!(target: "state.history", view = ?self.view, "source_view_toggled");
        self.rematch();
        true
    }

    /// Recall an older or newer history record into the query.
    pub fn navigate_history(&mut self, direction: HistoryDirection) -> bool {
        match self.history.navigate(direction, self.query.as_str()) {
            Some(text) => {
                self.set_query(&text);
                true
            }
            None => false,
        }
    }

    /// Tab completion: copy the highlighted text into the query.
    pub fn complete(&mut self) -> bool {
        let Some(text) = self.highlighted().map(|c| c.text.clone()) else {
            return false;
        };
        self.set_query(&text);
        true
    }

    /// Accept the current highlight.
    ///
    /// `raw` emits the query text instead of the highlighted item. A
    /// highlighted item carrying a nested object is descended into instead of
    /// emitted; one carrying a string value has that string emitted first.
    pub fn accept(&mut self, raw: bool) -> AcceptOutcome {
        let mut lines = Vec::new();
        let json = self.highlighted().and_then(|c| c.json_ref.clone());
        match json {
            Some(Value::Object(map)) => {
                self.items = ItemStore::from_json_object(&map);
                self.view = SourceView::Items;
                self.selection.clear();
                self.query.clear();
                info!(target: "state", items = self.items.len(), "json_descended");
                self.rematch();
                return AcceptOutcome::Descended;
            }
            Some(Value::String(s)) => lines.push(s),
            _ => {}
        }

        let sel = match self.view {
            SourceView::Items => self.pager.sel(),
            SourceView::History => None,
        };
        lines.extend(
            self.selection
                .selected()
                .filter(|&id| Some(id) != sel)
                .filter_map(|id| self.items.text(id).map(str::to_owned)),
        );
        let chosen = match self.highlighted() {
            Some(c) if !raw => c.text.clone(),
            _ => self.query.as_str().to_owned(),
        };
        lines.push(chosen.clone());
        debug!(target: "state", lines = lines.len(), raw, "accepted");
        AcceptOutcome::Emit(Output {
            lines,
            history_entry: chosen,
        })
    }

    /// Persist history with the accepted entry.
    pub fn commit_history(&self, entry: &str) -> anyhow::Result<bool> {
        self.history.commit(entry)
    }
}
