//! Action vocabulary for the menu, the key -> action translation table, and
//! the dispatcher that applies actions to a [`core_state::MenuState`].

mod dispatcher;
mod key_translator;

pub use dispatcher::{DispatchResult, dispatch};
pub use key_translator::translate_key;

use core_state::HistoryDirection;

/// Query-line edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKind {
    Backspace,
    Delete,
    /// Ctrl-K
    KillToEnd,
    /// Ctrl-U
    KillToStart,
    /// Ctrl-W
    KillWordBack,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionKind {
    Left,
    Right,
    WordLeft,
    WordRight,
    Up,
    Down,
    PageUp,
    PageDown,
    Home,
    End,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Insert(char),
    Paste(String),
    Edit(EditKind),
    Motion(MotionKind),
    Complete,
    ToggleSelection,
    ToggleHistoryView,
    History(HistoryDirection),
    /// `raw` emits the query text rather than the highlighted item.
    Accept { raw: bool },
    Cancel,
}

impl Action {
    /// Stable name for logging. Never carries the inserted or pasted text.
    pub fn name(&self) -> &'static str {
        match self {
            Action::Insert(_) => "insert",
            Action::Paste(_) => "paste",
            Action::Edit(_) => "edit",
            Action::Motion(_) => "motion",
            Action::Complete => "complete",
            Action::ToggleSelection => "toggle_selection",
            Action::ToggleHistoryView => "toggle_history_view",
            Action::History(_) => "history",
            Action::Accept { .. } => "accept",
            Action::Cancel => "cancel",
        }
    }
}
