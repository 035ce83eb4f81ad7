//! Dispatcher applying `Action` to a `MenuState`.
//!
//! * `edit`   - query text mutation (rematches on change)
//! * `motion` - cursor movement and page navigation
//!
//! Everything else (accept, completion, selection, history) is a direct call
//! into `MenuState` and lives here.

use crate::Action;
use core_state::{AcceptOutcome, MenuState, Output};
use tracing::debug;

mod edit;
mod motion;

/// Result of dispatching a single `Action`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchResult {
    /// Menu stays open; `dirty` asks for a redraw.
    Continue { dirty: bool },
    /// Print the output and exit successfully.
    Accept(Output),
    Cancel,
}

impl DispatchResult {
    pub fn dirty() -> Self {
        DispatchResult::Continue { dirty: true }
    }

    pub fn clean() -> Self {
        DispatchResult::Continue { dirty: false }
    }

    fn from_changed(changed: bool) -> Self {
        DispatchResult::Continue { dirty: changed }
    }

    pub fn is_dirty(&self) -> bool {
        match self {
            DispatchResult::Continue { dirty } => *dirty,
            DispatchResult::Accept(_) | DispatchResult::Cancel => true,
        }
    }
}

pub fn dispatch(action: Action, state: &mut MenuState) -> DispatchResult {
    let name = action.name();
    let result = match action {
        Action::Insert(c) => {
            let mut buf = [0u8; 4];
            let s: &str = c.encode_utf8(&mut buf);
            DispatchResult::from_changed(state.edit_query(|q, _| q.insert(s)))
        }
        Action::Paste(payload) => {
            DispatchResult::from_changed(state.edit_query(|q, _| q.paste(&payload)))
        }
        Action::Edit(kind) => DispatchResult::from_changed(edit::apply(kind, state)),
        Action::Motion(kind) => DispatchResult::from_changed(motion::apply(kind, state)),
        Action::Complete => DispatchResult::from_changed(state.complete()),
        Action::ToggleSelection => DispatchResult::from_changed(state.toggle_selection()),
        Action::ToggleHistoryView => DispatchResult::from_changed(state.toggle_history_view()),
        Action::History(direction) => {
            DispatchResult::from_changed(state.navigate_history(direction))
        }
        Action::Accept { raw } => match state.accept(raw) {
            AcceptOutcome::Descended => DispatchResult::dirty(),
            AcceptOutcome::Emit(output) => DispatchResult::Accept(output),
        },
        Action::Cancel => DispatchResult::Cancel,
    };
    debug!(target: "actions", action = name, dirty = result.is_dirty(), "action_dispatched");
    result
}
