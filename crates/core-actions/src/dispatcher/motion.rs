//! Cursor and page motions.
//!
//! Left/Right are shared between the query cursor and the page:
//! - in a multi-column grid they always move a whole column;
//! - in a single-column list they only ever move the query cursor;
//! - in the strip they move the cursor while it has room and the highlight
//!   cannot move, then fall through to Up/Down.

use crate::MotionKind;
use core_state::MenuState;
use core_text::QueryLine;

pub(super) fn apply(kind: MotionKind, state: &mut MenuState) -> bool {
    match kind {
        MotionKind::Left => left(state),
        MotionKind::Right => right(state),
        MotionKind::WordLeft => cursor_moved(state, |q, d| q.move_word_left(d)),
        MotionKind::WordRight => cursor_moved(state, |q, d| q.move_word_right(d)),
        MotionKind::Up => state.up(),
        MotionKind::Down => state.down(),
        MotionKind::PageUp => state.page_prev(),
        MotionKind::PageDown => state.page_next(),
        MotionKind::Home => state.home(),
        MotionKind::End => state.end(),
    }
}

fn cursor_moved(state: &mut MenuState, motion: impl FnOnce(&mut QueryLine, &str)) -> bool {
    let before = state.query().cursor();
    state.move_cursor(motion);
    state.query().cursor() != before
}

fn left(state: &mut MenuState) -> bool {
    let layout = state.pager().layout();
    if layout.columns() > 1 {
        return state.grid_left();
    }
    let sel_has_left = state
        .window()
        .sel
        .and_then(|id| state.matches().left(id))
        .is_some();
    if state.query().cursor() > 0 && (!sel_has_left || layout.is_grid()) {
        let mut moved = false;
        state.move_cursor(|q, _| moved = q.move_left());
        return moved;
    }
    if layout.is_grid() {
        return false;
    }
    state.up()
}

fn right(state: &mut MenuState) -> bool {
    let layout = state.pager().layout();
    if layout.columns() > 1 {
        return state.grid_right();
    }
    if !state.query().cursor_at_end() {
        let mut moved = false;
        state.move_cursor(|q, _| moved = q.move_right());
        return moved;
    }
    if layout.is_grid() {
        return false;
    }
    state.down()
}
