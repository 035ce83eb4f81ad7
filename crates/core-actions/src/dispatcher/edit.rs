use crate::EditKind;
use core_state::MenuState;

pub(super) fn apply(kind: EditKind, state: &mut MenuState) -> bool {
    match kind {
        EditKind::Backspace => state.edit_query(|q, _| q.delete_back()),
        EditKind::Delete => state.edit_query(|q, _| q.delete_forward()),
        EditKind::KillToEnd => state.edit_query(|q, _| q.delete_to_end()),
        EditKind::KillToStart => state.edit_query(|q, _| q.delete_to_start()),
        EditKind::KillWordBack => state.edit_query(|q, delims| q.delete_word_back(delims)),
    }
}
