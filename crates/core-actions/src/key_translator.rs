//! Stateless key -> Action table.
//!
//! Control chords are folded onto their named-key equivalents first (Ctrl-H is
//! Backspace, Ctrl-M is Enter and so on) so the named-key arms are the single
//! source of truth for what each key does.

use crate::{Action, EditKind, MotionKind};
use core_events::{KeyCode, KeyEvent, KeyModifiers};
use core_state::HistoryDirection;

pub fn translate_key(key: &KeyEvent) -> Option<Action> {
    let ctrl = key.mods.contains(KeyModifiers::CTRL);
    let alt = key.mods.contains(KeyModifiers::ALT);
    let shift = key.mods.contains(KeyModifiers::SHIFT);

    if ctrl && !alt {
        if let KeyCode::Char(c) = key.code {
            return ctrl_char(c.to_ascii_lowercase(), shift);
        }
    }
    if alt && !ctrl {
        if let KeyCode::Char(c) = key.code {
            return alt_char(c, shift);
        }
    }

    let action = match key.code {
        KeyCode::Char(c) if !ctrl && !alt => Action::Insert(c),
        KeyCode::Enter if ctrl => Action::ToggleSelection,
        KeyCode::Enter => Action::Accept { raw: shift },
        KeyCode::Esc => Action::Cancel,
        KeyCode::Backspace => Action::Edit(EditKind::Backspace),
        KeyCode::Delete => Action::Edit(EditKind::Delete),
        KeyCode::Tab => Action::Complete,
        KeyCode::Left if ctrl => Action::Motion(MotionKind::WordLeft),
        KeyCode::Right if ctrl => Action::Motion(MotionKind::WordRight),
        KeyCode::Left => Action::Motion(MotionKind::Left),
        KeyCode::Right => Action::Motion(MotionKind::Right),
        KeyCode::Up => Action::Motion(MotionKind::Up),
        KeyCode::Down => Action::Motion(MotionKind::Down),
        KeyCode::Home => Action::Motion(MotionKind::Home),
        KeyCode::End => Action::Motion(MotionKind::End),
        KeyCode::PageUp => Action::Motion(MotionKind::PageUp),
        KeyCode::PageDown => Action::Motion(MotionKind::PageDown),
        _ => return None,
    };
    Some(action)
}

fn ctrl_char(c: char, shift: bool) -> Option<Action> {
    let mods = if shift {
        KeyModifiers::SHIFT
    } else {
        KeyModifiers::empty()
    };
    let named = |code| translate_key(&KeyEvent::new(code, mods));
    match c {
        'a' => named(KeyCode::Home),
        'b' => named(KeyCode::Left),
        'c' | 'g' | '[' => Some(Action::Cancel),
        'd' => named(KeyCode::Delete),
        'e' => named(KeyCode::End),
        'f' => named(KeyCode::Right),
        'h' => named(KeyCode::Backspace),
        'i' => named(KeyCode::Tab),
        'j' | 'm' => named(KeyCode::Enter),
        'n' => named(KeyCode::Down),
        'p' => named(KeyCode::Up),
        'k' => Some(Action::Edit(EditKind::KillToEnd)),
        'u' => Some(Action::Edit(EditKind::KillToStart)),
        'w' => Some(Action::Edit(EditKind::KillWordBack)),
        'r' => Some(Action::ToggleHistoryView),
        _ => None,
    }
}

fn alt_char(c: char, shift: bool) -> Option<Action> {
    let action = match c {
        'b' => Action::Motion(MotionKind::WordLeft),
        'f' => Action::Motion(MotionKind::WordRight),
        'g' if shift => Action::Motion(MotionKind::End),
        'g' => Action::Motion(MotionKind::Home),
        'G' => Action::Motion(MotionKind::End),
        'h' => Action::Motion(MotionKind::Up),
        'j' => Action::Motion(MotionKind::PageDown),
        'k' => Action::Motion(MotionKind::PageUp),
        'l' => Action::Motion(MotionKind::Down),
        'p' => Action::History(HistoryDirection::Older),
        'n' => Action::History(HistoryDirection::Newer),
        _ => return None,
    };
    Some(action)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, mods: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, mods)
    }

    #[test]
    fn printable_characters_insert() {
        assert_eq!(
            translate_key(&KeyEvent::plain(KeyCode::Char('x'))),
            Some(Action::Insert('x'))
        );
        assert_eq!(
            translate_key(&key(KeyCode::Char('X'), KeyModifiers::SHIFT)),
            Some(Action::Insert('X'))
        );
    }

    #[test]
    fn control_chords_fold_onto_named_keys() {
        assert_eq!(
            translate_key(&KeyEvent::ctrl('h')),
            Some(Action::Edit(EditKind::Backspace))
        );
        assert_eq!(
            translate_key(&KeyEvent::ctrl('m')),
            Some(Action::Accept { raw: false })
        );
        assert_eq!(
            translate_key(&KeyEvent::ctrl('j')),
            Some(Action::Accept { raw: false })
        );
        assert_eq!(translate_key(&KeyEvent::ctrl('i')), Some(Action::Complete));
        assert_eq!(
            translate_key(&KeyEvent::ctrl('a')),
            Some(Action::Motion(MotionKind::Home))
        );
        assert_eq!(translate_key(&KeyEvent::ctrl('[')), Some(Action::Cancel));
        assert_eq!(translate_key(&KeyEvent::ctrl('z')), None);
    }

    #[test]
    fn enter_variants() {
        assert_eq!(
            translate_key(&key(KeyCode::Enter, KeyModifiers::SHIFT)),
            Some(Action::Accept { raw: true })
        );
        assert_eq!(
            translate_key(&key(KeyCode::Enter, KeyModifiers::CTRL)),
            Some(Action::ToggleSelection)
        );
    }

    #[test]
    fn alt_bindings() {
        assert_eq!(
            translate_key(&KeyEvent::alt('G')),
            Some(Action::Motion(MotionKind::End))
        );
        assert_eq!(
            translate_key(&key(KeyCode::Char('G'), KeyModifiers::ALT | KeyModifiers::SHIFT)),
            Some(Action::Motion(MotionKind::End))
        );
        assert_eq!(
            translate_key(&KeyEvent::alt('p')),
            Some(Action::History(HistoryDirection::Older))
        );
        assert_eq!(translate_key(&KeyEvent::alt('z')), None);
    }

    #[test]
    fn ctrl_arrows_move_by_word() {
        assert_eq!(
            translate_key(&key(KeyCode::Left, KeyModifiers::CTRL)),
            Some(Action::Motion(MotionKind::WordLeft))
        );
        assert_eq!(
            translate_key(&key(KeyCode::Right, KeyModifiers::CTRL)),
            Some(Action::Motion(MotionKind::WordRight))
        );
    }
}
