use core_actions::{Action, DispatchResult, EditKind, MotionKind, dispatch, translate_key};
use core_events::{KeyCode, KeyEvent, KeyModifiers};
use core_items::{ItemStore, PrioritySet};
use core_match::{MatchMode, Matcher};
use core_state::{HistoryLog, Layout, MenuState};
use core_text::{CaseRule, CellWidth};
use pretty_assertions::assert_eq;
use std::io::Write;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing_subscriber::fmt::MakeWriter;

fn session(lines: &[&str], layout: Layout) -> MenuState {
    let items = ItemStore::from_lines(
        lines.iter().copied(),
        &PrioritySet::default(),
        CaseRule::Sensitive,
    );
    MenuState::new(
        items,
        Matcher::new(MatchMode::Fuzzy, CaseRule::Sensitive),
        layout,
        HistoryLog::disabled(),
        Box::new(CellWidth::default()),
    )
}

fn list(rows: u32) -> Layout {
    Layout::Grid {
        rows,
        columns: 1,
        row_height: 1,
    }
}

fn type_str(state: &mut MenuState, text: &str) {
    for c in text.chars() {
        dispatch(Action::Insert(c), state);
    }
}

fn press(state: &mut MenuState, key: KeyEvent) -> DispatchResult {
    match translate_key(&key) {
        Some(action) => dispatch(action, state),
        None => DispatchResult::clean(),
    }
}

fn lines_of(result: DispatchResult) -> Vec<String> {
    match result {
        DispatchResult::Accept(out) => out.lines,
        other => panic!("expected accept, got {other:?}"),
    }
}

#[test]
fn typing_narrows_matches() {
    let mut s = session(&["apple", "banana", "cherry"], list(10));
    type_str(&mut s, "an");
    let shown: Vec<&str> = s.visible().iter().map(|c| c.text.as_str()).collect();
    assert_eq!(shown, vec!["banana"]);
    assert_eq!(
        dispatch(Action::Edit(EditKind::Backspace), &mut s),
        DispatchResult::dirty()
    );
    assert_eq!(s.query().as_str(), "a");
}

#[test]
fn strip_left_right_share_cursor_and_highlight() {
    let mut s = session(&["a1", "a2", "a3"], Layout::Strip { budget: 80 });
    type_str(&mut s, "a");

    // Cursor already at the end: Right moves the highlight.
    assert!(dispatch(Action::Motion(MotionKind::Right), &mut s).is_dirty());
    assert_eq!(s.window().sel, Some(1));

    // Highlight can move left, so Left moves it before touching the cursor.
    assert!(dispatch(Action::Motion(MotionKind::Left), &mut s).is_dirty());
    assert_eq!(s.window().sel, Some(0));
    assert_eq!(s.query().cursor(), 1);

    // Highlight at the head: Left moves the query cursor instead.
    assert!(dispatch(Action::Motion(MotionKind::Left), &mut s).is_dirty());
    assert_eq!(s.query().cursor(), 0);
    assert_eq!(s.window().sel, Some(0));

    assert_eq!(
        dispatch(Action::Motion(MotionKind::Left), &mut s),
        DispatchResult::clean()
    );
}

#[test]
fn vertical_list_left_right_only_move_cursor() {
    let mut s = session(&["a1", "a2"], list(5));
    type_str(&mut s, "a");
    assert_eq!(
        dispatch(Action::Motion(MotionKind::Right), &mut s),
        DispatchResult::clean()
    );
    assert_eq!(s.window().sel, Some(0));
    assert!(dispatch(Action::Motion(MotionKind::Left), &mut s).is_dirty());
    assert_eq!(s.query().cursor(), 0);
}

#[test]
fn grid_left_right_move_whole_columns() {
    let mut s = session(
        &["i0", "i1", "i2", "i3", "i4", "i5"],
        Layout::Grid {
            rows: 2,
            columns: 3,
            row_height: 1,
        },
    );
    assert!(dispatch(Action::Motion(MotionKind::Right), &mut s).is_dirty());
    assert_eq!(s.window().sel, Some(2));
    assert!(dispatch(Action::Motion(MotionKind::Right), &mut s).is_dirty());
    assert_eq!(s.window().sel, Some(4));
    assert!(dispatch(Action::Motion(MotionKind::Left), &mut s).is_dirty());
    assert_eq!(s.window().sel, Some(2));
}

#[test]
fn accept_emits_selected_then_highlighted() {
    let mut s = session(&["x", "y", "z"], list(10));
    assert!(press(&mut s, KeyEvent::new(KeyCode::Enter, KeyModifiers::CTRL)).is_dirty());
    press(&mut s, KeyEvent::ctrl('n'));
    let result = press(&mut s, KeyEvent::plain(KeyCode::Enter));
    match result {
        DispatchResult::Accept(out) => {
            assert_eq!(out.lines, vec!["x", "y"]);
            assert_eq!(out.history_entry, "y");
        }
        other => panic!("expected accept, got {other:?}"),
    }
}

#[test]
fn raw_accept_and_empty_match_emit_query() {
    let mut s = session(&["xylophone"], list(10));
    type_str(&mut s, "x");
    assert_eq!(
        lines_of(press(&mut s, KeyEvent::new(KeyCode::Enter, KeyModifiers::SHIFT))),
        vec!["x"]
    );
    assert_eq!(
        lines_of(dispatch(Action::Accept { raw: false }, &mut s)),
        vec!["xylophone"]
    );

    type_str(&mut s, "q");
    assert!(s.highlighted().is_none());
    assert_eq!(
        lines_of(dispatch(Action::Accept { raw: false }, &mut s)),
        vec!["xq"]
    );
}

#[test]
fn cancel_keys() {
    let mut s = session(&["a"], list(1));
    for key in [
        KeyEvent::plain(KeyCode::Esc),
        KeyEvent::ctrl('c'),
        KeyEvent::ctrl('g'),
        KeyEvent::ctrl('['),
    ] {
        assert_eq!(press(&mut s, key), DispatchResult::Cancel);
    }
}

#[test]
fn paste_stops_at_first_newline() {
    let mut s = session(&["foo", "bar"], list(5));
    dispatch(Action::Paste("fo\nbar".to_string()), &mut s);
    assert_eq!(s.query().as_str(), "fo");
    assert_eq!(s.highlighted().unwrap().text, "foo");
}

#[test]
fn kill_bindings_edit_the_query() {
    let mut s = session(&["a"], list(1));
    type_str(&mut s, "one two");
    press(&mut s, KeyEvent::ctrl('w'));
    assert_eq!(s.query().as_str(), "one ");
    press(&mut s, KeyEvent::ctrl('a'));
    press(&mut s, KeyEvent::ctrl('k'));
    assert_eq!(s.query().as_str(), "");

    type_str(&mut s, "abc");
    press(&mut s, KeyEvent::ctrl('b'));
    press(&mut s, KeyEvent::ctrl('u'));
    assert_eq!(s.query().as_str(), "c");
    assert_eq!(s.query().cursor(), 0);
}

#[test]
fn tab_completes_highlighted_text() {
    let mut s = session(&["alpha", "beta"], list(5));
    type_str(&mut s, "bt");
    assert!(press(&mut s, KeyEvent::plain(KeyCode::Tab)).is_dirty());
    assert_eq!(s.query().as_str(), "beta");
    assert!(s.query().cursor_at_end());
}

#[derive(Clone)]
struct BufferWriter {
    inner: Arc<Mutex<Vec<u8>>>,
}

struct LockedWriter<'a> {
    guard: MutexGuard<'a, Vec<u8>>,
}

impl Write for LockedWriter<'_> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.guard.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for BufferWriter {
    type Writer = LockedWriter<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        LockedWriter {
            guard: self.inner.lock().expect("log buffer poisoned"),
        }
    }
}

#[test]
fn dispatch_logs_action_names_only() {
    let buf = Arc::new(Mutex::new(Vec::new()));
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_writer(BufferWriter { inner: buf.clone() })
        .finish();
    tracing::subscriber::with_default(subscriber, || {
        let mut s = session(&["zebra"], list(3));
        dispatch(Action::Paste("zqxj-pasted".to_string()), &mut s);
    });
    let out = String::from_utf8(buf.lock().unwrap().clone()).unwrap();
    assert!(out.contains("action_dispatched"), "log: {out}");
    assert!(out.contains("paste"), "log: {out}");
    assert!(!out.contains("zqxj"), "log leaked text: {out}");
}
