//! Editable single-line query with a grapheme-aware cursor.
//!
//! `cursor` is a byte offset into `text` and always sits on a grapheme
//! boundary. Every mutating method reports whether the text changed so the
//! caller knows when a re-match is needed; cursor-only moves return `false`
//! from the text-changed perspective and are exposed separately.

use crate::grapheme;

/// Maximum query size in bytes. Inserts that would exceed it are dropped whole.
pub const QUERY_CAPACITY: usize = 8191;

/// Characters treated as word separators when none are configured.
pub const DEFAULT_WORD_DELIMITERS: &str = " ";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryLine {
    text: String,
    cursor: usize,
}

impl QueryLine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn cursor_at_end(&self) -> bool {
        self.cursor == self.text.len()
    }

    /// Replace the whole text and park the cursor at the end (history recall, Tab).
    pub fn set(&mut self, text: &str) {
        let end = if text.len() > QUERY_CAPACITY {
            floor_char_boundary(text, QUERY_CAPACITY)
        } else {
            text.len()
        };
        self.text.clear();
        self.text.push_str(&text[..end]);
        self.cursor = self.text.len();
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    /// Insert at the cursor. Control characters are rejected, as are inserts
    /// that would overflow [`QUERY_CAPACITY`]. Returns true if text changed.
    pub fn insert(&mut self, s: &str) -> bool {
        if s.is_empty() || s.chars().any(char::is_control) {
            return false;
        }
        if self.text.len() + s.len() > QUERY_CAPACITY {
            tracing::debug!(
                target: "text.query",
                len = self.text.len(),
                add = s.len(),
                "insert_over_capacity"
            );
            return false;
        }
        self.text.insert_str(self.cursor, s);
        self.cursor += s.len();
        true
    }

    /// Insert a paste payload up to (not including) its first newline. Tabs
    /// become spaces and other control characters are dropped.
    pub fn paste(&mut self, payload: &str) -> bool {
        let line = payload.split(['\n', '\r']).next().unwrap_or_default();
        let line: String = line
            .chars()
            .filter_map(|c| match c {
                '\t' => Some(' '),
                c if c.is_control() => None,
                c => Some(c),
            })
            .collect();
        self.insert(&line)
    }

    pub fn delete_back(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let prev = grapheme::prev_boundary(&self.text, self.cursor);
        self.text.replace_range(prev..self.cursor, "");
        self.cursor = prev;
        true
    }

    pub fn delete_forward(&mut self) -> bool {
        if self.cursor_at_end() {
            return false;
        }
        let next = grapheme::next_boundary(&self.text, self.cursor);
        self.text.replace_range(self.cursor..next, "");
        true
    }

    /// Ctrl-K: drop everything right of the cursor.
    pub fn delete_to_end(&mut self) -> bool {
        if self.cursor_at_end() {
            return false;
        }
        self.text.truncate(self.cursor);
        true
    }

    /// Ctrl-U: drop everything left of the cursor.
    pub fn delete_to_start(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.text.replace_range(..self.cursor, "");
        self.cursor = 0;
        true
    }

    /// Ctrl-W: drop trailing delimiters, then the word before the cursor.
    pub fn delete_word_back(&mut self, delimiters: &str) -> bool {
        let start = self.word_start(delimiters);
        if start == self.cursor {
            return false;
        }
        self.text.replace_range(start..self.cursor, "");
        self.cursor = start;
        true
    }

    pub fn move_left(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor = grapheme::prev_boundary(&self.text, self.cursor);
        true
    }

    pub fn move_right(&mut self) -> bool {
        if self.cursor_at_end() {
            return false;
        }
        self.cursor = grapheme::next_boundary(&self.text, self.cursor);
        true
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.text.len();
    }

    /// Move to the start of the previous word (skipping delimiters first).
    pub fn move_word_left(&mut self, delimiters: &str) {
        self.cursor = self.word_start(delimiters);
    }

    /// Move to the end of the next word (skipping delimiters first).
    pub fn move_word_right(&mut self, delimiters: &str) {
        let mut pos = self.cursor;
        while pos < self.text.len() && is_delim_at(&self.text, pos, delimiters) {
            pos = grapheme::next_boundary(&self.text, pos);
        }
        while pos < self.text.len() && !is_delim_at(&self.text, pos, delimiters) {
            pos = grapheme::next_boundary(&self.text, pos);
        }
        self.cursor = pos;
    }

    fn word_start(&self, delimiters: &str) -> usize {
        let mut pos = self.cursor;
        while pos > 0 {
            let prev = grapheme::prev_boundary(&self.text, pos);
            if !is_delim_at(&self.text, prev, delimiters) {
                break;
            }
            pos = prev;
        }
        while pos > 0 {
            let prev = grapheme::prev_boundary(&self.text, pos);
            if is_delim_at(&self.text, prev, delimiters) {
                break;
            }
            pos = prev;
        }
        pos
    }
}

fn is_delim_at(text: &str, byte: usize, delimiters: &str) -> bool {
    text[byte..]
        .chars()
        .next()
        .is_some_and(|c| delimiters.contains(c))
}

fn floor_char_boundary(s: &str, mut idx: usize) -> usize {
    while idx > 0 && !s.is_char_boundary(idx) {
        idx -= 1;
    }
    idx
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(text: &str) -> QueryLine {
        let mut q = QueryLine::new();
        q.set(text);
        q
    }

    #[test]
    fn insert_at_cursor_and_reject_control() {
        let mut q = line("ac");
        q.move_left();
        assert!(q.insert("b"));
        assert_eq!(q.as_str(), "abc");
        assert_eq!(q.cursor(), 2);
        assert!(!q.insert("\u{7}"));
        assert_eq!(q.as_str(), "abc");
    }

    #[test]
    fn capacity_drops_whole_insert() {
        let mut q = line(&"x".repeat(QUERY_CAPACITY - 1));
        assert!(!q.insert("yy"));
        assert!(q.insert("y"));
        assert_eq!(q.as_str().len(), QUERY_CAPACITY);
    }

    #[test]
    fn paste_stops_at_first_newline() {
        let mut q = QueryLine::new();
        assert!(q.paste("first\nsecond"));
        assert_eq!(q.as_str(), "first");
        assert!(!q.paste("\nonly-after"));
    }

    #[test]
    fn paste_turns_tabs_into_spaces() {
        let mut q = QueryLine::new();
        assert!(q.paste("foo\tbar\nbaz"));
        assert_eq!(q.as_str(), "foo bar");
        assert!(q.paste("\x1b[x"));
        assert_eq!(q.as_str(), "foo bar[x");
        assert!(!q.insert("\t"));
    }

    #[test]
    fn backspace_and_delete_respect_graphemes() {
        let mut q = line("a😀b");
        q.move_left();
        assert!(q.delete_back());
        assert_eq!(q.as_str(), "ab");
        assert_eq!(q.cursor(), 1);
        assert!(q.delete_forward());
        assert_eq!(q.as_str(), "a");
        assert!(!q.delete_forward());
    }

    #[test]
    fn kill_to_end_and_start() {
        let mut q = line("hello world");
        q.move_word_left(" ");
        assert_eq!(q.cursor(), 6);
        assert!(q.delete_to_end());
        assert_eq!(q.as_str(), "hello ");
        assert!(q.delete_to_start());
        assert_eq!(q.as_str(), "");
        assert!(!q.delete_to_start());
    }

    #[test]
    fn delete_word_skips_trailing_delimiters() {
        let mut q = line("git commit  ");
        assert!(q.delete_word_back(" "));
        assert_eq!(q.as_str(), "git ");
        assert!(q.delete_word_back(" "));
        assert_eq!(q.as_str(), "");
        assert!(!q.delete_word_back(" "));
    }

    #[test]
    fn word_motions() {
        let mut q = line("one two three");
        q.move_home();
        q.move_word_right(" ");
        assert_eq!(q.cursor(), 3);
        q.move_word_right(" ");
        assert_eq!(q.cursor(), 7);
        q.move_word_left(" ");
        assert_eq!(q.cursor(), 4);
        q.move_word_left("/ ");
        assert_eq!(q.cursor(), 0);
    }

    #[test]
    fn set_truncates_on_char_boundary() {
        let long = "é".repeat(QUERY_CAPACITY);
        let q = line(&long);
        assert!(q.as_str().len() <= QUERY_CAPACITY);
        assert!(q.cursor_at_end());
    }
}
