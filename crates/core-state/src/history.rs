//! Recency log of committed queries.
//!
//! Records are loaded once, navigated read-only during the session, and
//! written back once at commit. The navigation cursor ranges over
//! `0..=len`; `len` means "not recalling, the scratch text is authoritative".
//! Entering navigation from `len` saves the caller's current text as scratch
//! so stepping back past the newest record restores it.
//!
//! Capacity is enforced only at write-back: the log keeps the newest `max`
//! records and then appends the committed text. With dedup enabled the
//! committed text is skipped only when it equals the newest record; older
//! duplicates are left alone.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Default write-back capacity.
pub const DEFAULT_HISTORY_MAX: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryDirection {
    Older,
    Newer,
}

#[derive(Debug, Clone)]
pub struct HistoryLog {
    path: Option<PathBuf>,
    records: Vec<String>,
    pos: usize,
    scratch: String,
    max: usize,
    dedup: bool,
}

impl Default for HistoryLog {
    fn default() -> Self {
        Self::disabled()
    }
}

impl HistoryLog {
    /// A log with no backing file: navigation is empty and commit is a no-op.
    pub fn disabled() -> Self {
        Self::in_memory(Vec::new(), DEFAULT_HISTORY_MAX, true)
    }

    /// A log over `records` with no backing file.
    pub fn in_memory(records: Vec<String>, max: usize, dedup: bool) -> Self {
        let pos = records.len();
        Self {
            path: None,
            records,
            pos,
            scratch: String::new(),
            max,
            dedup,
        }
    }

    /// Load one record per line from `path`. A missing file is an empty log;
    /// any other read failure is an error.
    pub fn load(path: &Path, max: usize, dedup: bool) -> Result<Self> {
        let records = match std::fs::read(path) {
            Ok(bytes) => String::from_utf8_lossy(&bytes)
                .lines()
                .map(str::to_owned)
                .collect(),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(target: "state.history", path = %path.display(), "history_missing");
                Vec::new()
            }
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("failed to read history {}", path.display()));
            }
        };
        info!(target: "state.history", records = records.len(), max, dedup, "history_loaded");
        let mut log = Self::in_memory(records, max, dedup);
        log.path = Some(path.to_path_buf());
        Ok(log)
    }

    /// Whether a backing file is configured.
    pub fn is_persistent(&self) -> bool {
        self.path.is_some()
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn records(&self) -> &[String] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Navigation cursor, in `0..=len()`.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Step through the log. Returns the text that should replace the query,
    /// or `None` at a boundary (or when the log is empty).
    pub fn navigate(&mut self, direction: HistoryDirection, current: &str) -> Option<String> {
        if self.records.is_empty() {
            return None;
        }
        let len = self.records.len();
        if self.pos == len {
            self.scratch = current.to_owned();
        }
        let text = match direction {
            HistoryDirection::Older if self.pos > 0 => {
                self.pos -= 1;
                self.records[self.pos].clone()
            }
            HistoryDirection::Newer if self.pos + 1 < len => {
                self.pos += 1;
                self.records[self.pos].clone()
            }
            HistoryDirection::Newer if self.pos + 1 == len => {
                self.pos = len;
                self.scratch.clone()
            }
            _ => return None,
        };
        debug!(target: "state.history", ?direction, pos = self.pos, len, "history_navigated");
        Some(text)
    }

    /// Records a commit of `final_text` would persist.
    pub fn write_back_records(&self, final_text: &str) -> Vec<String> {
        let start = self.records.len().saturating_sub(self.max);
        let mut out = self.records[start..].to_vec();
        let duplicate = self.dedup && self.records.last().is_some_and(|r| r == final_text);
        if !final_text.is_empty() && !duplicate {
            out.push(final_text.to_owned());
        }
        out
    }

    /// Persist the log with `final_text` appended. Returns `Ok(false)` when
    /// persistence is disabled (no file, or `max == 0`).
    pub fn commit(&self, final_text: &str) -> Result<bool> {
        let Some(path) = self.path.as_deref() else {
            return Ok(false);
        };
        if self.max == 0 {
            debug!(target: "state.history", "history_commit_disabled");
            return Ok(false);
        }
        let records = self.write_back_records(final_text);
        let mut body = String::new();
        for r in &records {
            body.push_str(r);
            body.push('\n');
        }
        std::fs::write(path, body)
            .with_context(|| format!("failed to write history {}", path.display()))?;
        info!(target: "state.history", records = records.len(), "history_committed");
        Ok(true)
    }
}
