//! Source loaders. A malformed source is fatal for the caller: the menu cannot
//! run without a candidate set, so these return a typed error rather than
//! falling back to an empty store.

use serde_json::{Map, Value};
use std::io::BufRead;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read candidates: {0}")]
    Read(#[from] std::io::Error),
    #[error("cannot read json source {path}: {source}")]
    JsonIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{message} @ line: {line} - {path}")]
    JsonSyntax {
        path: PathBuf,
        line: usize,
        message: String,
    },
    #[error("json source {path} must be an object at the top level")]
    JsonNotObject { path: PathBuf },
}

/// Collect lines (without terminators) from a reader. Bytes that are not
/// UTF-8 decode to U+FFFD; only I/O failures are errors.
pub(crate) fn collect_lines<R: BufRead>(mut reader: R) -> Result<Vec<String>, SourceError> {
    let mut out = Vec::new();
    let mut buf = Vec::new();
    let mut lossy = 0usize;
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        if buf.last() == Some(&b'\n') {
            buf.pop();
            if buf.last() == Some(&b'\r') {
                buf.pop();
            }
        }
        let line = String::from_utf8_lossy(&buf);
        if let std::borrow::Cow::Owned(_) = line {
            lossy += 1;
        }
        out.push(line.into_owned());
    }
    if lossy > 0 {
        tracing::warn!(target: "items", lines = lossy, "non_utf8_lines_replaced");
    }
    Ok(out)
}

/// Parse JSON text whose top level must be an object.
pub fn parse_json_object(path: &Path, content: &str) -> Result<Map<String, Value>, SourceError> {
    match serde_json::from_str::<Value>(content) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(SourceError::JsonNotObject {
            path: path.to_path_buf(),
        }),
        Err(e) => Err(SourceError::JsonSyntax {
            path: path.to_path_buf(),
            line: e.line(),
            message: e.to_string(),
        }),
    }
}

/// Read and parse a JSON object file.
pub fn load_json_file(path: &Path) -> Result<Map<String, Value>, SourceError> {
    let content = std::fs::read_to_string(path).map_err(|source| SourceError::JsonIo {
        path: path.to_path_buf(),
        source,
    })?;
    let map = parse_json_object(path, &content)?;
    tracing::info!(
        target: "items",
        keys = map.len(),
        size_bytes = content.len(),
        "json_source_loaded"
    );
    Ok(map)
}
