//! Line-oriented content scanning.
//!
//! Reads a whole file, splits it on `\n`, and reports each line that
//! matches the content pattern together with the byte spans of every match
//! in that line. Invalid UTF-8 is replaced rather than rejected.

use std::path::Path;

use serde::Serialize;

use crate::error::{FindError, Result};
use crate::matcher::{Matcher, Span};

/// A matching line within a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineMatch {
    /// Line number, 1-indexed.
    pub line_number: usize,
    /// Line text without the trailing newline.
    pub text: String,
    /// Byte spans of each match within `text`.
    pub spans: Vec<Span>,
}

/// Reads `path` and scans its lines for `matcher`.
///
/// The file is fully read and closed before scanning starts.
pub fn scan_file(path: &Path, matcher: &Matcher) -> Result<Vec<LineMatch>> {
    let text = read_text(path)?;
    Ok(scan_text(&text, matcher))
}

/// Scans already-loaded text. A `\r` before `\n` stays part of the line.
pub fn scan_text(text: &str, matcher: &Matcher) -> Vec<LineMatch> {
    text.split('\n')
        .enumerate()
        .filter_map(|(index, line)| {
            let spans = matcher.spans(line);
            if spans.is_empty() {
                return None;
            }
            Some(LineMatch {
                line_number: index + 1,
                text: line.to_string(),
                spans,
            })
        })
        .collect()
}

/// Reads a file as text, replacing invalid UTF-8 sequences.
pub fn read_text(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).map_err(|e| FindError::entry("read", path, e))?;
    Ok(match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
    })
}
