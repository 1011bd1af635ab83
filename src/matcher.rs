//! Pattern compilation.
//!
//! Wraps a compiled [`Regex`] with the two operations the search needs:
//! testing a string and listing every non-overlapping match span.
//! Case-insensitivity is applied by prefixing the pattern with the inline
//! `(?i)` flag, so callers can still scope their own `(?i)` groups.
//!
//! Substitution over whole files runs on raw bytes, so a file that is not
//! valid UTF-8 keeps every byte outside the matches.

use std::borrow::Cow;

use regex::{Regex, bytes};
use serde::Serialize;

use crate::error::{FindError, Result};

/// Byte range of one match within a line, end exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

/// A compiled name or content pattern.
#[derive(Debug, Clone)]
pub struct Matcher {
    regex: Regex,
    bytes: bytes::Regex,
}

impl Matcher {
    /// Compiles `pattern`, optionally case-insensitive.
    ///
    /// The pattern is validated as written before the `(?i)` prefix is
    /// added, so the error always refers to the user's own text.
    pub fn compile(pattern: &str, ignore_case: bool) -> Result<Self> {
        let invalid = |source| FindError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        };
        let mut regex = Regex::new(pattern).map_err(invalid)?;
        if ignore_case {
            regex = Regex::new(&format!("(?i){pattern}")).map_err(invalid)?;
        }
        let bytes = bytes::Regex::new(regex.as_str()).map_err(invalid)?;
        Ok(Self { regex, bytes })
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    /// Returns every non-overlapping match in `text`, left to right.
    pub fn spans(&self, text: &str) -> Vec<Span> {
        self.regex
            .find_iter(text)
            .map(|m| Span {
                start: m.start(),
                end: m.end(),
            })
            .collect()
    }

    /// Replaces all matches in `text`, expanding `$1` / `${name}` references.
    ///
    /// Returns [`Cow::Borrowed`] when nothing matched.
    pub fn replace_all<'t>(&self, text: &'t str, replacement: &str) -> Cow<'t, str> {
        self.regex.replace_all(text, replacement)
    }

    /// Like [`Matcher::replace_all`], over bytes that need not be UTF-8.
    pub fn replace_all_bytes<'t>(&self, haystack: &'t [u8], replacement: &str) -> Cow<'t, [u8]> {
        self.bytes.replace_all(haystack, replacement.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_invalid_pattern() {
        let err = Matcher::compile("a(b", false).unwrap_err();
        assert!(matches!(err, FindError::InvalidPattern { ref pattern, .. } if pattern == "a(b"));
    }

    #[test]
    fn case_sensitive_by_default() {
        let m = Matcher::compile("todo", false).unwrap();
        assert!(m.is_match("a todo item"));
        assert!(!m.is_match("a TODO item"));
    }

    #[test]
    fn ignore_case_prefixes_inline_flag() {
        let m = Matcher::compile("todo", true).unwrap();
        assert_eq!(m.as_str(), "(?i)todo");
        assert!(m.is_match("a ToDo item"));
    }

    #[test]
    fn inline_flag_in_pattern_composes() {
        let m = Matcher::compile("(?i:read)ME", false).unwrap();
        assert!(m.is_match("ReadME"));
        assert!(!m.is_match("ReadMe"));
    }

    #[test]
    fn spans_are_non_overlapping() {
        let m = Matcher::compile("aa", false).unwrap();
        assert_eq!(
            m.spans("aaaaa"),
            vec![Span { start: 0, end: 2 }, Span { start: 2, end: 4 }]
        );
    }

    #[test]
    fn replace_expands_capture_groups() {
        let m = Matcher::compile(r"(\w+)\.txt$", false).unwrap();
        assert_eq!(m.replace_all("notes.txt", "${1}.md"), "notes.md");
    }

    #[test]
    fn replace_without_match_borrows() {
        let m = Matcher::compile("zzz", false).unwrap();
        assert!(matches!(m.replace_all("abc", "x"), Cow::Borrowed("abc")));
    }

    #[test]
    fn byte_replace_keeps_invalid_utf8() {
        let m = Matcher::compile("todo", true).unwrap();
        let out = m.replace_all_bytes(b"caf\xe9 TODO\n", "DONE");
        assert_eq!(&*out, b"caf\xe9 DONE\n");
    }

    #[test]
    fn byte_replace_expands_named_groups() {
        let m = Matcher::compile(r"v(?P<major>\d)", false).unwrap();
        let out = m.replace_all_bytes(b"\xffv1", "release-${major}");
        assert_eq!(&*out, b"\xffrelease-1");
    }
}
