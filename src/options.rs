//! Search configuration.
//!
//! [`SearchOptions`] is built once from the command line and validated
//! before any traversal starts. Each visited node sees the same options;
//! only the node's own path varies, and that is carried by the walker.

use std::path::PathBuf;

use crate::error::{FindError, Result};
use crate::matcher::Matcher;

/// Everything a single invocation needs to know about what to find and change.
#[derive(Debug, Clone, Default)]
pub struct SearchOptions {
    /// Root directory or file to search.
    pub path: PathBuf,
    /// Pattern matched against each node's base name.
    pub name: Option<String>,
    /// Pattern matched against each line of file content.
    pub content: Option<String>,
    /// Replacement text for whichever pattern drives the run.
    ///
    /// `Some("")` is a valid replacement that deletes the matched text.
    pub replace: Option<String>,
    pub ignore_case: bool,
    pub absolute_paths: bool,
    pub force: bool,
    /// Abort on the first per-node traversal error instead of continuing.
    pub strict: bool,
}

/// Which pattern decides whether a node is a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Name pattern only; replacements rename entries.
    Name,
    /// Content pattern, optionally filtered by name; replacements rewrite files.
    Content,
}

/// Patterns compiled once per invocation.
#[derive(Debug, Clone)]
pub struct CompiledPatterns {
    pub name: Option<Matcher>,
    pub content: Option<Matcher>,
}

impl SearchOptions {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    pub fn with_name(mut self, pattern: impl Into<String>) -> Self {
        self.name = Some(pattern.into());
        self
    }

    pub fn with_content(mut self, pattern: impl Into<String>) -> Self {
        self.content = Some(pattern.into());
        self
    }

    pub fn with_replace(mut self, replacement: impl Into<String>) -> Self {
        self.replace = Some(replacement.into());
        self
    }

    /// Checks the criteria invariants and compiles both patterns.
    ///
    /// Empty pattern strings count as absent.
    pub fn validate(&self) -> Result<CompiledPatterns> {
        if self.path.as_os_str().is_empty() {
            return Err(FindError::MissingPath);
        }
        let name = non_empty(self.name.as_deref());
        let content = non_empty(self.content.as_deref());
        if name.is_none() && content.is_none() {
            return Err(FindError::MissingCriteria);
        }

        Ok(CompiledPatterns {
            name: name
                .map(|p| Matcher::compile(p, self.ignore_case))
                .transpose()?,
            content: content
                .map(|p| Matcher::compile(p, self.ignore_case))
                .transpose()?,
        })
    }

    pub fn mode(&self) -> Mode {
        if non_empty(self.content.as_deref()).is_some() {
            Mode::Content
        } else {
            Mode::Name
        }
    }

    /// Returns `true` if a replacement must be confirmed before it runs.
    pub fn needs_confirmation(&self) -> bool {
        self.replace.is_some() && !self.force
    }
}

fn non_empty(pattern: Option<&str>) -> Option<&str> {
    pattern.filter(|p| !p.is_empty())
}
