//! Error types for search and mutation.
//!
//! Errors fall into two groups. Fatal errors (bad patterns, missing search
//! criteria, an unreadable root, rename conflicts) stop the run before or
//! instead of mutating anything. Per-entry errors belong to a single node
//! and are reported while the walk or mutation continues with the rest.

use std::io;
use std::path::{Path, PathBuf};

/// Errors produced while searching, confirming, or mutating.
#[derive(Debug, thiserror::Error)]
pub enum FindError {
    /// A name or content pattern is not a valid regular expression.
    #[error("invalid regular expression '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// No root path was given.
    #[error("path flag is required")]
    MissingPath,

    /// Neither a name nor a content pattern was given.
    #[error("name flag or content flag are required")]
    MissingCriteria,

    /// The root path does not exist or cannot be listed.
    #[error("could not read {}: {source}", path.display())]
    FileSystem {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A single node could not be stat'ed, read, renamed, or written.
    #[error("could not {action} {}: {source}", path.display())]
    Entry {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Two or more entries would be renamed to the same destination.
    #[error("{} entries would be renamed to {}", sources.len(), target.display())]
    RenameConflict {
        target: PathBuf,
        sources: Vec<PathBuf>,
    },

    /// The confirmation prompt could not obtain an answer.
    #[error("no valid answer after {attempts} attempts")]
    PromptExhausted { attempts: usize },

    /// Reading the confirmation answer failed.
    #[error("could not read answer: {0}")]
    Prompt(#[source] io::Error),

    /// Writing results to the output stream failed.
    #[error("could not write output: {0}")]
    Output(#[from] io::Error),
}

impl FindError {
    pub fn entry(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Entry {
            action,
            path: path.into(),
            source,
        }
    }

    pub fn file_system(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::FileSystem {
            path: path.into(),
            source,
        }
    }

    /// Returns `true` if this error concerns only one node and the run can continue.
    #[must_use]
    pub const fn is_per_entry(&self) -> bool {
        matches!(self, Self::Entry { .. })
    }

    /// Returns `true` if this error ends the run.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        !self.is_per_entry()
    }

    /// Returns the path associated with this error, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::FileSystem { path, .. } | Self::Entry { path, .. } => Some(path),
            Self::RenameConflict { target, .. } => Some(target),
            _ => None,
        }
    }
}

pub type Result<T, E = FindError> = std::result::Result<T, E>;
