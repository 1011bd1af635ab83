//! Per-node decisions.
//!
//! The [`ActionEngine`] is the [`Visitor`] driven by the walker. For each
//! node it decides whether the node is a result, prints it, and records
//! what a later rename or rewrite would touch. Nothing on disk changes
//! here; all state lands in the [`Accumulator`] returned by
//! [`ActionEngine::finish`].
//!
//! With only a name pattern, any node (file or directory) whose base name
//! matches is a result. With a content pattern, only non-directories are
//! scanned, and a name pattern, if present, must match first.

use std::io::Write;
use std::path::{Component, Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use crate::error::{FindError, Result};
use crate::matcher::Matcher;
use crate::mutator::RenamePlan;
use crate::options::{CompiledPatterns, SearchOptions};
use crate::output;
use crate::scanner::{self, LineMatch};
use crate::walker::{Node, Visitor};

/// A node that qualified as a result.
#[derive(Debug, Clone, Serialize)]
pub struct MatchCandidate {
    pub path: PathBuf,
    /// Path as printed: absolute or relative to the working directory.
    pub display: String,
    /// Matching lines in content mode; empty for name matches.
    pub lines: Vec<LineMatch>,
}

/// Everything discovered during one walk.
#[derive(Debug, Default)]
pub struct Accumulator {
    /// One per name match, or one per matching line in content mode.
    pub results: usize,
    pub matches: Vec<MatchCandidate>,
    pub renames: RenamePlan,
    /// Files eligible for content replacement, in visit order.
    pub content_targets: Vec<PathBuf>,
    /// Per-node failures that did not stop the walk.
    pub errors: Vec<FindError>,
}

/// Evaluates nodes against the compiled patterns and writes results to `out`.
pub struct ActionEngine<'a, W> {
    options: &'a SearchOptions,
    patterns: &'a CompiledPatterns,
    out: W,
    acc: Accumulator,
}

impl<'a, W: Write> ActionEngine<'a, W> {
    pub fn new(options: &'a SearchOptions, patterns: &'a CompiledPatterns, out: W) -> Self {
        Self {
            options,
            patterns,
            out,
            acc: Accumulator::default(),
        }
    }

    pub fn finish(self) -> Accumulator {
        self.acc
    }

    fn by_name(&mut self, node: &Node, name: &Matcher) -> Result<()> {
        let base = node.base_name();
        if !name.is_match(&base) {
            return Ok(());
        }
        self.acc.results += 1;

        let (absolute, display) = self.locate(node)?;
        match self.options.replace.as_deref() {
            Some(replacement) => {
                let new_name = name.replace_all(&base, replacement);
                let target = match absolute.parent() {
                    Some(dir) => dir.join(&*new_name),
                    None => PathBuf::from(new_name.into_owned()),
                };
                if !self.options.force {
                    output::rename_preview(&mut self.out, &absolute, &target)?;
                }
                self.acc.renames.insert(absolute.clone(), target);
            }
            None => output::path_line(&mut self.out, &display)?,
        }

        self.acc.matches.push(MatchCandidate {
            path: absolute,
            display,
            lines: Vec::new(),
        });
        Ok(())
    }

    fn by_content(&mut self, node: &Node, content: &Matcher) -> Result<()> {
        if node.is_dir {
            return Ok(());
        }
        if let Some(name) = &self.patterns.name {
            if !name.is_match(&node.base_name()) {
                return Ok(());
            }
        }

        let (absolute, display) = self.locate(node)?;
        let lines = match scanner::scan_file(&absolute, content) {
            Ok(lines) => lines,
            Err(err) if err.is_per_entry() => {
                debug!(%err, "skipping unreadable file");
                self.acc.errors.push(err);
                return Ok(());
            }
            Err(err) => return Err(err),
        };
        self.acc.content_targets.push(absolute.clone());

        if lines.is_empty() {
            return Ok(());
        }
        self.acc.results += lines.len();
        output::file_header(&mut self.out, &display)?;
        for line in &lines {
            output::match_line(&mut self.out, line)?;
        }

        self.acc.matches.push(MatchCandidate {
            path: absolute,
            display,
            lines,
        });
        Ok(())
    }

    /// Returns the node's absolute path and the path to print for it.
    fn locate(&self, node: &Node) -> Result<(PathBuf, String)> {
        let absolute =
            std::path::absolute(&node.path).map_err(|e| FindError::entry("resolve", &node.path, e))?;
        let shown = if self.options.absolute_paths {
            clean(&absolute)
        } else {
            clean(&node.path)
        };
        Ok((absolute, shown.display().to_string()))
    }
}

impl<W: Write> Visitor for ActionEngine<'_, W> {
    fn visit(&mut self, node: &Node) -> Result<()> {
        let patterns = self.patterns;
        match (&patterns.name, &patterns.content) {
            (_, Some(content)) => self.by_content(node, content),
            (Some(name), None) => self.by_name(node, name),
            (None, None) => Err(FindError::MissingCriteria),
        }
    }

    fn skipped(&mut self, error: FindError) {
        self.acc.errors.push(error);
    }
}

/// Lexically normalises a path: drops `.` segments and folds `dir/..`.
fn clean(path: &Path) -> PathBuf {
    let mut parts: Vec<Component<'_>> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => parts.push(component),
            },
            other => parts.push(other),
        }
    }

    if parts.is_empty() {
        return PathBuf::from(".");
    }
    parts.iter().collect()
}
