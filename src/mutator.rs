//! Applying confirmed renames and content rewrites.
//!
//! Both operations work through their whole batch. A failure on one entry
//! is recorded in the [`MutationReport`] and the next entry is attempted;
//! only a failure to write progress output stops the batch.

use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use crate::error::{FindError, Result};
use crate::matcher::Matcher;
use crate::output;

/// One pending rename.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rename {
    pub from: PathBuf,
    pub to: PathBuf,
}

/// Pending renames keyed by source path, kept in discovery order.
///
/// Discovery order is post-order, so entries inside a directory are
/// renamed before the directory itself and their recorded paths stay valid.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RenamePlan {
    entries: Vec<Rename>,
    #[serde(skip)]
    index: HashMap<PathBuf, usize>,
}

impl RenamePlan {
    /// Records a rename. A second insert for the same source replaces the first.
    pub fn insert(&mut self, from: PathBuf, to: PathBuf) {
        if let Some(&i) = self.index.get(&from) {
            self.entries[i].to = to;
            return;
        }
        self.index.insert(from.clone(), self.entries.len());
        self.entries.push(Rename { from, to });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rename> {
        self.entries.iter()
    }

    pub fn get(&self, from: &Path) -> Option<&Path> {
        self.index.get(from).map(|&i| self.entries[i].to.as_path())
    }

    /// Destinations claimed by more than one source, in discovery order.
    pub fn conflicts(&self) -> Vec<FindError> {
        let mut order: Vec<&Path> = Vec::new();
        let mut by_target: HashMap<&Path, Vec<PathBuf>> = HashMap::new();
        for rename in &self.entries {
            by_target
                .entry(rename.to.as_path())
                .or_insert_with(|| {
                    order.push(rename.to.as_path());
                    Vec::new()
                })
                .push(rename.from.clone());
        }

        order
            .into_iter()
            .filter_map(|target| {
                let sources = by_target.remove(target)?;
                (sources.len() > 1).then(|| FindError::RenameConflict {
                    target: target.to_path_buf(),
                    sources,
                })
            })
            .collect()
    }
}

/// Outcome of a mutation batch.
#[derive(Debug, Default)]
pub struct MutationReport {
    pub succeeded: usize,
    pub unchanged: usize,
    pub failed: Vec<FindError>,
}

/// Renames every entry in `plan`, printing each success.
///
/// An entry whose destination already exists on disk is not renamed; it is
/// recorded as a failure so nothing outside the plan is replaced.
pub fn rename_all(plan: &RenamePlan, out: &mut impl Write) -> Result<MutationReport> {
    let mut report = MutationReport::default();

    for rename in plan.iter() {
        if rename.from != rename.to && fs::symlink_metadata(&rename.to).is_ok() {
            let err = io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("{} already exists", rename.to.display()),
            );
            report.failed.push(FindError::entry("rename", &rename.from, err));
            continue;
        }
        match fs::rename(&rename.from, &rename.to) {
            Ok(()) => {
                debug!(from = %rename.from.display(), to = %rename.to.display(), "renamed");
                output::renamed(out, &rename.from, &rename.to)?;
                report.succeeded += 1;
            }
            Err(err) => report
                .failed
                .push(FindError::entry("rename", &rename.from, err)),
        }
    }

    Ok(report)
}

/// Substitutes `replacement` for every match of `matcher` in each file.
///
/// The whole file text is substituted at once, so patterns may span lines.
/// Files without any match are left untouched.
pub fn replace_content(
    targets: &[PathBuf],
    matcher: &Matcher,
    replacement: &str,
    out: &mut impl Write,
) -> Result<MutationReport> {
    let mut report = MutationReport::default();

    for path in targets {
        match rewrite(path, matcher, replacement) {
            Ok(true) => {
                output::written(out, path)?;
                report.succeeded += 1;
            }
            Ok(false) => report.unchanged += 1,
            Err(err) => report.failed.push(err),
        }
    }

    Ok(report)
}

/// Rewrites one file, returning `false` if nothing matched.
///
/// Works on the raw bytes so content outside the matches is written back
/// exactly as read, valid UTF-8 or not.
fn rewrite(path: &Path, matcher: &Matcher, replacement: &str) -> Result<bool> {
    let permissions = fs::metadata(path)
        .map_err(|e| FindError::entry("stat", path, e))?
        .permissions();
    let original = fs::read(path).map_err(|e| FindError::entry("read", path, e))?;

    let replaced = matcher.replace_all_bytes(&original, replacement);
    if replaced[..] == original[..] {
        return Ok(false);
    }

    fs::write(path, &replaced).map_err(|e| FindError::entry("write", path, e))?;
    fs::set_permissions(path, permissions).map_err(|e| FindError::entry("write", path, e))?;
    debug!(path = %path.display(), "rewrote content");
    Ok(true)
}
