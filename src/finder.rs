//! One complete invocation: walk, report, confirm, mutate.
//!
//! [`run`] owns the ordering guarantees. The walk finishes and every
//! candidate is known before the gate is asked, and the gate is asked at
//! most once for the whole batch.

use std::io::Write;

use serde::Serialize;
use tracing::debug;

use crate::confirm::{Answer, Gate, LineSource};
use crate::engine::{ActionEngine, MatchCandidate};
use crate::error::{FindError, Result};
use crate::mutator::{self, MutationReport};
use crate::options::{Mode, SearchOptions};
use crate::output;
use crate::walker::{self, ErrorPolicy};

/// What happened during a run.
#[derive(Debug, Default)]
pub struct Outcome {
    pub results: usize,
    pub matches: Vec<MatchCandidate>,
    /// Per-node traversal and read failures.
    pub skipped: Vec<FindError>,
    /// Set when the gate was asked.
    pub answer: Option<Answer>,
    /// Set when a mutation batch ran.
    pub mutation: Option<MutationReport>,
}

/// Serializable summary of a search.
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub results: usize,
    pub matches: &'a [MatchCandidate],
    pub errors: Vec<String>,
}

impl Outcome {
    pub fn report(&self) -> Report<'_> {
        Report {
            results: self.results,
            matches: &self.matches,
            errors: self.skipped.iter().map(ToString::to_string).collect(),
        }
    }
}

/// Runs a search and any requested replacement.
///
/// Results and mutation progress go to `out`; per-entry warnings go to
/// `diag`. Answers for the confirmation gate come from `input`, which is
/// never read in force mode or when nothing matched.
pub fn run(
    options: &SearchOptions,
    input: &mut dyn LineSource,
    out: &mut impl Write,
    diag: &mut impl Write,
) -> Result<Outcome> {
    let patterns = options.validate()?;
    let policy = if options.strict {
        ErrorPolicy::Strict
    } else {
        ErrorPolicy::Continue
    };

    let mut engine = ActionEngine::new(options, &patterns, &mut *out);
    let visited = walker::walk(&options.path, policy, &mut engine)?;
    let acc = engine.finish();
    debug!(visited, results = acc.results, "walk finished");

    for error in &acc.errors {
        output::warning(diag, error)?;
    }
    output::summary(out, acc.results)?;

    let mut outcome = Outcome {
        results: acc.results,
        matches: acc.matches,
        skipped: acc.errors,
        ..Outcome::default()
    };

    let Some(replacement) = options.replace.as_deref() else {
        return Ok(outcome);
    };
    if acc.results == 0 {
        return Ok(outcome);
    }

    if options.mode() == Mode::Name {
        let mut conflicts = acc.renames.conflicts();
        if !conflicts.is_empty() {
            for conflict in conflicts.iter().skip(1) {
                output::warning(diag, conflict)?;
            }
            return Err(conflicts.swap_remove(0));
        }
    }

    if options.needs_confirmation() {
        let answer = Gate::default().ask(input)?;
        outcome.answer = Some(answer);
        if answer == Answer::No {
            output::declined(out)?;
            return Ok(outcome);
        }
    }

    let report = match (options.mode(), &patterns.content) {
        (Mode::Content, Some(content)) => {
            mutator::replace_content(&acc.content_targets, content, replacement, out)?
        }
        _ => mutator::rename_all(&acc.renames, out)?,
    };
    for error in &report.failed {
        output::warning(diag, error)?;
    }
    outcome.mutation = Some(report);

    Ok(outcome)
}
