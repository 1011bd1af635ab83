//! Human-readable rendering.
//!
//! Every line the tool prints goes through here so the colour scheme stays
//! in one place: cyan for headers, arrows and the summary, yellow for line
//! numbers and prompts, green for matched text and new paths, red for the
//! paths being replaced.

use std::fmt::Display;
use std::io::{self, Write};
use std::path::Path;

use colored::Colorize;

use crate::scanner::LineMatch;

/// A name match without replacement.
pub fn path_line(out: &mut impl Write, display: &str) -> io::Result<()> {
    writeln!(out, "{display}")
}

/// Header printed once before the first matching line of a file.
pub fn file_header(out: &mut impl Write, display: &str) -> io::Result<()> {
    writeln!(out, "{}", format!("{display}:").cyan())
}

/// `<line>:` followed by the line text with each match highlighted.
pub fn match_line(out: &mut impl Write, line: &LineMatch) -> io::Result<()> {
    write!(out, "{}", format!("{}:", line.line_number).yellow())?;
    let mut location = 0;
    for span in &line.spans {
        write!(out, "{}", &line.text[location..span.start])?;
        write!(out, "{}", line.text[span.start..span.end].green())?;
        location = span.end;
    }
    writeln!(out, "{}", &line.text[location..])
}

/// A pending rename, shown before the confirmation prompt.
pub fn rename_preview(out: &mut impl Write, from: &Path, to: &Path) -> io::Result<()> {
    writeln!(out, "{}{}{}", from.display(), " => ".cyan(), to.display())
}

/// A completed rename.
pub fn renamed(out: &mut impl Write, from: &Path, to: &Path) -> io::Result<()> {
    writeln!(
        out,
        "{}{}{}",
        from.display().to_string().red(),
        " => ".cyan(),
        to.display().to_string().green()
    )
}

/// A file whose content was rewritten.
pub fn written(out: &mut impl Write, path: &Path) -> io::Result<()> {
    writeln!(out, "{}", path.display().to_string().green())
}

pub fn summary(out: &mut impl Write, results: usize) -> io::Result<()> {
    writeln!(out, "{}", format!("Number of results: {results}").cyan())
}

pub fn declined(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "{}", "No".red())
}

pub fn prompt(out: &mut impl Write, question: &str) -> io::Result<()> {
    write!(out, "{} ", question.yellow())?;
    out.flush()
}

pub fn warning(out: &mut impl Write, message: impl Display) -> io::Result<()> {
    writeln!(out, "{} {}", "warn:".yellow().bold(), message)
}

pub fn version(out: &mut impl Write, version: &str) -> io::Result<()> {
    writeln!(out, "{}", format!("version: {version}").cyan())
}
