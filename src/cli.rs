//! Command-line interface definitions.
//!
//! The root command searches; the only subcommand prints the version.
//! Required-flag checks are left to [`SearchOptions::validate`] so that a
//! missing path or pattern exits with the same status as any other
//! invalid input.

use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

use nfind::SearchOptions;

/// Find files and folders by name or content.
#[derive(Debug, Parser)]
#[command(author, version, about, args_conflicts_with_subcommands = true)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub search: SearchArgs,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print the version number.
    Version,
}

#[derive(Debug, ClapArgs)]
pub struct SearchArgs {
    /// Directory or file to search.
    #[arg(short, long)]
    pub path: Option<PathBuf>,

    /// Regular expression matched against file and directory names.
    /// Filters which files are scanned when --content is also given.
    #[arg(short, long)]
    pub name: Option<String>,

    /// Regular expression matched against each line of file content.
    #[arg(short, long)]
    pub content: Option<String>,

    /// Replace matched parts with this text. Supports `$1` and `${name}` references.
    #[arg(short, long)]
    pub replace: Option<String>,

    /// Ignore case in all patterns. Prefix a single pattern with `(?i)` to scope it.
    #[arg(short, long)]
    pub ignore_case: bool,

    /// Print absolute paths in results.
    #[arg(short, long)]
    pub absolute_paths: bool,

    /// Apply replacements without asking for confirmation.
    #[arg(short = 'f', long)]
    pub force_replace: bool,

    /// Fail on the first entry that cannot be traversed instead of skipping it.
    #[arg(long)]
    pub strict: bool,

    /// Emit results as JSON instead of human-readable output.
    #[arg(long, conflicts_with = "replace")]
    pub json: bool,

    /// Print debug diagnostics to stderr.
    #[arg(short, long)]
    pub verbose: bool,

    /// Disable colored output.
    #[arg(long)]
    pub no_color: bool,
}

impl SearchArgs {
    pub fn to_options(&self) -> SearchOptions {
        SearchOptions {
            path: self.path.clone().unwrap_or_default(),
            name: self.name.clone(),
            content: self.content.clone(),
            replace: self.replace.clone(),
            ignore_case: self.ignore_case,
            absolute_paths: self.absolute_paths,
            force: self.force_replace,
            strict: self.strict,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn definition_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn parses_short_flags() {
        let args = Args::try_parse_from([
            "nfind", "-p", "./project", "-n", r"\.tmp$", "-r", "", "-i", "-a", "-f",
        ])
        .unwrap();
        let options = args.search.to_options();
        assert_eq!(options.path, PathBuf::from("./project"));
        assert_eq!(options.name.as_deref(), Some(r"\.tmp$"));
        assert_eq!(options.replace.as_deref(), Some(""));
        assert!(options.ignore_case && options.absolute_paths && options.force);
        assert!(args.command.is_none());
    }

    #[test]
    fn missing_path_is_left_to_validation() {
        let args = Args::try_parse_from(["nfind", "--content", "TODO"]).unwrap();
        assert!(args.search.to_options().validate().is_err());
    }

    #[test]
    fn json_conflicts_with_replace() {
        let err = Args::try_parse_from(["nfind", "-p", ".", "-n", "x", "-r", "y", "--json"]);
        assert!(err.is_err());
    }

    #[test]
    fn version_subcommand() {
        let args = Args::try_parse_from(["nfind", "version"]).unwrap();
        assert!(matches!(args.command, Some(Commands::Version)));
    }
}
