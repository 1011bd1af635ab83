//! nfind: find files and folders by name or content, and rename or rewrite them.
//!
//! Walks a directory tree, prints every entry whose name matches `--name`
//! or every line matching `--content`, and with `--replace` renames the
//! matching entries or rewrites the matching files after one confirmation.

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use std::io;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use cli::{Args, Commands};
use nfind::{confirm, output};

fn main() {
    let args = Args::parse();
    init_tracing(args.search.verbose, args.search.no_color);

    if let Err(err) = run(args) {
        eprintln!("{} {:#}", "error:".red().bold(), err);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool, no_color: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose { "warn,nfind=debug" } else { "warn" })
    });
    let use_ansi = !no_color && std::env::var_os("NO_COLOR").is_none();

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_ansi(use_ansi)
                .with_writer(io::stderr),
        )
        .with(filter)
        .init();
}

fn run(args: Args) -> Result<()> {
    if args.search.no_color {
        colored::control::set_override(false);
    }

    if let Some(Commands::Version) = args.command {
        output::version(&mut io::stdout(), env!("CARGO_PKG_VERSION"))?;
        return Ok(());
    }

    let options = args.search.to_options();
    let mut input = confirm::stdin_source();
    let mut stderr = io::stderr();

    if args.search.json {
        let outcome = nfind::run(&options, input.as_mut(), &mut io::sink(), &mut stderr)?;
        let json =
            serde_json::to_string_pretty(&outcome.report()).context("Failed to serialize results")?;
        println!("{json}");
        return Ok(());
    }

    let outcome = nfind::run(&options, input.as_mut(), &mut io::stdout(), &mut stderr)?;
    if let Some(report) = &outcome.mutation {
        tracing::debug!(
            succeeded = report.succeeded,
            unchanged = report.unchanged,
            failed = report.failed.len(),
            "mutation finished"
        );
    }

    Ok(())
}
