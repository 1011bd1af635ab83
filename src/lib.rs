//! nfind library for finding files by name or content and changing them in place.
//!
//! A run proceeds in three phases:
//!
//! 1. **Walking**: visit the root and every descendant, children before parents
//! 2. **Matching**: test base names and file lines, collecting rename and rewrite candidates
//! 3. **Mutating**: after one confirmation (or none, when forced), rename entries or rewrite files
//!
//! Nothing on disk changes until the walk is complete.
//!
//! # Example
//!
//! ```no_run
//! use nfind::{SearchOptions, confirm::ReaderSource, finder};
//! use std::io;
//!
//! let options = SearchOptions::new("./project").with_content("TODO");
//! let mut answers = ReaderSource::new(io::stdin().lock(), io::stdout());
//! let outcome = finder::run(&options, &mut answers, &mut io::stdout(), &mut io::stderr()).unwrap();
//!
//! println!("{} matching lines", outcome.results);
//! ```

pub mod confirm;
pub mod engine;
pub mod error;
pub mod finder;
pub mod matcher;
pub mod mutator;
pub mod options;
pub mod output;
pub mod scanner;
pub mod walker;

// Re-export commonly used types at crate root
pub use error::FindError;
pub use finder::{Outcome, run};
pub use matcher::{Matcher, Span};
pub use options::SearchOptions;
pub use scanner::LineMatch;
