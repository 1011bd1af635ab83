//! Yes/no confirmation before destructive operations.
//!
//! The gate is asked once per run for the whole candidate batch. Answers
//! are read through a [`LineSource`], so an interactive terminal, a piped
//! stdin, and a scripted test all go through the same loop. Unrecognised
//! answers re-prompt up to a fixed number of attempts; end of input counts
//! as "no".

use std::io::{self, BufRead, IsTerminal, Write};

use dialoguer::Input;

use crate::error::{FindError, Result};
use crate::output;

pub const QUESTION: &str = "Are you sure? [Yes/No]";
pub const YES_ALIASES: &[&str] = &["Yes", "Y", "y"];
pub const NO_ALIASES: &[&str] = &["No", "N", "n"];
pub const DEFAULT_ATTEMPTS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    Yes,
    No,
}

/// Supplies one line of input per prompt.
pub trait LineSource {
    /// Shows `prompt` and returns the next line, or `None` at end of input.
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>>;
}

/// A single question with its accepted answers.
#[derive(Debug, Clone)]
pub struct Gate<'a> {
    question: &'a str,
    yes: &'a [&'a str],
    no: &'a [&'a str],
    max_attempts: usize,
}

impl Default for Gate<'_> {
    fn default() -> Self {
        Self::new(QUESTION, YES_ALIASES, NO_ALIASES)
    }
}

impl<'a> Gate<'a> {
    pub fn new(question: &'a str, yes: &'a [&'a str], no: &'a [&'a str]) -> Self {
        Self {
            question,
            yes,
            no,
            max_attempts: DEFAULT_ATTEMPTS,
        }
    }

    pub fn with_max_attempts(mut self, attempts: usize) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }

    /// Prompts until an answer matches one of the alias sets.
    ///
    /// Only the first whitespace-separated token of each line is compared,
    /// case-sensitively.
    pub fn ask(&self, source: &mut dyn LineSource) -> Result<Answer> {
        for _ in 0..self.max_attempts {
            let Some(line) = source.read_line(self.question).map_err(FindError::Prompt)? else {
                return Ok(Answer::No);
            };
            let token = line.split_whitespace().next().unwrap_or("");
            if self.yes.contains(&token) {
                return Ok(Answer::Yes);
            }
            if self.no.contains(&token) {
                return Ok(Answer::No);
            }
        }

        Err(FindError::PromptExhausted {
            attempts: self.max_attempts,
        })
    }
}

/// Reads answers from any buffered reader, echoing prompts to `prompt_out`.
pub struct ReaderSource<R, W> {
    reader: R,
    prompt_out: W,
}

impl<R: BufRead, W: Write> ReaderSource<R, W> {
    pub fn new(reader: R, prompt_out: W) -> Self {
        Self { reader, prompt_out }
    }
}

impl<R: BufRead, W: Write> LineSource for ReaderSource<R, W> {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        output::prompt(&mut self.prompt_out, prompt)?;
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }
}

/// Reads answers interactively from the terminal.
pub struct TerminalSource;

impl LineSource for TerminalSource {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
            .map(Some)
            .map_err(io::Error::other)
    }
}

/// Picks the terminal prompt when stdin is a TTY and a plain reader otherwise.
pub fn stdin_source() -> Box<dyn LineSource> {
    if io::stdin().is_terminal() {
        Box::new(TerminalSource)
    } else {
        Box::new(ReaderSource::new(io::stdin().lock(), io::stdout()))
    }
}
