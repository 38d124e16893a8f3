//! Interactive session loop.
//!
//! Each cycle filters the roster, fetches a fresh order, prints it numbered,
//! and asks whether to go again.

use std::io::{self, Write};

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use standup_core::{todays_order, PermutationSource};
use standup_models::{Member, RunDirectives};
use tracing::{debug, warn};

/// Banner printed at startup.
pub const BANNER: &str = "Morning Stand-Up Meeting Name Randomizer";

/// Prompt shown after each order.
pub const AGAIN_PROMPT: &str = "Again? y/[N] >";

/// Source of answers to the "again?" prompt.
pub trait Prompt {
    /// Shows `prompt` and returns the answer, or `None` if input ended.
    fn ask(&mut self, prompt: &str) -> Option<String>;
}

impl Prompt for DefaultEditor {
    fn ask(&mut self, prompt: &str) -> Option<String> {
        match self.readline(prompt) {
            Ok(line) => Some(line),
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => None,
            Err(err) => {
                warn!(error = %err, "Failed to read answer");
                None
            }
        }
    }
}

/// Returns true if the answer asks for another order.
///
/// Only `y` (any case, surrounding whitespace ignored) counts.
pub fn wants_again(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("y")
}

/// Renders an order as numbered lines, starting at 1.
pub fn render_order(order: &[String]) -> String {
    order
        .iter()
        .enumerate()
        .map(|(i, name)| format!("{}. {}\n", i + 1, name))
        .collect()
}

/// Writes `order` numbered, or a note when nobody is eligible.
pub fn print_order<W: Write>(out: &mut W, order: &[String]) -> io::Result<()> {
    if order.is_empty() {
        writeln!(out, "No attendees for today.")
    } else {
        write!(out, "{}", render_order(order))
    }
}

/// A stand-up session: fixed roster and directives, one permutation source.
pub struct Session<S> {
    roster: Vec<Member>,
    directives: RunDirectives,
    source: S,
}

impl<S: PermutationSource> Session<S> {
    /// Creates a new session.
    pub fn new(roster: Vec<Member>, directives: RunDirectives, source: S) -> Self {
        Self {
            roster,
            directives,
            source,
        }
    }

    /// Produces today's order.
    pub fn generate(&self) -> standup_core::Result<Vec<String>> {
        todays_order(&self.roster, &self.directives, &self.source)
    }

    /// Runs one cycle: the order goes to `out`, a failure goes to `err`.
    ///
    /// A failed cycle is logged and does not end the session. Returns
    /// whether an order was printed.
    pub fn run_cycle<W: Write, E: Write>(&self, out: &mut W, err: &mut E) -> io::Result<bool> {
        match self.generate() {
            Ok(order) => {
                print_order(out, &order)?;
                Ok(true)
            }
            Err(e) => {
                warn!(error = %e, "Failed to generate today's order");
                writeln!(err, "Error: {}", e)?;
                Ok(false)
            }
        }
    }

    /// Runs cycles until the answer to [`AGAIN_PROMPT`] is not `y`.
    ///
    /// Returns the number of cycles run.
    pub fn run<P, W, E>(&self, prompt: &mut P, out: &mut W, err: &mut E) -> io::Result<usize>
    where
        P: Prompt,
        W: Write,
        E: Write,
    {
        let mut cycles = 0;
        loop {
            self.run_cycle(out, err)?;
            out.flush()?;
            err.flush()?;
            cycles += 1;

            let answer = prompt.ask(AGAIN_PROMPT);
            debug!(?answer, cycles, "Again?");
            match answer {
                Some(answer) if wants_again(&answer) => continue,
                _ => break,
            }
        }
        Ok(cycles)
    }
}
