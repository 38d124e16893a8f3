//! Command-line interface definition using clap.

use clap::Parser;
use standup_core::{DEFAULT_SETTINGS_FILE, MAX_TIMEOUT_SECS};
use standup_models::RunDirectives;
use std::time::Duration;

/// `--version` text, e.g. `standup 0.1.0 (3f2c9ab, 2026-10-18)`.
const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("STANDUP_GIT_HASH"),
    ", ",
    env!("STANDUP_BUILD_DATE"),
    ")"
);

/// Morning stand-up meeting name randomizer
#[derive(Parser, Debug)]
#[command(name = "standup")]
#[command(author, version = VERSION, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Include anyone listed as the boss attendee type in the list
    #[arg(short = 'b', long = "withboss")]
    pub with_boss: bool,

    /// Include anyone listed as the sometimes attendee type in the list
    #[arg(short = 's', long = "withsometimes")]
    pub with_sometimes: bool,

    /// Add guest(s) to the meeting, comma separated
    #[arg(
        short = 'g',
        long = "addguest",
        value_name = "NAMES",
        value_delimiter = ',',
        action = clap::ArgAction::Append
    )]
    pub guests: Vec<String>,

    /// Exclude regular member(s) from this meeting
    #[arg(
        short = 'r',
        long = "exclude",
        value_name = "NAME",
        num_args = 1..,
        action = clap::ArgAction::Append
    )]
    pub exclude: Vec<String>,

    /// Settings file for this run
    #[arg(
        short = 'c',
        long = "configfile",
        env = "STANDUP_CONFIG",
        default_value = DEFAULT_SETTINGS_FILE
    )]
    pub config_file: String,

    /// Request timeout in seconds (overrides the settings file)
    #[arg(
        short,
        long,
        value_name = "SECS",
        value_parser = clap::value_parser!(u64).range(1..=MAX_TIMEOUT_SECS)
    )]
    pub timeout: Option<u64>,

    /// Print one order and exit without asking to go again
    #[arg(long)]
    pub once: bool,
}

impl Cli {
    /// Builds today's directives from the parsed flags.
    pub fn directives(&self) -> RunDirectives {
        RunDirectives::builder()
            .with_boss(self.with_boss)
            .with_sometimes(self.with_sometimes)
            .guests(self.guests.iter().cloned())
            .excluding(self.exclude.iter().cloned())
            .build()
    }

    /// Returns the timeout override, if any.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout.map(Duration::from_secs)
    }

    /// Returns the log level based on verbosity.
    pub fn log_level(&self) -> tracing::Level {
        match self.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    }
}
