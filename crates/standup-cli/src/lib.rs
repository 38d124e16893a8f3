//! Standup CLI library.
//!
//! This crate provides the command-line interface and the interactive
//! "again?" loop around the stand-up order pipeline.

pub mod cli;
pub mod session;

use std::io;
use std::path::PathBuf;

use rustyline::DefaultEditor;
use standup_core::{resolve_settings_path, RandomOrgClient, Settings};
use tracing::info;

use crate::cli::Cli;
use crate::session::{print_order, Session, BANNER};

/// Result type for CLI operations.
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Loads settings for this run: file lookup, then environment overrides.
pub fn load_settings(cli: &Cli) -> Result<(PathBuf, Settings)> {
    let path = resolve_settings_path(&cli.config_file)?;
    let settings = Settings::load(&path)?.with_env_overrides();
    Ok((path, settings))
}

/// Runs the application with parsed arguments.
///
/// Settings and client configuration problems are returned before any
/// order is generated. With `--once`, a failed order is returned as well.
pub fn run(cli: &Cli) -> Result<()> {
    println!("{}", BANNER);

    let (path, settings) = load_settings(cli)?;
    let client = RandomOrgClient::from_settings(&settings, cli.timeout())?;
    let directives = cli.directives();

    info!(
        settings = %path.display(),
        members = settings.roster().len(),
        include_boss = directives.include_boss(),
        include_sometimes = directives.include_sometimes(),
        guests = directives.guests().len(),
        excluded = directives.excluded().len(),
        "Starting session"
    );

    let session = Session::new(settings.roster().to_vec(), directives, client);
    let mut stdout = io::stdout();

    // A single order: its failure is the process failure.
    if cli.once {
        let order = session.generate()?;
        print_order(&mut stdout, &order)?;
        return Ok(());
    }

    let mut editor = DefaultEditor::new()?;
    session.run(&mut editor, &mut stdout, &mut io::stderr())?;
    Ok(())
}
