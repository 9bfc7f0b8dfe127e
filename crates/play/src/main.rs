//! Terminal chess against the random opponent.
//!
//! Usage:
//!   play [config.toml]
//!
//! Settings come from the given file, or `chess.toml` in the working
//! directory when present. `RUST_LOG` overrides the configured log filter.

mod commands;
mod config;
mod error;
mod session;

#[cfg(test)]
mod session_tests;

use std::env;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use random_engine::RandomEngine;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::commands::Command;
use crate::config::{DEFAULT_CONFIG_PATH, PlayConfig};
use crate::error::PlayError;
use crate::session::{Flow, Session};

fn main() -> ExitCode {
    let path = env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
    let config = match PlayConfig::load(&path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };
    init_logging(&config.log);

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "session aborted");
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr so they never interleave with the board on stdout.
fn init_logging(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(config: &PlayConfig) -> Result<(), PlayError> {
    let engine = match config.seed {
        Some(seed) => RandomEngine::seeded(seed),
        None => RandomEngine::new(),
    };
    info!(
        human = %config.human_side,
        king_safety = config.king_safety,
        seed = ?config.seed,
        "session started"
    );

    let mut session = Session::new(config, Box::new(engine));
    let mut stdout = io::stdout().lock();
    session.start(&mut stdout)?;
    prompt(&mut stdout)?;

    for line in io::stdin().lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            prompt(&mut stdout)?;
            continue;
        }
        let flow = match line.parse::<Command>() {
            Ok(cmd) => session.handle(cmd, &mut stdout)?,
            Err(e) => {
                writeln!(stdout, "{e}")?;
                Flow::Continue
            }
        };
        if flow == Flow::Quit {
            break;
        }
        prompt(&mut stdout)?;
    }

    info!(plies = session.game().history().len(), "session ended");
    Ok(())
}

fn prompt(out: &mut impl Write) -> io::Result<()> {
    write!(out, "> ")?;
    out.flush()
}
