//! Line-oriented shell for the transactional store.
//!
//! Reads one command per line (SET/GET/UNSET/NUMEQUALTO/BEGIN/ROLLBACK/
//! COMMIT/END) from stdin or a script file and prints each command's
//! output. An interactive terminal gets a prompt with history; piped
//! input is processed straight through. The session ends at END or end of
//! input.

use std::fs::File;
use std::io::{self, BufRead, BufReader, IsTerminal, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use rustyline::error::ReadlineError;
use tally_engine::Store;
use tally_executor::{LineOutcome, Session};

/// Transactional in-memory key/value shell.
#[derive(Debug, Parser)]
#[command(name = "tally", version, about)]
struct Args {
    /// Script of commands to run instead of reading stdin.
    script: Option<PathBuf>,

    /// Raise log verbosity (-v debug, -vv trace). Logs go to stderr.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let session = Session::new(Arc::new(Store::new()));

    match args.script {
        Some(path) => {
            let file =
                File::open(&path).with_context(|| format!("opening {}", path.display()))?;
            run_reader(&session, BufReader::new(file))
        }
        None if io::stdin().is_terminal() => run_interactive(&session),
        None => run_reader(&session, io::stdin().lock()),
    }
}

fn init_tracing(verbose: u8) {
    use tracing_subscriber::EnvFilter;

    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Drain a non-interactive source: a script file or piped stdin.
fn run_reader(session: &Session, reader: impl BufRead) -> Result<()> {
    let mut out = io::stdout().lock();
    for line in reader.lines() {
        let line = line.context("reading input")?;
        match session.eval_line(&line) {
            LineOutcome::Silent => {}
            LineOutcome::Print(text) => writeln!(out, "{text}")?,
            LineOutcome::Terminate => break,
        }
    }
    Ok(())
}

/// Prompted loop for a terminal, with history across sessions.
fn run_interactive(session: &Session) -> Result<()> {
    let mut editor = rustyline::DefaultEditor::new()?;
    let history = history_path();
    if let Some(ref path) = history {
        // Missing history file on first run is fine.
        let _ = editor.load_history(path);
    }

    loop {
        match editor.readline("tally> ") {
            Ok(line) => {
                let _ = editor.add_history_entry(line.as_str());
                match session.eval_line(&line) {
                    LineOutcome::Silent => {}
                    LineOutcome::Print(text) => println!("{text}"),
                    LineOutcome::Terminate => break,
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(err) => return Err(err).context("reading from terminal"),
        }
    }

    if let Some(ref path) = history {
        let _ = editor.save_history(path);
    }
    Ok(())
}

fn history_path() -> Option<PathBuf> {
    std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".tally_history"))
}
