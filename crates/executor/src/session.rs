//! Session dispatch.
//!
//! A [`Session`] owns a shared handle to one [`Store`] and executes parsed
//! commands against it. The store does the work; the session only maps
//! commands to store calls and store results to [`Output`]s.

use std::sync::Arc;

use tally_engine::Store;
use tracing::warn;

use crate::{Command, Output, Result};

/// Outcome of feeding one raw input line to a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    /// Print nothing, keep reading.
    Silent,
    /// Print this line, keep reading.
    Print(String),
    /// END was read; stop the loop.
    Terminate,
}

/// Executes commands against a shared [`Store`].
///
/// Clone is cheap (Arc clone); sessions sharing a store see the same data
/// and the same transaction stack.
#[derive(Debug, Clone)]
pub struct Session {
    store: Arc<Store>,
}

impl Session {
    /// Create a session over `store`.
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// The underlying store handle.
    pub fn store(&self) -> &Arc<Store> {
        &self.store
    }

    /// Execute one parsed command.
    ///
    /// # Errors
    ///
    /// [`Error::NoTransaction`] from ROLLBACK/COMMIT on an empty stack;
    /// the store state is unchanged and the session stays usable.
    ///
    /// [`Error::NoTransaction`]: crate::Error::NoTransaction
    pub fn execute(&self, command: Command) -> Result<Output> {
        match command {
            Command::Set { name, value } => {
                self.store.set(&name, &value);
                Ok(Output::Unit)
            }
            Command::Get { name } => Ok(match self.store.get(&name) {
                Some(value) => Output::Value(value),
                None => Output::Null,
            }),
            Command::Unset { name } => {
                self.store.unset(&name);
                Ok(Output::Unit)
            }
            Command::NumEqualTo { value } => {
                Ok(Output::Count(self.store.num_equal_to(&value)))
            }
            Command::Begin => {
                self.store.begin();
                Ok(Output::Unit)
            }
            Command::Rollback => {
                self.store.rollback()?;
                Ok(Output::Unit)
            }
            Command::Commit => {
                self.store.commit()?;
                Ok(Output::Unit)
            }
            Command::End => Ok(Output::End),
        }
    }

    /// Parse and execute one raw input line.
    ///
    /// Errors never escape: both error conditions render as their status
    /// line (`NO TRANSACTION`, `Invalid command`) and the loop continues.
    pub fn eval_line(&self, line: &str) -> LineOutcome {
        let command = match Command::parse(line) {
            Ok(Some(command)) => command,
            Ok(None) => return LineOutcome::Silent,
            Err(err) => {
                warn!(line, "rejected input line");
                return LineOutcome::Print(err.to_string());
            }
        };
        match self.execute(command) {
            Ok(Output::End) => LineOutcome::Terminate,
            Ok(output) => match output.render() {
                Some(text) => LineOutcome::Print(text),
                None => LineOutcome::Silent,
            },
            Err(err) => LineOutcome::Print(err.to_string()),
        }
    }
}
