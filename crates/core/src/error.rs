//! Error taxonomy.
//!
//! Exactly two conditions exist:
//!
//! - [`Error::NoTransaction`]: ROLLBACK or COMMIT with no open frame. The
//!   store state is left unchanged and the session continues.
//! - [`Error::InvalidCommand`]: a malformed input line (bad arity or an
//!   unrecognized verb). The input loop continues.
//!
//! GET on an unbound name and UNSET on an unbound name are defined
//! behaviors (a NULL read and a no-op), not errors.

use thiserror::Error;

/// Errors surfaced by the store and the command layer.
///
/// The `Display` output of each variant is the exact status line the
/// command surface prints for it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// ROLLBACK or COMMIT was invoked with no open transaction.
    #[error("NO TRANSACTION")]
    NoTransaction,

    /// An input line with bad arity or an unrecognized verb.
    #[error("Invalid command")]
    InvalidCommand {
        /// The offending input line, verbatim.
        line: String,
    },
}

impl Error {
    /// Build an [`Error::InvalidCommand`] carrying the rejected line.
    pub fn invalid_command(line: impl Into<String>) -> Self {
        Error::InvalidCommand { line: line.into() }
    }
}

/// Result alias used across tally crates.
pub type Result<T> = std::result::Result<T, Error>;
