//! Command parsing.
//!
//! One command per input line. Lines are split on whitespace; the verb is
//! case-insensitive; arity is exact. A line that fits neither rule is an
//! [`Error::InvalidCommand`], which the input loop reports and moves past.

use tally_core::{Error, Result};

/// A parsed command from the line-oriented surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `SET name value`: bind `name` to `value`.
    Set {
        /// Name to bind.
        name: String,
        /// Value to bind it to.
        value: String,
    },
    /// `GET name`: read a binding.
    Get {
        /// Name to read.
        name: String,
    },
    /// `UNSET name`: remove a binding.
    Unset {
        /// Name to unbind.
        name: String,
    },
    /// `NUMEQUALTO value`: count names bound to `value`.
    NumEqualTo {
        /// Value to count bindings of.
        value: String,
    },
    /// `BEGIN`: open a transaction frame.
    Begin,
    /// `ROLLBACK`: undo the innermost open frame.
    Rollback,
    /// `COMMIT`: make all outstanding changes permanent.
    Commit,
    /// `END`: terminate the session.
    End,
}

impl Command {
    /// Parse one input line.
    ///
    /// Returns `Ok(None)` for blank lines, which the loop skips silently.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidCommand`] on bad arity or an unrecognized verb.
    pub fn parse(line: &str) -> Result<Option<Command>> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let Some((verb, args)) = tokens.split_first() else {
            return Ok(None);
        };

        let command = match (verb.to_ascii_uppercase().as_str(), args) {
            ("SET", [name, value]) => Command::Set {
                name: name.to_string(),
                value: value.to_string(),
            },
            ("GET", [name]) => Command::Get {
                name: name.to_string(),
            },
            ("UNSET", [name]) => Command::Unset {
                name: name.to_string(),
            },
            ("NUMEQUALTO", [value]) => Command::NumEqualTo {
                value: value.to_string(),
            },
            ("BEGIN", []) => Command::Begin,
            ("ROLLBACK", []) => Command::Rollback,
            ("COMMIT", []) => Command::Commit,
            ("END", []) => Command::End,
            _ => return Err(Error::invalid_command(line)),
        };
        Ok(Some(command))
    }
}
