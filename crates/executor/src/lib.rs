//! Command execution layer.
//!
//! Maps the line-oriented command surface onto the engine:
//!
//! - [`Command`]: a parsed input line (whitespace-tokenized,
//!   case-insensitive verb, exact arity).
//! - [`Output`]: the typed result of executing a command.
//! - [`Session`]: dispatches commands against one shared [`Store`] and
//!   renders outputs and errors to the exact status lines the surface
//!   prints.
//!
//! [`Store`]: tally_engine::Store

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod command;
pub mod output;
pub mod session;

pub use command::Command;
pub use output::Output;
pub use session::{LineOutcome, Session};

pub use tally_core::{Error, Result};
