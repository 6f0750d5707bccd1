//! Core types for the tally workspace.
//!
//! Bottom-of-stack crate holding the error taxonomy shared by the engine
//! and the command layer. Nothing here is fatal: every error is a status
//! the caller reports and moves past.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;

pub use error::{Error, Result};
