//! Public types for the tallydb unified API.
//!
//! This module re-exports types from internal crates with a clean public
//! interface.

// ============================================================================
// Public API types - these are what users should use
// ============================================================================

// The store engine
pub use tally_engine::Store;

// Command surface
pub use tally_executor::{Command, LineOutcome, Output, Session};

// Error taxonomy
pub use tally_core::{Error, Result};
