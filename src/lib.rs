//! Transactional in-memory key/value store with a value-count index.
//!
//! The store binds string names to string values, answers "how many names
//! hold this value" in O(1) from a denormalized index, and supports
//! unbounded nested transactions: ROLLBACK undoes the innermost frame,
//! COMMIT makes everything outstanding permanent in one step. All state is
//! volatile; one process, one lock, no durability.
//!
//! This crate is a facade: the engine, the command layer, and the error
//! taxonomy live in internal crates and are re-exported here.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use tallydb::{LineOutcome, Session, Store};
//!
//! let store = Arc::new(Store::new());
//! store.set("x", "10");
//!
//! store.begin();
//! store.set("x", "20");
//! store.rollback().unwrap();
//! assert_eq!(store.get("x").as_deref(), Some("10"));
//!
//! // Or drive it through the command surface:
//! let session = Session::new(store);
//! assert_eq!(
//!     session.eval_line("NUMEQUALTO 10"),
//!     LineOutcome::Print("1".into())
//! );
//! ```

#![warn(missing_docs)]

mod types;

pub use types::*;
