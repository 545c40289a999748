//! Snapshot history for the orbital pressure history engine.
//!
//! # Modules
//!
//! - [`store`] -- Append-only, filesystem-backed record store
//! - [`delta`] -- Period-over-period deltas and trends
//! - [`validate`] -- Read-only audit of a history directory
//! - [`error`] -- Store error types

pub mod delta;
pub mod error;
pub mod store;
pub mod validate;

pub use delta::{compute_deltas, trend};
pub use error::HistoryError;
pub use store::{HistoryStore, StoredSnapshot};
pub use validate::{Problem, validate_store};
