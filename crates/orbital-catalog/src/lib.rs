//! Active-satellite catalog loader for the orbital pressure engine.
//!
//! Reads the periodic catalog snapshot (a CSV with `OBJECT_NAME`,
//! `MEAN_MOTION`, and `ECCENTRICITY` columns) into typed
//! [`CatalogRecord`](orbital_types::CatalogRecord) values.
//!
//! # Modules
//!
//! - [`loader`] -- [`CatalogSource`], per-row parsing, and the source
//!   timestamp.
//! - [`cache`] -- [`CatalogCache`], the explicit single-slot cache.
//! - [`error`] -- [`CatalogError`] for whole-load failures and [`RowSkip`]
//!   for rows the loader drops.
//!
//! # Row policy
//!
//! A row whose name is blank or whose numeric fields do not parse is
//! dropped. The drop is an explicit [`RowSkip`] value that
//! [`loader::keep_records`] discards; it never becomes an error of the load.

pub mod cache;
pub mod error;
pub mod loader;

pub use cache::CatalogCache;
pub use error::{CatalogError, RowSkip};
pub use loader::{CatalogSource, SourceTimestamp};
