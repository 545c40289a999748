//! Shared type definitions for the orbital pressure history engine.
//!
//! This crate is the single source of truth for the data model used across
//! the workspace. Types defined here flow downstream to `TypeScript` via
//! `ts-rs` for the presentation layer.
//!
//! # Modules
//!
//! - [`enums`] -- The [`Regime`] partition
//! - [`structs`] -- Catalog records, snapshot records, and delta points
//! - [`reports`] -- Read-side report payloads projected from a snapshot
//! - [`timestamp`] -- UTC rendering and the `"unknown"` convention

pub mod enums;
pub mod reports;
pub mod structs;
pub mod timestamp;

// Re-export all public types at crate root for convenience.
pub use enums::Regime;
pub use reports::{
    ActiveLeoSummary, ActiveRegimesSummary, LeoZoneRisk, LeoZonesSummary, RegimePressure,
};
pub use structs::{
    CatalogRecord, DeltaPoint, RegimeCounts, RegimeDeltas, SnapshotRecord, TrackedObjects,
    ZoneDelta, ZoneRow,
};
