//! Orbital computation for the pressure history engine.
//!
//! # Modules
//!
//! - [`classify`] -- Regime classification and the active-LEO filter
//! - [`orbit`] -- Altitude derived from mean motion
//! - [`zones`] -- The fixed LEO altitude zone table
//! - [`pressure`] -- Relative pressure index (ZPI and PPI)
//! - [`snapshot`] -- Catalog records to a [`SnapshotRecord`](orbital_types::SnapshotRecord)
//! - [`reports`] -- Read-side projections of a snapshot
//! - [`config`] -- YAML configuration with env overrides

pub mod classify;
pub mod config;
pub mod orbit;
pub mod pressure;
pub mod reports;
pub mod snapshot;
pub mod zones;

pub use classify::{classify_regime, count_active_leo, count_regimes};
pub use config::{ConfigError, OrbitalConfig};
pub use orbit::altitude_from_mean_motion;
pub use pressure::pressure_index;
pub use snapshot::{SnapshotError, build_from_cache, build_snapshot};
pub use zones::{ZoneBin, ZoneMatch, zone_for_altitude};
