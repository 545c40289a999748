//! Read-side report payloads handed to the presentation layer.
//!
//! These are projections of a [`SnapshotRecord`](crate::SnapshotRecord);
//! nothing here is persisted.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Count of active LEO objects in one catalog snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ActiveLeoSummary {
    /// Human-readable description of the catalog source.
    pub data_source: String,
    /// Catalog time, or `"unknown"`.
    pub snapshot_time_utc: String,
    /// Objects passing the LEO filter.
    pub leo_active_count: u64,
}

/// Active object counts for all three counted regimes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ActiveRegimesSummary {
    /// Human-readable description of the catalog source.
    pub data_source: String,
    /// Catalog time, or `"unknown"`.
    pub snapshot_time_utc: String,
    /// Active LEO objects.
    pub leo_active: u64,
    /// Active MEO objects.
    pub meo_active: u64,
    /// Active GEO objects.
    pub geo_active: u64,
}

/// Population pressure for one regime, relative to the busiest regime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct RegimePressure {
    /// Regime label (`LEO`, `MEO`, `GEO`).
    pub orbit_band: String,
    /// Active objects in the regime.
    pub object_count: u64,
    /// Population pressure index, 0 to 100.
    pub population_pressure_index: f64,
}

/// Congestion report row for one LEO altitude zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct LeoZoneRisk {
    /// Zone label, e.g. `LEO-1`.
    pub zone_label: String,
    /// Altitude interval, e.g. `300-500 km`.
    pub altitude_range_km: String,
    /// Objects binned into the zone.
    pub estimated_object_count: u64,
    /// Zone pressure index, 0 to 100.
    pub zone_pressure_index: f64,
    /// Provenance note.
    pub notes: String,
}

/// Congestion report for every LEO zone in one snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct LeoZonesSummary {
    /// Human-readable description of the catalog source.
    pub data_source: String,
    /// Catalog time, or `"unknown"`.
    pub snapshot_time_utc: String,
    /// One row per zone, in zone-table order.
    pub zones: Vec<LeoZoneRisk>,
}
