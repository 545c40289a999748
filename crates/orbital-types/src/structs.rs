//! Core record structs: catalog rows, snapshot records, and delta points.
//!
//! The field names of [`SnapshotRecord`] are the in-memory names; the serde
//! attributes pin the persisted JSON keys (`snapshot_time_utc`,
//! `active_regimes`, `leo_zones`, ...) so history files written by older
//! generators still read back.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::Regime;

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// One parsed row of the active-satellite catalog.
///
/// Transient: produced by the loader, consumed by the snapshot builder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct CatalogRecord {
    /// Trimmed, non-empty object name.
    pub name: String,
    /// Mean motion in revolutions per day.
    pub mean_motion: f64,
    /// Orbital eccentricity (unitless).
    pub eccentricity: f64,
}

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// Active object counts per counted regime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct RegimeCounts {
    /// Objects in low Earth orbit.
    #[serde(rename = "LEO")]
    pub leo: u64,
    /// Objects in medium Earth orbit.
    #[serde(rename = "MEO")]
    pub meo: u64,
    /// Objects in geosynchronous orbit.
    #[serde(rename = "GEO")]
    pub geo: u64,
}

impl RegimeCounts {
    /// Count for a regime, or `None` for [`Regime::Unclassified`].
    pub const fn get(&self, regime: Regime) -> Option<u64> {
        match regime {
            Regime::Leo => Some(self.leo),
            Regime::Meo => Some(self.meo),
            Regime::Geo => Some(self.geo),
            Regime::Unclassified => None,
        }
    }

    /// Add one object to the regime's count.
    ///
    /// Returns `false` if the regime is not a counted one.
    pub const fn record(&mut self, regime: Regime) -> bool {
        let slot = match regime {
            Regime::Leo => &mut self.leo,
            Regime::Meo => &mut self.meo,
            Regime::Geo => &mut self.geo,
            Regime::Unclassified => return false,
        };
        *slot = slot.saturating_add(1);
        true
    }

    /// Sum of all three counts.
    pub const fn total(&self) -> u64 {
        self.leo.saturating_add(self.meo).saturating_add(self.geo)
    }
}

/// Object count and zone pressure index for one LEO altitude zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ZoneRow {
    /// Zone label, e.g. `LEO-2`.
    pub zone_label: String,
    /// Number of active LEO objects whose derived altitude falls in the zone.
    pub count: u64,
    /// Zone pressure index, 0 to 100, relative to the busiest zone.
    pub zpi: f64,
}

/// Totals that explain how the catalog was partitioned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct TrackedObjects {
    /// Catalog rows that parsed into records.
    pub catalog_records: u64,
    /// Records that fell into no counted regime.
    pub unclassified: u64,
    /// Active LEO records with no valid altitude or an altitude outside
    /// every defined zone.
    pub leo_outside_zones: u64,
}

/// One computed snapshot of the catalog, as persisted in the history.
///
/// Immutable once written. `generated_at` is the wall-clock generation time
/// and the history ordering key; `source_timestamp` is the catalog file's
/// last-modified time. They are never interchangeable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct SnapshotRecord {
    /// When this record was generated (UTC).
    #[serde(rename = "snapshot_time_utc")]
    #[ts(as = "String")]
    pub generated_at: DateTime<Utc>,
    /// Last-modified time of the underlying catalog, `None` when unknown.
    #[serde(
        rename = "data_snapshot_time_utc",
        default,
        skip_serializing_if = "Option::is_none",
        with = "crate::timestamp::source_time"
    )]
    #[ts(rename = "data_snapshot_time_utc", as = "Option<String>", optional)]
    pub source_timestamp: Option<DateTime<Utc>>,
    /// Active object counts per regime.
    #[serde(rename = "active_regimes")]
    pub regime_counts: RegimeCounts,
    /// LEO zone rows, in zone-table order.
    #[serde(rename = "leo_zones", alias = "zones")]
    #[ts(rename = "leo_zones")]
    pub zones: Vec<ZoneRow>,
    /// Optional partition totals; absent in older history files.
    #[serde(
        rename = "tracked_objects",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    #[ts(rename = "tracked_objects", optional)]
    pub tracked: Option<TrackedObjects>,
}

impl SnapshotRecord {
    /// Look up a zone row by label.
    pub fn zone(&self, label: &str) -> Option<&ZoneRow> {
        self.zones.iter().find(|z| z.zone_label == label)
    }

    /// Source timestamp rendered for display, `"unknown"` when absent.
    pub fn source_time_label(&self) -> String {
        crate::timestamp::label(self.source_timestamp)
    }
}

// ---------------------------------------------------------------------------
// Deltas
// ---------------------------------------------------------------------------

/// Signed period-over-period change per counted regime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct RegimeDeltas {
    /// Change in the LEO count.
    #[serde(rename = "LEO")]
    pub leo: i64,
    /// Change in the MEO count.
    #[serde(rename = "MEO")]
    pub meo: i64,
    /// Change in the GEO count.
    #[serde(rename = "GEO")]
    pub geo: i64,
}

impl RegimeDeltas {
    /// `true` if every delta is zero.
    pub const fn is_zero(&self) -> bool {
        self.leo == 0 && self.meo == 0 && self.geo == 0
    }
}

/// Current values and change for one zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ZoneDelta {
    /// Zone label the values belong to.
    pub zone_label: String,
    /// Current object count.
    pub count: u64,
    /// Current zone pressure index.
    pub zpi: f64,
    /// Change in object count since the previous point.
    pub count_delta: i64,
    /// Change in zone pressure index since the previous point.
    pub zpi_delta: f64,
}

/// One point of a history trend: the snapshot's values plus its deltas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct DeltaPoint {
    /// Generation time of the underlying snapshot.
    #[ts(as = "String")]
    pub generated_at: DateTime<Utc>,
    /// Catalog time of the underlying snapshot, if known.
    #[ts(as = "Option<String>")]
    pub source_timestamp: Option<DateTime<Utc>>,
    /// Current regime counts.
    pub regimes: RegimeCounts,
    /// Regime changes since the previous point in the window.
    pub regime_deltas: RegimeDeltas,
    /// Per-zone values and changes, in the snapshot's zone order.
    pub zones: Vec<ZoneDelta>,
}
