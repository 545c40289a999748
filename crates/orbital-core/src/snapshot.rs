//! Snapshot builder: catalog records to one [`SnapshotRecord`].
//!
//! Regime counts cover every record. Zone counts cover only records that
//! pass the active-LEO filter and have a derivable altitude; each zone's
//! pressure index is relative to the busiest zone of the same snapshot.
//! The builder never persists anything.

use chrono::{DateTime, Utc};
use orbital_catalog::{CatalogCache, CatalogError};
use orbital_types::{CatalogRecord, SnapshotRecord, TrackedObjects, ZoneRow};

use crate::classify::{count_regimes, is_active_leo};
use crate::orbit::altitude_from_mean_motion;
use crate::pressure::pressure_index;
use crate::zones::ZONE_BINS;

/// Errors from building a snapshot.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    /// The catalog could not be loaded.
    #[error("catalog load failed: {source}")]
    Catalog {
        /// The underlying catalog error.
        #[from]
        source: CatalogError,
    },
}

/// Per-zone counts for the active-LEO records, plus the count that fell
/// outside every zone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ZoneTally {
    /// Counts in [`ZONE_BINS`] order.
    pub counts: [u64; ZONE_BINS.len()],
    /// Active-LEO records with no altitude or an altitude in no zone.
    pub outside: u64,
}

/// Bin every active-LEO record into the zone table.
pub fn count_zones(records: &[CatalogRecord]) -> ZoneTally {
    let mut tally = ZoneTally::default();
    for record in records.iter().filter(|r| is_active_leo(r)) {
        let index = altitude_from_mean_motion(record.mean_motion)
            .and_then(|altitude| ZONE_BINS.iter().position(|bin| bin.contains(altitude)));
        let slot = match index {
            Some(i) => tally.counts.get_mut(i),
            None => None,
        };
        match slot {
            Some(count) => *count = count.saturating_add(1),
            None => tally.outside = tally.outside.saturating_add(1),
        }
    }
    tally
}

/// Turn zone counts into zone rows with pressure indices.
///
/// An all-zero tally uses a divisor floor of 1, so every `zpi` is `0.0`.
pub fn zone_rows(counts: &[u64; ZONE_BINS.len()]) -> Vec<ZoneRow> {
    let cohort_max = counts.iter().copied().max().unwrap_or(0).max(1);
    ZONE_BINS
        .iter()
        .zip(counts)
        .map(|(bin, &count)| ZoneRow {
            zone_label: bin.label.to_owned(),
            count,
            zpi: pressure_index(count, cohort_max),
        })
        .collect()
}

/// Build a snapshot from already-loaded records.
pub fn build_snapshot(
    records: &[CatalogRecord],
    source_timestamp: Option<DateTime<Utc>>,
    generated_at: DateTime<Utc>,
) -> SnapshotRecord {
    let regimes = count_regimes(records);
    let zones = count_zones(records);

    let snapshot = SnapshotRecord {
        generated_at,
        source_timestamp,
        regime_counts: regimes.counts,
        zones: zone_rows(&zones.counts),
        tracked: Some(TrackedObjects {
            catalog_records: u64::try_from(records.len()).unwrap_or(u64::MAX),
            unclassified: regimes.unclassified,
            leo_outside_zones: zones.outside,
        }),
    };

    tracing::debug!(
        records = records.len(),
        leo = snapshot.regime_counts.leo,
        meo = snapshot.regime_counts.meo,
        geo = snapshot.regime_counts.geo,
        unclassified = regimes.unclassified,
        leo_outside_zones = zones.outside,
        "Built snapshot"
    );
    snapshot
}

/// Load the catalog through the cache and build a snapshot.
///
/// # Errors
///
/// Returns [`SnapshotError::Catalog`] if the catalog cannot be loaded. A
/// missing source is never turned into an empty snapshot.
pub fn build_from_cache(
    cache: &CatalogCache,
    generated_at: DateTime<Utc>,
) -> Result<SnapshotRecord, SnapshotError> {
    let records = cache.get()?;
    let source_timestamp = cache.timestamp().known();
    Ok(build_snapshot(&records, source_timestamp, generated_at))
}
