//! Period-over-period deltas across a window of snapshots.
//!
//! The first point of any window has all deltas zero, so the same record
//! can show different deltas in different windows. Zone deltas match by
//! label; a label missing from the previous point counts from zero.

use orbital_types::{DeltaPoint, RegimeCounts, RegimeDeltas, SnapshotRecord, ZoneDelta};

use crate::error::HistoryError;
use crate::store::HistoryStore;

/// Signed `current - previous`, saturating at the `i64` range.
pub fn signed_delta(current: u64, previous: u64) -> i64 {
    let magnitude = i64::try_from(current.abs_diff(previous)).unwrap_or(i64::MAX);
    if current >= previous {
        magnitude
    } else {
        0_i64.saturating_sub(magnitude)
    }
}

fn regime_deltas(current: &RegimeCounts, previous: &RegimeCounts) -> RegimeDeltas {
    RegimeDeltas {
        leo: signed_delta(current.leo, previous.leo),
        meo: signed_delta(current.meo, previous.meo),
        geo: signed_delta(current.geo, previous.geo),
    }
}

fn zone_deltas(current: &SnapshotRecord, previous: &SnapshotRecord) -> Vec<ZoneDelta> {
    current
        .zones
        .iter()
        .map(|zone| {
            let (prev_count, prev_zpi) = previous
                .zone(&zone.zone_label)
                .map_or((0, 0.0), |prev| (prev.count, prev.zpi));
            ZoneDelta {
                zone_label: zone.zone_label.clone(),
                count: zone.count,
                zpi: zone.zpi,
                count_delta: signed_delta(zone.count, prev_count),
                zpi_delta: zone.zpi - prev_zpi,
            }
        })
        .collect()
}

/// Deltas for each point of an ordered window.
///
/// `points` must already be ascending by generation time, as returned by
/// [`HistoryStore::read_all`] and [`HistoryStore::read_latest`].
pub fn compute_deltas(points: &[SnapshotRecord]) -> Vec<DeltaPoint> {
    let mut previous: Option<&SnapshotRecord> = None;
    points
        .iter()
        .map(|current| {
            // The first point is compared against itself: all zeros.
            let baseline = previous.unwrap_or(current);
            previous = Some(current);
            DeltaPoint {
                generated_at: current.generated_at,
                source_timestamp: current.source_timestamp,
                regimes: current.regime_counts,
                regime_deltas: regime_deltas(&current.regime_counts, &baseline.regime_counts),
                zones: zone_deltas(current, baseline),
            }
        })
        .collect()
}

/// Deltas over the latest `n` stored records.
///
/// # Errors
///
/// Propagates any [`HistoryError`] from reading the store.
pub fn trend(store: &HistoryStore, n: usize) -> Result<Vec<DeltaPoint>, HistoryError> {
    let window = store.read_latest(n)?;
    tracing::debug!(requested = n, points = window.len(), "Computing history trend");
    Ok(compute_deltas(&window))
}
