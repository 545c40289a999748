//! Orbital regime classification.
//!
//! The rules are applied in a fixed order and the first match wins:
//!
//! | Order | Condition (with `eccentricity < 0.25`) | Regime |
//! |-------|----------------------------------------|--------|
//! | 1 | `mean_motion >= 11.25` | LEO |
//! | 2 | `0.95 <= mean_motion <= 1.05` | GEO |
//! | 3 | `1.05 < mean_motion < 11.25` | MEO |
//! | 4 | anything else | Unclassified |
//!
//! Evaluation order is the tie-break: `11.25` is LEO and `1.05` is GEO.

use orbital_types::{CatalogRecord, Regime, RegimeCounts};

/// Minimum mean motion (rev/day) for LEO, i.e. a period of 128 minutes.
pub const LEO_MIN_MEAN_MOTION: f64 = 11.25;

/// Lower bound (inclusive) of the geosynchronous mean-motion band.
pub const GEO_MIN_MEAN_MOTION: f64 = 0.95;

/// Upper bound (inclusive) of the geosynchronous mean-motion band.
pub const GEO_MAX_MEAN_MOTION: f64 = 1.05;

/// Eccentricity at or above which an orbit is never classified.
pub const MAX_ECCENTRICITY: f64 = 0.25;

/// Classify an orbit by mean motion (rev/day) and eccentricity.
pub fn classify_regime(mean_motion: f64, eccentricity: f64) -> Regime {
    if eccentricity.is_nan() || eccentricity >= MAX_ECCENTRICITY || mean_motion <= 0.0 {
        return Regime::Unclassified;
    }
    if mean_motion >= LEO_MIN_MEAN_MOTION {
        Regime::Leo
    } else if (GEO_MIN_MEAN_MOTION..=GEO_MAX_MEAN_MOTION).contains(&mean_motion) {
        Regime::Geo
    } else if mean_motion > GEO_MAX_MEAN_MOTION {
        Regime::Meo
    } else {
        Regime::Unclassified
    }
}

/// Classify a catalog record.
pub fn classify_record(record: &CatalogRecord) -> Regime {
    classify_regime(record.mean_motion, record.eccentricity)
}

/// Whether a record passes the active-LEO filter used for zone binning.
pub fn is_active_leo(record: &CatalogRecord) -> bool {
    classify_record(record) == Regime::Leo
}

/// Number of records passing the active-LEO filter.
pub fn count_active_leo(records: &[CatalogRecord]) -> u64 {
    records
        .iter()
        .filter(|r| is_active_leo(r))
        .fold(0_u64, |n, _| n.saturating_add(1))
}

/// Regime counts plus the number of records no counted regime claimed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegimeTally {
    /// Counts for LEO, MEO, and GEO.
    pub counts: RegimeCounts,
    /// Records classified as [`Regime::Unclassified`].
    pub unclassified: u64,
}

/// Classify every record and aggregate the result.
pub fn count_regimes(records: &[CatalogRecord]) -> RegimeTally {
    let mut tally = RegimeTally::default();
    for record in records {
        if !tally.counts.record(classify_record(record)) {
            tally.unclassified = tally.unclassified.saturating_add(1);
        }
    }
    tally
}
