//! Read-side projections of a snapshot for the presentation layer.
//!
//! Every report carries the catalog time (not the generation time) as its
//! `snapshot_time_utc`, since that is what the counts describe.

use orbital_types::{
    ActiveLeoSummary, ActiveRegimesSummary, CatalogRecord, LeoZoneRisk, LeoZonesSummary, Regime,
    RegimePressure, SnapshotRecord,
};

use crate::classify::count_active_leo;
use crate::pressure::pressure_index;
use crate::zones::{OTHER_RANGE, range_for_label};

/// Description of the catalog feed shown on every report.
pub const DATA_SOURCE: &str = "CelesTrak active satellites CSV snapshot (GROUP=active, FORMAT=csv)";

/// Provenance note attached to each zone row.
pub const ZONE_NOTES: &str =
    "Counts derived from mean motion assuming near-circular orbits; pressure relative to the busiest zone";

/// Active-LEO count straight from catalog records.
pub fn active_leo_summary(records: &[CatalogRecord], snapshot_time_utc: String) -> ActiveLeoSummary {
    ActiveLeoSummary {
        data_source: DATA_SOURCE.to_owned(),
        snapshot_time_utc,
        leo_active_count: count_active_leo(records),
    }
}

/// Regime counts of a snapshot.
pub fn active_regimes_summary(snapshot: &SnapshotRecord) -> ActiveRegimesSummary {
    let counts = snapshot.regime_counts;
    ActiveRegimesSummary {
        data_source: DATA_SOURCE.to_owned(),
        snapshot_time_utc: snapshot.source_time_label(),
        leo_active: counts.leo,
        meo_active: counts.meo,
        geo_active: counts.geo,
    }
}

/// Zone congestion report of a snapshot.
pub fn leo_zones_summary(snapshot: &SnapshotRecord) -> LeoZonesSummary {
    let zones = snapshot
        .zones
        .iter()
        .map(|row| LeoZoneRisk {
            zone_label: row.zone_label.clone(),
            altitude_range_km: range_for_label(&row.zone_label)
                .unwrap_or(OTHER_RANGE)
                .to_owned(),
            estimated_object_count: row.count,
            zone_pressure_index: row.zpi,
            notes: ZONE_NOTES.to_owned(),
        })
        .collect();

    LeoZonesSummary {
        data_source: DATA_SOURCE.to_owned(),
        snapshot_time_utc: snapshot.source_time_label(),
        zones,
    }
}

/// Population pressure per regime, relative to the most populated one.
pub fn regime_pressure(snapshot: &SnapshotRecord) -> Vec<RegimePressure> {
    let counts = snapshot.regime_counts;
    let cohort_max = counts.leo.max(counts.meo).max(counts.geo);
    Regime::COUNTED
        .iter()
        .filter_map(|&regime| {
            counts.get(regime).map(|count| RegimePressure {
                orbit_band: regime.label().to_owned(),
                object_count: count,
                population_pressure_index: pressure_index(count, cohort_max),
            })
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::float_cmp)]
mod tests {
    use orbital_types::{RegimeCounts, ZoneRow};

    use super::*;

    fn snapshot() -> SnapshotRecord {
        SnapshotRecord {
            generated_at: "2026-01-08T00:00:00Z".parse().unwrap(),
            source_timestamp: None,
            regime_counts: RegimeCounts {
                leo: 8000,
                meo: 200,
                geo: 600,
            },
            zones: vec![
                ZoneRow {
                    zone_label: "LEO-1".to_owned(),
                    count: 1000,
                    zpi: 25.0,
                },
                ZoneRow {
                    zone_label: "LEO-2".to_owned(),
                    count: 4000,
                    zpi: 100.0,
                },
            ],
            tracked: None,
        }
    }

    #[test]
    fn regime_summary_uses_unknown_when_source_time_is_missing() {
        let summary = active_regimes_summary(&snapshot());
        assert_eq!(summary.snapshot_time_utc, "unknown");
        assert_eq!(summary.leo_active, 8000);
        assert_eq!(summary.data_source, DATA_SOURCE);
    }

    #[test]
    fn zone_summary_carries_range_strings() {
        let summary = leo_zones_summary(&snapshot());
        assert_eq!(summary.zones.len(), 2);
        assert_eq!(summary.zones[1].altitude_range_km, "500-800 km");
        assert_eq!(summary.zones[1].zone_pressure_index, 100.0);
        assert_eq!(summary.zones[0].estimated_object_count, 1000);
    }

    #[test]
    fn regime_pressure_is_relative_to_leo() {
        let rows = regime_pressure(&snapshot());
        let pairs: Vec<(&str, f64)> = rows
            .iter()
            .map(|r| (r.orbit_band.as_str(), r.population_pressure_index))
            .collect();
        assert_eq!(pairs, vec![("LEO", 100.0), ("MEO", 2.5), ("GEO", 7.5)]);
    }

    #[test]
    fn active_leo_summary_counts_filtered_records() {
        let records = vec![
            CatalogRecord {
                name: "A".to_owned(),
                mean_motion: 15.0,
                eccentricity: 0.001,
            },
            CatalogRecord {
                name: "B".to_owned(),
                mean_motion: 2.0,
                eccentricity: 0.001,
            },
        ];
        let summary = active_leo_summary(&records, "unknown".to_owned());
        assert_eq!(summary.leo_active_count, 1);
    }
}
