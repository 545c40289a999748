//! End-to-end pipeline: catalog CSV to cache, builder, store, deltas, and
//! validator.

#![allow(
    clippy::unwrap_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::arithmetic_side_effects,
    clippy::missing_panics_doc
)]

use std::path::Path;

use chrono::{DateTime, NaiveDate, Utc};
use orbital_catalog::{CatalogCache, CatalogSource};
use orbital_core::build_from_cache;
use orbital_history::{HistoryError, HistoryStore, compute_deltas, trend, validate_store};

const HEADER: &str = "OBJECT_NAME,OBJECT_ID,EPOCH,MEAN_MOTION,ECCENTRICITY,INCLINATION\n";

// ~420 km, ~550 km, ~1000 km; then MEO, GEO, and an unparseable row.
const DAY_ONE: &str = "\
ISS (ZARYA),1998-067A,2026-01-07T00:00:00,15.5,0.0006,51.6
STARLINK-1007,2019-074A,2026-01-07T00:00:00,15.06,0.0001,53.0
STARLINK-1008,2019-074B,2026-01-07T00:00:00,15.06,0.0001,53.0
COSMOS 2251 DEB,1993-036A,2026-01-07T00:00:00,13.7,0.001,74.0
GPS BIIR-2,1997-035A,2026-01-07T00:00:00,2.005,0.01,55.0
INTELSAT 901,2001-024A,2026-01-07T00:00:00,1.0027,0.0002,0.01
CORRUPT,2000-000A,2026-01-07T00:00:00,??,0.01,0.0
";

// One more LEO-1 object (~390 km); the GEO object has been retired.
const DAY_TWO: &str = "\
ISS (ZARYA),1998-067A,2026-01-08T00:00:00,15.5,0.0006,51.6
TIANHE,2021-035A,2026-01-08T00:00:00,15.6,0.0004,41.5
STARLINK-1007,2019-074A,2026-01-08T00:00:00,15.06,0.0001,53.0
STARLINK-1008,2019-074B,2026-01-08T00:00:00,15.06,0.0001,53.0
COSMOS 2251 DEB,1993-036A,2026-01-08T00:00:00,13.7,0.001,74.0
GPS BIIR-2,1997-035A,2026-01-08T00:00:00,2.005,0.01,55.0
";

fn write_catalog(path: &Path, rows: &str) {
    std::fs::write(path, format!("{HEADER}{rows}")).unwrap();
}

fn at(raw: &str) -> DateTime<Utc> {
    raw.parse().unwrap()
}

fn day(raw: &str) -> NaiveDate {
    raw.parse().unwrap()
}

/// Push the file's modification time forward so the source timestamp moves.
fn touch_later(path: &Path, secs: u64) {
    let file = std::fs::File::options().write(true).open(path).unwrap();
    let modified = std::time::SystemTime::now() + std::time::Duration::from_secs(secs);
    file.set_modified(modified).unwrap();
}

#[test]
fn snapshot_history_round_trip() {
    let workspace = tempfile::tempdir().unwrap();
    let catalog_path = workspace.path().join("active.csv");
    write_catalog(&catalog_path, DAY_ONE);

    let cache = CatalogCache::new(CatalogSource::new(&catalog_path));
    let store = HistoryStore::create(workspace.path().join("history")).unwrap();

    // Day one.
    let first = build_from_cache(&cache, at("2026-01-08T00:00:00Z")).unwrap();
    assert_eq!(first.regime_counts.leo, 4);
    assert_eq!(first.regime_counts.meo, 1);
    assert_eq!(first.regime_counts.geo, 1);
    assert_eq!(first.zone("LEO-1").unwrap().count, 1);
    assert_eq!(first.zone("LEO-2").unwrap().count, 2);
    assert_eq!(first.zone("LEO-2").unwrap().zpi, 100.0);
    assert_eq!(first.zone("LEO-3").unwrap().count, 1);
    assert_eq!(first.zone("LEO-3").unwrap().zpi, 50.0);
    store.append(&first, day("2026-01-08"), false).unwrap();

    // Same catalog again: refused.
    let repeat = build_from_cache(&cache, at("2026-01-09T00:00:00Z")).unwrap();
    assert!(matches!(
        store.append(&repeat, day("2026-01-09"), false),
        Err(HistoryError::UnchangedSource { .. })
    ));

    // Catalog refresh.
    write_catalog(&catalog_path, DAY_TWO);
    touch_later(&catalog_path, 60);
    cache.invalidate();

    let second = build_from_cache(&cache, at("2026-01-09T00:00:00Z")).unwrap();
    assert_ne!(second.source_timestamp, first.source_timestamp);
    store.append(&second, day("2026-01-09"), false).unwrap();

    // Round trip and deltas.
    let all = store.read_all().unwrap();
    assert_eq!(all, vec![first, second]);

    let deltas = compute_deltas(&all);
    assert!(deltas[0].regime_deltas.is_zero());
    assert_eq!(deltas[1].regime_deltas.leo, 1);
    assert_eq!(deltas[1].regime_deltas.meo, 0);
    assert_eq!(deltas[1].regime_deltas.geo, -1);
    let leo1 = deltas[1]
        .zones
        .iter()
        .find(|z| z.zone_label == "LEO-1")
        .unwrap();
    assert_eq!(leo1.count_delta, 1);
    assert_eq!(leo1.zpi_delta, 50.0);

    // A one-point window restarts at zero.
    let latest_only = trend(&store, 1).unwrap();
    assert_eq!(latest_only.len(), 1);
    assert!(latest_only[0].regime_deltas.is_zero());

    assert!(validate_store(store.dir()).is_empty());
}

#[test]
fn forced_repeat_orders_by_generation_time_and_is_audited() {
    let workspace = tempfile::tempdir().unwrap();
    let catalog_path = workspace.path().join("active.csv");
    write_catalog(&catalog_path, DAY_ONE);

    let cache = CatalogCache::new(CatalogSource::new(&catalog_path));
    let store = HistoryStore::create(workspace.path().join("history")).unwrap();

    // The earlier generation goes to the later-sorting file name.
    let first = build_from_cache(&cache, at("2026-01-08T00:00:00Z")).unwrap();
    store.append(&first, day("2026-01-10"), false).unwrap();

    let second = build_from_cache(&cache, at("2026-01-09T00:00:00Z")).unwrap();
    store.append(&second, day("2026-01-09"), true).unwrap();

    let all = store.read_all().unwrap();
    assert_eq!(all[0].generated_at, first.generated_at);
    assert_eq!(all[1].generated_at, second.generated_at);

    let problems = validate_store(store.dir());
    assert_eq!(problems.len(), 1);
    assert_eq!(problems[0].file, "2026-01-10.json");
    assert!(
        problems[0]
            .message
            .starts_with("Duplicate data_snapshot_time_utc")
    );
}
