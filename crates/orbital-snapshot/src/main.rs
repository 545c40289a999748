//! Generation tool for the orbital pressure history.
//!
//! Loads the active-satellite catalog, builds one snapshot, and appends it
//! to the history directory. Meant to be run once per catalog refresh by an
//! external scheduler; the scheduler is responsible for never running two
//! instances at once.
//!
//! # Exit codes
//!
//! | Code | Meaning |
//! |------|---------|
//! | 0 | Snapshot written |
//! | 1 | Any other failure |
//! | 2 | Target file exists and `--force` was not given |
//! | 3 | Catalog unchanged since the latest snapshot and `--force` was not given |

mod error;

use std::fmt::Write as _;
use std::path::PathBuf;
use std::process::ExitCode;

use chrono::{DateTime, NaiveDate, Utc};
use clap::Parser;
use orbital_catalog::{CatalogCache, CatalogSource};
use orbital_core::OrbitalConfig;
use orbital_core::config::DEFAULT_CONFIG_FILE;
use orbital_history::HistoryStore;
use orbital_types::SnapshotRecord;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::{EXIT_FAILURE, SnapshotToolError};

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(
    name = "orbital-snapshot",
    version,
    about = "Generate one orbital pressure history snapshot"
)]
struct Cli {
    /// File name date, YYYY-MM-DD (default: current UTC date).
    #[arg(long, value_name = "YYYY-MM-DD")]
    date: Option<NaiveDate>,

    /// Explicit output path (default: <history dir>/<date>.json).
    #[arg(long, value_name = "PATH")]
    out: Option<PathBuf>,

    /// Overwrite an existing file and skip the unchanged-source check.
    #[arg(long)]
    force: bool,

    /// Configuration file.
    #[arg(long, value_name = "PATH", default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,
}

/// A successfully written snapshot.
#[derive(Debug)]
struct Written {
    path: PathBuf,
    snapshot: SnapshotRecord,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // Usage errors must not collide with the conflict exit codes.
            let code = if err.use_stderr() { EXIT_FAILURE } else { 0 };
            let _ = err.print();
            return ExitCode::from(code);
        }
    };

    let config = match OrbitalConfig::load_or_default(&cli.config) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {}", SnapshotToolError::from(err));
            return ExitCode::from(EXIT_FAILURE);
        }
    };
    init_tracing(&config.logging.level);

    match generate(&cli, &config, Utc::now()) {
        Ok(written) => {
            print!("{}", render_report(&written));
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err}");
            if let Some(hint) = err.hint() {
                eprintln!("       {hint}");
            }
            ExitCode::from(err.exit_code())
        }
    }
}

/// Install the fmt subscriber. `RUST_LOG` wins over the configured level.
fn init_tracing(level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

/// Build a snapshot from the configured catalog and append it.
fn generate(
    cli: &Cli,
    config: &OrbitalConfig,
    now: DateTime<Utc>,
) -> Result<Written, SnapshotToolError> {
    info!(
        catalog = %config.catalog.path.display(),
        history = %config.history.dir.display(),
        force = cli.force,
        "orbital-snapshot starting"
    );

    let store = HistoryStore::create(&config.history.dir)?;
    let date = cli.date.unwrap_or_else(|| now.date_naive());
    let path = cli.out.clone().unwrap_or_else(|| store.path_for(date));

    let cache = CatalogCache::new(CatalogSource::new(&config.catalog.path));
    let snapshot = orbital_core::build_from_cache(&cache, now)?;
    let path = store.append_at(&snapshot, &path, cli.force)?;

    Ok(Written { path, snapshot })
}

/// Human-readable summary of a written snapshot.
fn render_report(written: &Written) -> String {
    let snapshot = &written.snapshot;
    let counts = snapshot.regime_counts;
    let zones = snapshot
        .zones
        .iter()
        .map(|z| format!("{}={}", z.zone_label, z.count))
        .collect::<Vec<_>>()
        .join(", ");

    let mut out = String::from("Wrote history snapshot:\n");
    let _ = writeln!(out, "   path: {}", written.path.display());
    let _ = writeln!(
        out,
        "   snapshot_time_utc: {}",
        orbital_types::timestamp::format_utc(snapshot.generated_at)
    );
    let _ = writeln!(
        out,
        "   data_snapshot_time_utc: {}",
        snapshot.source_time_label()
    );
    let _ = writeln!(
        out,
        "   active_regimes: LEO={}, MEO={}, GEO={}",
        counts.leo, counts.meo, counts.geo
    );
    let _ = writeln!(out, "   leo_zones: {zones}");
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::path::Path;

    use orbital_core::config::{CatalogConfig, HistoryConfig};

    use super::*;
    use crate::error::{EXIT_UNCHANGED_SOURCE, EXIT_WRITE_CONFLICT};

    fn config_in(dir: &Path) -> OrbitalConfig {
        OrbitalConfig {
            catalog: CatalogConfig {
                path: dir.join("active.csv"),
            },
            history: HistoryConfig {
                dir: dir.join("history"),
            },
            ..OrbitalConfig::default()
        }
    }

    fn write_catalog(config: &OrbitalConfig) {
        std::fs::write(
            &config.catalog.path,
            "OBJECT_NAME,MEAN_MOTION,ECCENTRICITY\nISS,15.5,0.0006\nGPS,2.0,0.01\nGEO,1.0,0.0\n",
        )
        .unwrap();
    }

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("orbital-snapshot").chain(args.iter().copied()))
            .unwrap()
    }

    fn now() -> DateTime<Utc> {
        "2026-01-08T03:00:00Z".parse().unwrap()
    }

    #[test]
    fn writes_to_dated_file_in_history_dir() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        write_catalog(&config);

        let written = generate(&cli(&["--date", "2026-01-08"]), &config, now()).unwrap();
        assert_eq!(written.path, dir.path().join("history/2026-01-08.json"));
        assert_eq!(written.snapshot.regime_counts.total(), 3);

        let report = render_report(&written);
        assert!(report.contains("active_regimes: LEO=1, MEO=1, GEO=1"));
        assert!(report.contains("snapshot_time_utc: 2026-01-08T03:00:00Z"));
        assert!(report.contains("leo_zones: LEO-1=1, LEO-2=0, LEO-3=0, LEO-4=0"));
    }

    #[test]
    fn default_date_is_current_utc_day() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        write_catalog(&config);

        let written = generate(&cli(&[]), &config, now()).unwrap();
        assert!(written.path.ends_with("2026-01-08.json"));
    }

    #[test]
    fn existing_file_exits_with_conflict_code() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        write_catalog(&config);
        let args = cli(&["--date", "2026-01-08"]);
        generate(&args, &config, now()).unwrap();

        let err = generate(&args, &config, now()).unwrap_err();
        assert_eq!(err.exit_code(), EXIT_WRITE_CONFLICT);
        assert!(err.hint().is_some());
    }

    #[test]
    fn unchanged_catalog_exits_with_unchanged_code() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        write_catalog(&config);
        generate(&cli(&["--date", "2026-01-08"]), &config, now()).unwrap();

        let err = generate(&cli(&["--date", "2026-01-09"]), &config, now()).unwrap_err();
        assert_eq!(err.exit_code(), EXIT_UNCHANGED_SOURCE);

        let forced = generate(&cli(&["--date", "2026-01-09", "--force"]), &config, now());
        assert!(forced.is_ok());
    }

    #[test]
    fn explicit_out_path_is_honored() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        write_catalog(&config);
        let out = dir.path().join("manual.json");

        let written = generate(
            &cli(&["--out", out.to_str().unwrap()]),
            &config,
            now(),
        )
        .unwrap();
        assert_eq!(written.path, out);
        assert!(out.exists());
    }

    #[test]
    fn missing_catalog_is_a_plain_failure() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        let err = generate(&cli(&[]), &config, now()).unwrap_err();
        assert!(matches!(err, SnapshotToolError::Snapshot { .. }));
        assert_eq!(err.exit_code(), EXIT_FAILURE);
        assert!(err.hint().is_none());
    }

    #[test]
    fn malformed_date_is_rejected_by_the_parser() {
        let parsed =
            Cli::try_parse_from(["orbital-snapshot", "--date", "08/01/2026"]);
        assert!(parsed.is_err());
    }
}
