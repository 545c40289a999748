//! Error types for the history store.

use std::path::PathBuf;

use chrono::{DateTime, Utc};

/// Errors that can occur reading or appending history.
#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    /// The history directory does not exist.
    #[error("history directory does not exist: {}", path.display())]
    StoreMissing {
        /// The expected directory.
        path: PathBuf,
    },

    /// A record already exists at the target path and `force` was not set.
    #[error("refusing to overwrite existing snapshot: {}", path.display())]
    WriteConflict {
        /// The occupied target path.
        path: PathBuf,
    },

    /// The catalog has not changed since the most recent stored record.
    #[error(
        "source unchanged since {}: latest snapshot already covers it",
        orbital_types::timestamp::format_utc(*source_timestamp)
    )]
    UnchangedSource {
        /// The shared source timestamp.
        source_timestamp: DateTime<Utc>,
        /// File of the most recent stored record.
        latest: PathBuf,
    },

    /// The record was not generated after the most recent stored record.
    #[error(
        "snapshot_time_utc {} does not follow latest snapshot {} ({})",
        orbital_types::timestamp::format_utc(*generated_at),
        orbital_types::timestamp::format_utc(*latest_generated_at),
        latest.display()
    )]
    OutOfOrder {
        /// Generation time of the refused record.
        generated_at: DateTime<Utc>,
        /// Generation time of the most recent stored record.
        latest_generated_at: DateTime<Utc>,
        /// File of the most recent stored record.
        latest: PathBuf,
    },

    /// A filesystem operation failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// The file or directory involved.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// A record could not be encoded or decoded.
    #[error("invalid snapshot JSON in {}: {source}", path.display())]
    Serialization {
        /// The file involved.
        path: PathBuf,
        /// The underlying JSON error.
        source: serde_json::Error,
    },
}
