//! Error types for catalog loading.
//!
//! [`CatalogError`] covers failures of the whole load and is always
//! surfaced to the caller. [`RowSkip`] describes why a single row produced
//! no record; the loader absorbs it and moves on.

use std::path::PathBuf;

/// Errors that abort a catalog load.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The backing catalog file does not exist.
    #[error("catalog source unavailable: {}", path.display())]
    SourceUnavailable {
        /// Path that was expected to hold the catalog.
        path: PathBuf,
    },

    /// The catalog file exists but could not be opened or read.
    #[error("failed to read catalog {}: {source}", path.display())]
    Io {
        /// Path of the catalog file.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The CSV layer failed in a way that is not scoped to one row.
    #[error("failed to parse catalog header or stream: {source}")]
    Csv {
        /// The underlying CSV error.
        #[from]
        source: csv::Error,
    },
}

/// Reasons a single catalog row is dropped.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RowSkip {
    /// `OBJECT_NAME` was empty after trimming.
    #[error("row {row}: empty object name")]
    EmptyName {
        /// One-based data row number.
        row: u64,
    },

    /// `MEAN_MOTION` was present but did not parse as a number.
    #[error("row {row}: invalid MEAN_MOTION {raw:?}")]
    InvalidMeanMotion {
        /// One-based data row number.
        row: u64,
        /// The offending field text.
        raw: String,
    },

    /// `ECCENTRICITY` was present but did not parse as a number.
    #[error("row {row}: invalid ECCENTRICITY {raw:?}")]
    InvalidEccentricity {
        /// One-based data row number.
        row: u64,
        /// The offending field text.
        raw: String,
    },

    /// The CSV reader could not decode the row (e.g. invalid UTF-8).
    #[error("row {row}: malformed record: {reason}")]
    Malformed {
        /// One-based data row number.
        row: u64,
        /// Reader diagnostic.
        reason: String,
    },
}
