//! Catalog loader: CSV rows to typed [`CatalogRecord`] values.
//!
//! Parsing is two-staged so the drop policy is visible. [`read_rows`]
//! turns every data row into a `Result<CatalogRecord, RowSkip>`;
//! [`keep_records`] then discards the skips deliberately, logging how many
//! were dropped. Only whole-file failures become a [`CatalogError`].

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use csv::StringRecord;
use orbital_types::CatalogRecord;

use crate::error::{CatalogError, RowSkip};

/// Column holding the object name.
pub const OBJECT_NAME: &str = "OBJECT_NAME";
/// Column holding mean motion in revolutions per day.
pub const MEAN_MOTION: &str = "MEAN_MOTION";
/// Column holding eccentricity.
pub const ECCENTRICITY: &str = "ECCENTRICITY";

/// Outcome of parsing one data row.
pub type RowOutcome = Result<CatalogRecord, RowSkip>;

// ---------------------------------------------------------------------------
// Source
// ---------------------------------------------------------------------------

/// The single on-disk catalog file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogSource {
    /// Location of the CSV file.
    path: PathBuf,
}

impl CatalogSource {
    /// Bind a source to a CSV path. The file need not exist yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the CSV file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load every well-formed row of the catalog.
    ///
    /// Malformed rows are dropped without error.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::SourceUnavailable`] if the file does not
    /// exist, [`CatalogError::Io`] if it cannot be opened, and
    /// [`CatalogError::Csv`] if the stream itself is unreadable.
    pub fn load(&self) -> Result<Vec<CatalogRecord>, CatalogError> {
        if !self.path.exists() {
            return Err(CatalogError::SourceUnavailable {
                path: self.path.clone(),
            });
        }

        let file = File::open(&self.path).map_err(|source| CatalogError::Io {
            path: self.path.clone(),
            source,
        })?;

        let records = keep_records(read_rows(file)?);
        tracing::debug!(
            path = %self.path.display(),
            records = records.len(),
            "Loaded catalog"
        );
        Ok(records)
    }

    /// Last-modified time of the catalog file.
    pub fn timestamp(&self) -> SourceTimestamp {
        std::fs::metadata(&self.path)
            .and_then(|meta| meta.modified())
            .map_or(SourceTimestamp::Unknown, |modified| {
                SourceTimestamp::Known(DateTime::<Utc>::from(modified))
            })
    }
}

/// Last-modified time of the catalog, or unknown when the file is absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceTimestamp {
    /// The file's modification time in UTC.
    Known(DateTime<Utc>),
    /// The file does not exist or exposes no modification time.
    Unknown,
}

impl SourceTimestamp {
    /// The timestamp, if known.
    pub const fn known(self) -> Option<DateTime<Utc>> {
        match self {
            Self::Known(at) => Some(at),
            Self::Unknown => None,
        }
    }
}

impl core::fmt::Display for SourceTimestamp {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&orbital_types::timestamp::label(self.known()))
    }
}

// ---------------------------------------------------------------------------
// Row parsing
// ---------------------------------------------------------------------------

/// Column positions resolved from the header row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Columns {
    name: Option<usize>,
    mean_motion: Option<usize>,
    eccentricity: Option<usize>,
}

impl Columns {
    /// Resolve the three catalog columns from a header row.
    ///
    /// Missing columns are tolerated: their fields read as blank.
    pub fn from_headers(headers: &StringRecord) -> Self {
        let find = |wanted: &str| {
            headers
                .iter()
                .position(|h| h.trim_start_matches('\u{feff}').trim() == wanted)
        };
        Self {
            name: find(OBJECT_NAME),
            mean_motion: find(MEAN_MOTION),
            eccentricity: find(ECCENTRICITY),
        }
    }
}

/// Read every data row from a CSV stream into per-row outcomes.
///
/// # Errors
///
/// Returns [`CatalogError::Csv`] if the header cannot be read or the
/// underlying reader fails with an I/O error.
pub fn read_rows<R: Read>(reader: R) -> Result<Vec<RowOutcome>, CatalogError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let columns = Columns::from_headers(csv_reader.headers()?);

    let mut outcomes = Vec::new();
    let mut row: u64 = 0;
    for result in csv_reader.records() {
        row = row.saturating_add(1);
        match result {
            Ok(record) => outcomes.push(parse_row(&columns, &record, row)),
            Err(err) if err.is_io_error() => return Err(CatalogError::Csv { source: err }),
            Err(err) => outcomes.push(Err(RowSkip::Malformed {
                row,
                reason: err.to_string(),
            })),
        }
    }
    Ok(outcomes)
}

/// Parse one data row.
///
/// Blank or missing numeric fields read as `0.0`. Numbers are parsed
/// before the name is checked, so a row with both problems reports the
/// numeric one.
pub fn parse_row(columns: &Columns, record: &StringRecord, row: u64) -> RowOutcome {
    let name = field(record, columns.name);
    let mean_motion_raw = field(record, columns.mean_motion);
    let eccentricity_raw = field(record, columns.eccentricity);

    let mean_motion = parse_number(mean_motion_raw).ok_or_else(|| RowSkip::InvalidMeanMotion {
        row,
        raw: mean_motion_raw.to_owned(),
    })?;
    let eccentricity =
        parse_number(eccentricity_raw).ok_or_else(|| RowSkip::InvalidEccentricity {
            row,
            raw: eccentricity_raw.to_owned(),
        })?;

    if name.is_empty() {
        return Err(RowSkip::EmptyName { row });
    }
    if !mean_motion.is_finite() || !eccentricity.is_finite() {
        tracing::debug!(
            row,
            name,
            mean_motion,
            eccentricity,
            "Keeping catalog row with non-finite value"
        );
    }

    Ok(CatalogRecord {
        name: name.to_owned(),
        mean_motion,
        eccentricity,
    })
}

/// Trimmed field text; a missing column or short row reads as blank.
fn field(record: &StringRecord, idx: Option<usize>) -> &str {
    idx.and_then(|i| record.get(i)).unwrap_or("").trim()
}

/// Parse a trimmed numeric field; blank means zero.
///
/// `inf` and `NaN` parse and are kept; the classifier decides what they mean.
fn parse_number(raw: &str) -> Option<f64> {
    if raw.is_empty() {
        return Some(0.0);
    }
    raw.parse::<f64>().ok()
}

/// Keep the parsed records and drop every skipped row.
pub fn keep_records(outcomes: Vec<RowOutcome>) -> Vec<CatalogRecord> {
    let total = outcomes.len();
    let records: Vec<CatalogRecord> = outcomes
        .into_iter()
        .filter_map(|outcome| {
            outcome
                .map_err(|skip| tracing::trace!(%skip, "Dropping catalog row"))
                .ok()
        })
        .collect();

    let skipped = total.saturating_sub(records.len());
    if skipped > 0 {
        tracing::debug!(skipped, kept = records.len(), "Dropped malformed catalog rows");
    }
    records
}
