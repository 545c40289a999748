//! Filesystem-backed history of snapshot records.
//!
//! One pretty-printed JSON file per generation event, named
//! `<YYYY-MM-DD>.json` by default. Order is always taken from each record's
//! `snapshot_time_utc`, never from file names or directory listing order.
//!
//! # Concurrency
//!
//! Single writer. The store takes no lock; whoever schedules appends must
//! serialize them. Two concurrent appends may both pass the
//! unchanged-source and ordering checks. Only the same-path case is caught,
//! by the exclusive create used for non-forced writes.
//!
//! # Ordering
//!
//! A non-forced append must carry a `snapshot_time_utc` later than every
//! stored record. Forced appends skip the check; the validator reports any
//! duplicate generation time they leave behind.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use orbital_types::SnapshotRecord;

use crate::error::HistoryError;

/// File extension of persisted records.
pub const RECORD_EXTENSION: &str = "json";

/// A record together with the file it was read from.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredSnapshot {
    /// File holding the record.
    pub path: PathBuf,
    /// The decoded record.
    pub record: SnapshotRecord,
}

/// Directory of persisted snapshot records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryStore {
    /// The history directory.
    dir: PathBuf,
}

impl HistoryStore {
    /// Open an existing history directory.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::StoreMissing`] if `dir` is not a directory.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, HistoryError> {
        let dir = dir.into();
        if !dir.is_dir() {
            return Err(HistoryError::StoreMissing { path: dir });
        }
        Ok(Self { dir })
    }

    /// Open a history directory, creating it (and parents) if needed.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::Io`] if the directory cannot be created.
    pub fn create(dir: impl Into<PathBuf>) -> Result<Self, HistoryError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|source| HistoryError::Io {
            path: dir.clone(),
            source,
        })?;
        Ok(Self { dir })
    }

    /// The history directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Default file path for a designated date.
    pub fn path_for(&self, date: NaiveDate) -> PathBuf {
        self.dir
            .join(format!("{}.{RECORD_EXTENSION}", date.format("%Y-%m-%d")))
    }

    // -----------------------------------------------------------------------
    // Writes
    // -----------------------------------------------------------------------

    /// Persist a record under the default file name for `date`.
    ///
    /// # Errors
    ///
    /// See [`append_at`](Self::append_at).
    pub fn append(
        &self,
        record: &SnapshotRecord,
        date: NaiveDate,
        force: bool,
    ) -> Result<PathBuf, HistoryError> {
        self.append_at(record, &self.path_for(date), force)
    }

    /// Persist a record at an explicit path.
    ///
    /// Without `force` the write is refused when the path is occupied, when
    /// the record's source timestamp equals that of the most recent stored
    /// record, and when the record was not generated after it. With `force`
    /// every check is skipped and an existing file is replaced.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::WriteConflict`] if the path is occupied,
    /// [`HistoryError::UnchangedSource`] if the source has not moved,
    /// [`HistoryError::OutOfOrder`] if the generation time does not advance,
    /// [`HistoryError::Serialization`] or [`HistoryError::Io`] if reading
    /// the existing history or writing the file fails.
    pub fn append_at(
        &self,
        record: &SnapshotRecord,
        path: &Path,
        force: bool,
    ) -> Result<PathBuf, HistoryError> {
        if !force {
            if path.exists() {
                return Err(HistoryError::WriteConflict {
                    path: path.to_path_buf(),
                });
            }
            self.check_against_latest(record)?;
        }

        let mut json =
            serde_json::to_string_pretty(record).map_err(|source| HistoryError::Serialization {
                path: path.to_path_buf(),
                source,
            })?;
        json.push('\n');

        write_record(path, json.as_bytes(), force)?;
        tracing::info!(
            path = %path.display(),
            generated_at = %orbital_types::timestamp::format_utc(record.generated_at),
            source_timestamp = %record.source_time_label(),
            force,
            "Wrote history snapshot"
        );
        Ok(path.to_path_buf())
    }

    /// Compare a candidate record with the most recently generated one.
    ///
    /// [`HistoryError::UnchangedSource`] when both carry the same known
    /// source timestamp, [`HistoryError::OutOfOrder`] when the candidate's
    /// generation time is not strictly later.
    fn check_against_latest(&self, record: &SnapshotRecord) -> Result<(), HistoryError> {
        let Some(latest) = self.read_entries()?.pop() else {
            return Ok(());
        };
        let unchanged = record
            .source_timestamp
            .filter(|source| latest.record.source_timestamp == Some(*source));
        if let Some(source_timestamp) = unchanged {
            return Err(HistoryError::UnchangedSource {
                source_timestamp,
                latest: latest.path,
            });
        }
        if record.generated_at <= latest.record.generated_at {
            return Err(HistoryError::OutOfOrder {
                generated_at: record.generated_at,
                latest_generated_at: latest.record.generated_at,
                latest: latest.path,
            });
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    /// Every stored record with its file, ascending by generation time.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::Io`] if the directory or a file cannot be
    /// read and [`HistoryError::Serialization`] if a file does not decode.
    pub fn read_entries(&self) -> Result<Vec<StoredSnapshot>, HistoryError> {
        let mut entries = self
            .record_files()?
            .into_iter()
            .map(|path| read_record(&path).map(|record| StoredSnapshot { path, record }))
            .collect::<Result<Vec<_>, _>>()?;
        entries.sort_by_key(|entry| entry.record.generated_at);
        Ok(entries)
    }

    /// Every stored record, ascending by generation time.
    ///
    /// # Errors
    ///
    /// See [`read_entries`](Self::read_entries).
    pub fn read_all(&self) -> Result<Vec<SnapshotRecord>, HistoryError> {
        Ok(self
            .read_entries()?
            .into_iter()
            .map(|entry| entry.record)
            .collect())
    }

    /// The last `n` records of [`read_all`](Self::read_all).
    ///
    /// # Errors
    ///
    /// See [`read_entries`](Self::read_entries).
    pub fn read_latest(&self, n: usize) -> Result<Vec<SnapshotRecord>, HistoryError> {
        let mut all = self.read_all()?;
        let skip = all.len().saturating_sub(n);
        Ok(all.split_off(skip))
    }

    /// The most recently generated record, if any.
    ///
    /// # Errors
    ///
    /// See [`read_entries`](Self::read_entries).
    pub fn latest(&self) -> Result<Option<SnapshotRecord>, HistoryError> {
        Ok(self.read_latest(1)?.pop())
    }

    /// Paths of every `*.json` file in the directory, sorted by name.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::StoreMissing`] if the directory has gone and
    /// [`HistoryError::Io`] if it cannot be listed.
    pub fn record_files(&self) -> Result<Vec<PathBuf>, HistoryError> {
        list_record_files(&self.dir)
    }
}

/// Paths of every `*.json` file in `dir`, sorted by name.
///
/// # Errors
///
/// Returns [`HistoryError::StoreMissing`] if `dir` is not a directory and
/// [`HistoryError::Io`] if it cannot be listed.
pub fn list_record_files(dir: &Path) -> Result<Vec<PathBuf>, HistoryError> {
    if !dir.is_dir() {
        return Err(HistoryError::StoreMissing {
            path: dir.to_path_buf(),
        });
    }
    let io_err = |source| HistoryError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        if !path.is_file() {
            continue;
        }
        if path.extension().is_some_and(|ext| ext == RECORD_EXTENSION) {
            files.push(path);
        } else {
            tracing::warn!(path = %path.display(), "Ignoring non-JSON file in history directory");
        }
    }
    files.sort();
    Ok(files)
}

fn read_record(path: &Path) -> Result<SnapshotRecord, HistoryError> {
    let contents = std::fs::read_to_string(path).map_err(|source| HistoryError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| HistoryError::Serialization {
        path: path.to_path_buf(),
        source,
    })
}

/// Write `bytes` to `path`. Without `force` the file must not exist yet.
fn write_record(path: &Path, bytes: &[u8], force: bool) -> Result<(), HistoryError> {
    let mut options = OpenOptions::new();
    options.write(true);
    if force {
        options.create(true).truncate(true);
    } else {
        options.create_new(true);
    }

    let mut file = options.open(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::AlreadyExists {
            HistoryError::WriteConflict {
                path: path.to_path_buf(),
            }
        } else {
            HistoryError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;
    file.write_all(bytes)
        .and_then(|()| file.sync_all())
        .map_err(|source| HistoryError::Io {
            path: path.to_path_buf(),
            source,
        })
}
