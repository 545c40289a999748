//! Error types for the generation tool.
//!
//! [`SnapshotToolError`] wraps every failure the tool can hit and maps it
//! to the process exit code.

use orbital_history::HistoryError;

/// Exit code when the target file already exists.
pub const EXIT_WRITE_CONFLICT: u8 = 2;

/// Exit code when the catalog has not changed since the last snapshot.
pub const EXIT_UNCHANGED_SOURCE: u8 = 3;

/// Exit code for every other failure.
pub const EXIT_FAILURE: u8 = 1;

/// Top-level error for the generation tool.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotToolError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: orbital_core::ConfigError,
    },

    /// Building the snapshot failed.
    #[error("snapshot error: {source}")]
    Snapshot {
        /// The underlying builder error.
        #[from]
        source: orbital_core::SnapshotError,
    },

    /// Reading or appending history failed.
    #[error("history error: {source}")]
    History {
        /// The underlying store error.
        #[from]
        source: HistoryError,
    },
}

impl SnapshotToolError {
    /// Process exit code for this failure.
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::History {
                source: HistoryError::WriteConflict { .. },
            } => EXIT_WRITE_CONFLICT,
            Self::History {
                source: HistoryError::UnchangedSource { .. },
            } => EXIT_UNCHANGED_SOURCE,
            _ => EXIT_FAILURE,
        }
    }

    /// Operator hint printed after the error, if any.
    pub const fn hint(&self) -> Option<&'static str> {
        match self.exit_code() {
            EXIT_WRITE_CONFLICT => {
                Some("Use --force to overwrite, or choose a different --date/--out.")
            }
            EXIT_UNCHANGED_SOURCE => Some("Use --force to record the same catalog again."),
            _ => None,
        }
    }
}
