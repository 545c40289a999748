//! Error types for the validator tool.

/// Top-level error for the validator tool.
///
/// Validation findings are not errors; this covers the tool failing to run
/// at all. Every variant exits with code 1.
#[derive(Debug, thiserror::Error)]
pub enum AuditToolError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: orbital_core::ConfigError,
    },

    /// Encoding the JSON report failed.
    #[error("failed to encode report: {source}")]
    Report {
        /// The underlying JSON error.
        #[from]
        source: serde_json::Error,
    },
}
