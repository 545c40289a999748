//! UTC timestamp rendering shared by every persisted and reported field.

use chrono::{DateTime, SecondsFormat, Utc};

/// Literal used wherever a source timestamp is not known.
pub const UNKNOWN: &str = "unknown";

/// Render a UTC instant as ISO-8601 with a `Z` suffix.
pub fn format_utc(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// Render an optional instant, falling back to [`UNKNOWN`].
pub fn label(at: Option<DateTime<Utc>>) -> String {
    at.map_or_else(|| UNKNOWN.to_owned(), format_utc)
}

/// Parse an ISO-8601 timestamp carrying an explicit offset (`Z` or `+hh:mm`).
pub fn parse_utc(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(raw.trim()).map(|dt| dt.with_timezone(&Utc))
}

/// Serde adapter for the optional `data_snapshot_time_utc` field.
///
/// Writes `Z`-suffixed ISO-8601. Reads a missing value, `null`, an empty
/// string, or the literal `"unknown"` as `None`.
pub mod source_time {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    /// Serialize an optional source time.
    #[allow(clippy::ref_option)]
    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(at) => serializer.serialize_str(&super::format_utc(*at)),
            None => serializer.serialize_none(),
        }
    }

    /// Deserialize an optional source time.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("" | super::UNKNOWN) => Ok(None),
            Some(text) => super::parse_utc(text)
                .map(Some)
                .map_err(serde::de::Error::custom),
        }
    }
}
