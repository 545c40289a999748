//! Read-only schema and consistency audit of a history directory.
//!
//! Works on raw [`serde_json::Value`]s rather than typed records so a
//! single bad field is reported instead of aborting the file. Every
//! problem found is collected; nothing is thrown and nothing is written.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use chrono::{DateTime, Utc};
use orbital_types::{Regime, timestamp};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::HistoryError;
use crate::store::list_record_files;

/// Keys every zone entry must carry, in report order.
const REQUIRED_ZONE_KEYS: [&str; 3] = ["zone_label", "count", "zpi"];

/// One validation finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Problem {
    /// File name, or the directory for store-level findings.
    pub file: String,
    /// What is wrong.
    pub message: String,
}

impl Problem {
    fn new(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.file, self.message)
    }
}

/// Which file first used each timestamp, per timestamp field.
#[derive(Debug, Default)]
struct SeenTimes {
    generated: HashMap<DateTime<Utc>, String>,
    source: HashMap<DateTime<Utc>, String>,
}

/// Audit every `*.json` record in `dir`.
pub fn validate_store(dir: &Path) -> Vec<Problem> {
    let dir_label = dir.display().to_string();
    let files = match list_record_files(dir) {
        Ok(files) => files,
        Err(HistoryError::StoreMissing { .. }) => {
            return vec![Problem::new(dir_label, "History directory does not exist.")];
        }
        Err(err) => return vec![Problem::new(dir_label, err.to_string())],
    };
    if files.is_empty() {
        return vec![Problem::new(
            dir_label,
            "No history snapshots found (*.json).",
        )];
    }

    let mut problems = Vec::new();
    let mut seen = SeenTimes::default();
    for path in &files {
        let name = path.file_name().map_or_else(
            || path.display().to_string(),
            |n| n.to_string_lossy().into_owned(),
        );
        let value = match std::fs::read_to_string(path) {
            Ok(text) => serde_json::from_str::<Value>(&text),
            Err(err) => {
                problems.push(Problem::new(name, format!("Unreadable file: {err}")));
                continue;
            }
        };
        match value {
            Ok(value) => validate_record(&name, &value, &mut seen, &mut problems),
            Err(err) => problems.push(Problem::new(name, format!("Invalid JSON: {err}"))),
        }
    }

    tracing::debug!(
        dir = %dir.display(),
        files = files.len(),
        problems = problems.len(),
        "Validated history"
    );
    problems
}

fn validate_record(file: &str, value: &Value, seen: &mut SeenTimes, problems: &mut Vec<Problem>) {
    let mut report = |message: String| problems.push(Problem::new(file, message));

    let Some(obj) = value.as_object() else {
        report("Snapshot must be a JSON object.".to_owned());
        return;
    };

    check_generated_at(file, obj, &mut seen.generated, &mut report);
    check_source_time(file, obj, &mut seen.source, &mut report);
    check_regimes(obj, &mut report);
    check_zones(obj, &mut report);

    if obj.get("tracked_objects").is_some_and(|t| !t.is_object() && !t.is_null()) {
        report("'tracked_objects' must be an object when present.".to_owned());
    }
}

fn check_generated_at(
    file: &str,
    obj: &Map<String, Value>,
    seen: &mut HashMap<DateTime<Utc>, String>,
    report: &mut impl FnMut(String),
) {
    let raw = match obj.get("snapshot_time_utc").and_then(Value::as_str) {
        Some(raw) if !raw.trim().is_empty() => raw,
        _ => {
            report(
                "Missing or invalid 'snapshot_time_utc' (must be non-empty string).".to_owned(),
            );
            return;
        }
    };
    match timestamp::parse_utc(raw) {
        Ok(at) => check_duplicate(file, "snapshot_time_utc", raw, at, seen, report),
        Err(err) => report(format!("Invalid snapshot_time_utc format: {raw:?} ({err}).")),
    }
}

fn check_source_time(
    file: &str,
    obj: &Map<String, Value>,
    seen: &mut HashMap<DateTime<Utc>, String>,
    report: &mut impl FnMut(String),
) {
    let raw = match obj.get("data_snapshot_time_utc") {
        None | Some(Value::Null) => return,
        Some(Value::String(raw)) => raw.trim(),
        Some(_) => {
            report("'data_snapshot_time_utc' must be a string when present.".to_owned());
            return;
        }
    };
    if raw.is_empty() || raw == timestamp::UNKNOWN {
        return;
    }
    match timestamp::parse_utc(raw) {
        Ok(at) => check_duplicate(file, "data_snapshot_time_utc", raw, at, seen, report),
        Err(err) => report(format!(
            "Invalid data_snapshot_time_utc format: {raw:?} ({err})."
        )),
    }
}

fn check_duplicate(
    file: &str,
    key: &str,
    raw: &str,
    at: DateTime<Utc>,
    seen: &mut HashMap<DateTime<Utc>, String>,
    report: &mut impl FnMut(String),
) {
    if let Some(first) = seen.get(&at) {
        report(format!("Duplicate {key} {raw:?} (already used in {first})."));
    } else {
        seen.insert(at, file.to_owned());
    }
}

fn check_regimes(obj: &Map<String, Value>, report: &mut impl FnMut(String)) {
    let Some(regimes) = obj.get("active_regimes").and_then(Value::as_object) else {
        report("Missing or invalid 'active_regimes' (must be an object).".to_owned());
        return;
    };
    for regime in Regime::COUNTED {
        let key = regime.label();
        match regimes.get(key) {
            None => report(format!("active_regimes missing key {key:?}.")),
            Some(v) if !is_non_negative_number(v) => {
                report(format!("active_regimes[{key}] must be a non-negative number."));
            }
            Some(_) => {}
        }
    }
}

fn check_zones(obj: &Map<String, Value>, report: &mut impl FnMut(String)) {
    let Some(zones) = obj.get("leo_zones").or_else(|| obj.get("zones")) else {
        report("Missing 'leo_zones' (preferred) or 'zones' array.".to_owned());
        return;
    };
    let Some(zones) = zones.as_array().filter(|z| !z.is_empty()) else {
        report("'leo_zones'/'zones' must be a non-empty list.".to_owned());
        return;
    };

    let mut labels_seen: Vec<&str> = Vec::with_capacity(zones.len());
    for (i, zone) in zones.iter().enumerate() {
        let Some(zone) = zone.as_object() else {
            report(format!("zones[{i}] must be an object."));
            continue;
        };

        let missing: Vec<&str> = REQUIRED_ZONE_KEYS
            .into_iter()
            .filter(|key| !zone.contains_key(*key))
            .collect();
        if !missing.is_empty() {
            report(format!("zones[{i}] missing keys: {missing:?}"));
            continue;
        }

        match zone.get("zone_label").and_then(Value::as_str).map(str::trim) {
            Some(label) if !label.is_empty() => {
                if labels_seen.contains(&label) {
                    report(format!("Duplicate zone_label {label:?} in zones array."));
                } else {
                    labels_seen.push(label);
                }
            }
            _ => report(format!("zones[{i}].zone_label must be a non-empty string.")),
        }

        if !zone.get("count").is_some_and(is_non_negative_number) {
            report(format!("zones[{i}].count must be a non-negative number."));
        }

        match zone.get("zpi").and_then(Value::as_f64) {
            Some(zpi) if (0.0..=100.0).contains(&zpi) => {}
            Some(zpi) => report(format!("zones[{i}].zpi out of range 0..100 (got {zpi}).")),
            None => report(format!("zones[{i}].zpi must be a number.")),
        }
    }
}

fn is_non_negative_number(value: &Value) -> bool {
    value.as_f64().is_some_and(|v| v >= 0.0)
}
