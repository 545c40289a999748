//! Configuration loading and typed config structures.
//!
//! The configuration lives in `orbital-config.yaml` at the project root.
//! Every field has a default, so an absent file or an empty document yields
//! a working configuration.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Default configuration file name.
pub const DEFAULT_CONFIG_FILE: &str = "orbital-config.yaml";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct OrbitalConfig {
    /// Catalog source settings.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// History store settings.
    #[serde(default)]
    pub history: HistoryConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl OrbitalConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// Environment variables override YAML values:
    /// - `ORBITAL_CATALOG_PATH` overrides `catalog.path`
    /// - `ORBITAL_HISTORY_DIR` overrides `history.dir`
    /// - `ORBITAL_LOG_LEVEL` overrides `logging.level`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string, then apply env overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        // serde_yml reads an empty document as unit, not an empty mapping.
        let mut config: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yml::from_str(yaml)?
        };
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from `path` when it exists, defaults (plus env overrides)
    /// otherwise.
    ///
    /// # Errors
    ///
    /// Same as [`from_file`](Self::from_file) for an existing file.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            return Self::from_file(path);
        }
        tracing::debug!(path = %path.display(), "Config file not found, using defaults");
        let mut config = Self::default();
        config.apply_env_overrides();
        Ok(config)
    }

    /// Override fields from the process environment.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Override fields from an arbitrary variable lookup.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("ORBITAL_CATALOG_PATH") {
            self.catalog.path = PathBuf::from(val);
        }
        if let Some(val) = lookup("ORBITAL_HISTORY_DIR") {
            self.history.dir = PathBuf::from(val);
        }
        if let Some(val) = lookup("ORBITAL_LOG_LEVEL") {
            self.logging.level = val;
        }
    }
}

/// Catalog source configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CatalogConfig {
    /// Path of the active-satellite CSV file.
    #[serde(default = "default_catalog_path")]
    pub path: PathBuf,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: default_catalog_path(),
        }
    }
}

/// History store configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HistoryConfig {
    /// Directory holding one JSON file per snapshot.
    #[serde(default = "default_history_dir")]
    pub dir: PathBuf,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            dir: default_history_dir(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` wins.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions
// ---------------------------------------------------------------------------

fn default_catalog_path() -> PathBuf {
    PathBuf::from("data/active-satellites.csv")
}

fn default_history_dir() -> PathBuf {
    PathBuf::from("data/history")
}

fn default_log_level() -> String {
    "info".to_owned()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    #[test]
    fn defaults_point_at_data_dir() {
        let config = OrbitalConfig::default();
        assert_eq!(config.catalog.path, PathBuf::from("data/active-satellites.csv"));
        assert_eq!(config.history.dir, PathBuf::from("data/history"));
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn partial_yaml_keeps_remaining_defaults() {
        let mut config: OrbitalConfig = serde_yml::from_str(
            "history:\n  dir: /var/lib/orbital/history\n",
        )
        .unwrap();
        config.apply_overrides(|_| None);
        assert_eq!(config.history.dir, PathBuf::from("/var/lib/orbital/history"));
        assert_eq!(config.catalog.path, PathBuf::from("data/active-satellites.csv"));
    }

    #[test]
    fn full_yaml() {
        let yaml = "\
catalog:
  path: feeds/active.csv
history:
  dir: out/history
logging:
  level: debug
";
        let config: OrbitalConfig = serde_yml::from_str(yaml).unwrap();
        assert_eq!(config.catalog.path, PathBuf::from("feeds/active.csv"));
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn overrides_replace_file_values() {
        let env: BTreeMap<&str, &str> = [
            ("ORBITAL_CATALOG_PATH", "/tmp/catalog.csv"),
            ("ORBITAL_LOG_LEVEL", "trace"),
        ]
        .into_iter()
        .collect();

        let mut config = OrbitalConfig::default();
        config.apply_overrides(|key| env.get(key).map(|v| (*v).to_owned()));

        assert_eq!(config.catalog.path, PathBuf::from("/tmp/catalog.csv"));
        assert_eq!(config.history.dir, PathBuf::from("data/history"));
        assert_eq!(config.logging.level, "trace");
    }

    #[test]
    fn invalid_yaml_is_an_error() {
        assert!(matches!(
            OrbitalConfig::parse("catalog: [unclosed"),
            Err(ConfigError::Yaml { .. })
        ));
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = OrbitalConfig::load_or_default(&dir.path().join("absent.yaml")).unwrap();
        assert_eq!(config.catalog, OrbitalConfig::default().catalog);
    }
}
