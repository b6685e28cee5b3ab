//! Configuration loading for the runner.
//!
//! The canonical configuration lives in `forage-config.yaml` (or the path in
//! `FORAGE_CONFIG`). Every section is optional; a missing file means all
//! defaults. Environment variables override a few deployment-specific
//! values after the file is parsed:
//!
//! - `FORAGE_API_URL` overrides `source.base_url`
//! - `FORAGE_CACHE_PATH` overrides `source.cache_path`
//! - `FORAGE_RETRY_DELAY_SECS` overrides `runner.retry_delay_secs`
//! - `FORAGE_FORCE_REFRESH` overrides `runner.force_refresh`

use std::path::{Path, PathBuf};
use std::time::Duration;

use forage_core::EngineConfig;
use forage_source::SourceConfig;
use serde::Deserialize;

/// Default config file path, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "forage-config.yaml";

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

    /// An environment override could not be parsed.
    #[error("invalid value for {var}: {value:?}")]
    InvalidOverride {
        /// The environment variable name.
        var: &'static str,
        /// The rejected value.
        value: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level runner configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ForageConfig {
    /// Recipe resolution and ranking settings.
    #[serde(default)]
    pub engine: EngineConfig,

    /// Reference data API and cache settings.
    #[serde(default)]
    pub source: SourceConfig,

    /// Process lifecycle settings.
    #[serde(default)]
    pub runner: RunnerSettings,
}

/// Process lifecycle settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RunnerSettings {
    /// Seconds to wait before retrying a failed catalog load.
    #[serde(default = "default_retry_delay_secs")]
    pub retry_delay_secs: u64,

    /// Ignore the cache file on the first load.
    #[serde(default)]
    pub force_refresh: bool,
}

impl Default for RunnerSettings {
    fn default() -> Self {
        Self {
            retry_delay_secs: default_retry_delay_secs(),
            force_refresh: false,
        }
    }
}

impl RunnerSettings {
    /// Retry delay as a [`Duration`].
    pub const fn retry_delay(&self) -> Duration {
        Duration::from_secs(self.retry_delay_secs)
    }
}

const fn default_retry_delay_secs() -> u64 {
    60
}

impl ForageConfig {
    /// Load configuration from `FORAGE_CONFIG` or [`DEFAULT_CONFIG_PATH`].
    ///
    /// A missing file yields defaults. Environment overrides are applied in
    /// both cases.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file exists but cannot be read or
    /// parsed, or if an override is malformed.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var("FORAGE_CONFIG")
            .map_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);
        let mut config = if path.exists() {
            Self::from_file(&path)?
        } else {
            Self::default()
        };
        config.apply_overrides(|var| std::env::var(var).ok())?;
        Ok(config)
    }

    /// Load configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yml::from_str(yaml)?;
        Ok(config)
    }

    /// Apply overrides from `lookup`, which maps a variable name to its
    /// value if set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidOverride`] if a numeric or boolean
    /// override does not parse.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("FORAGE_API_URL") {
            self.source.base_url = val;
        }
        if let Some(val) = lookup("FORAGE_CACHE_PATH") {
            self.source.cache_path = PathBuf::from(val);
        }
        if let Some(val) = lookup("FORAGE_RETRY_DELAY_SECS") {
            self.runner.retry_delay_secs = val.trim().parse().ok().ok_or_else(|| {
                ConfigError::InvalidOverride {
                    var: "FORAGE_RETRY_DELAY_SECS",
                    value: val.clone(),
                }
            })?;
        }
        if let Some(val) = lookup("FORAGE_FORCE_REFRESH") {
            self.runner.force_refresh = match val.trim().to_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" | "" => false,
                _ => {
                    return Err(ConfigError::InvalidOverride {
                        var: "FORAGE_FORCE_REFRESH",
                        value: val,
                    });
                }
            };
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: BTreeMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |var| map.get(var).cloned()
    }

    #[test]
    fn parse_full_yaml() {
        let yaml = r"
engine:
  result_count: 3
  abundant_yield: 4
source:
  base_url: http://localhost:9000/aesop
  cache_ttl_secs: 60
runner:
  retry_delay_secs: 5
";
        let config = ForageConfig::parse(yaml);
        assert!(config.is_ok());
        let Some(config) = config.ok() else { return };
        assert_eq!(config.engine.result_count, 3);
        assert_eq!(config.engine.abundant_yield, 4);
        assert_eq!(config.source.base_url, "http://localhost:9000/aesop");
        assert_eq!(config.source.cache_ttl_secs, 60);
        assert_eq!(config.source.request_timeout_secs, 30);
        assert_eq!(config.runner.retry_delay_secs, 5);
        assert!(!config.runner.force_refresh);
    }

    #[test]
    fn parse_empty_yaml() {
        assert_eq!(ForageConfig::parse("").ok(), Some(ForageConfig::default()));
    }

    #[test]
    fn invalid_yaml_is_an_error() {
        assert!(matches!(
            ForageConfig::parse("engine: [1, 2"),
            Err(ConfigError::Yaml { .. })
        ));
    }

    #[test]
    fn env_overrides_win() {
        let mut config = ForageConfig::default();
        let result = config.apply_overrides(env(&[
            ("FORAGE_API_URL", "http://mirror/aesop"),
            ("FORAGE_CACHE_PATH", "/var/cache/forage.json"),
            ("FORAGE_RETRY_DELAY_SECS", "15"),
            ("FORAGE_FORCE_REFRESH", "true"),
        ]));
        assert!(result.is_ok());
        assert_eq!(config.source.base_url, "http://mirror/aesop");
        assert_eq!(
            config.source.cache_path,
            PathBuf::from("/var/cache/forage.json")
        );
        assert_eq!(config.runner.retry_delay(), Duration::from_secs(15));
        assert!(config.runner.force_refresh);
    }

    #[test]
    fn malformed_override_is_rejected() {
        let mut config = ForageConfig::default();
        let result = config.apply_overrides(env(&[("FORAGE_RETRY_DELAY_SECS", "soon")]));
        assert!(matches!(
            result,
            Err(ConfigError::InvalidOverride {
                var: "FORAGE_RETRY_DELAY_SECS",
                ..
            })
        ));
        assert_eq!(config.runner.retry_delay_secs, 60);
    }

    #[test]
    fn load_project_config_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join(DEFAULT_CONFIG_PATH);
        if path.exists() {
            let config = ForageConfig::from_file(&path);
            assert!(config.is_ok(), "Failed to load project config: {config:?}");
        }
    }
}
