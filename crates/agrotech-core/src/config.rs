//! Runtime configuration.
//!
//! Loaded from an optional TOML file, then overridden by environment
//! variables. Every field has a default so an empty file is valid.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use agrotech_insight::{DEFAULT_ENDPOINT, DEFAULT_MODEL};

/// Environment variable holding the insight API credential.
pub const API_KEY_ENV: &str = "AGROTECH_API_KEY";

/// Environment variable holding the tracing filter.
pub const LOG_ENV: &str = "AGROTECH_LOG";

/// Default artificial login delay.
pub const DEFAULT_LOGIN_DELAY_MS: u64 = 800;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Settings for the optional insight feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InsightConfig {
    /// API credential; the feature is off without one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    pub model: String,
    pub endpoint: String,
}

impl Default for InsightConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.into(),
            endpoint: DEFAULT_ENDPOINT.into(),
        }
    }
}

impl InsightConfig {
    pub fn enabled(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.trim().is_empty())
    }
}

/// Application settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// SQLite file holding the collections
    pub database_path: PathBuf,
    /// Artificial delay applied to every login attempt
    pub login_delay_ms: u64,
    /// `tracing` filter directive, e.g. `agrotech_core=debug`
    pub log_filter: String,
    pub insight: InsightConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from("agrotech.db"),
            login_delay_ms: DEFAULT_LOGIN_DELAY_MS,
            log_filter: "info".into(),
            insight: InsightConfig::default(),
        }
    }
}

impl AppConfig {
    /// Parse TOML text.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Load from a file (if given and present), then apply the environment.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) if path.exists() => {
                let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })?;
                Self::from_toml(&text)?
            }
            _ => Self::default(),
        };
        config.apply_env(|name| std::env::var(name).ok());
        Ok(config)
    }

    /// Override fields from environment lookups.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup(API_KEY_ENV).filter(|k| !k.is_empty()) {
            self.insight.api_key = Some(key);
        }
        if let Some(filter) = lookup(LOG_ENV).filter(|f| !f.is_empty()) {
            self.log_filter = filter;
        }
    }

    pub fn login_delay(&self) -> Duration {
        Duration::from_millis(self.login_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.login_delay(), Duration::from_millis(800));
        assert!(!config.insight.enabled());
    }

    #[test]
    fn test_partial_toml() {
        let config = AppConfig::from_toml(
            r#"
            login_delay_ms = 0

            [insight]
            api_key = "abc"
            "#,
        )
        .unwrap();

        assert_eq!(config.login_delay_ms, 0);
        assert!(config.insight.enabled());
        assert_eq!(config.insight.model, DEFAULT_MODEL);
        assert_eq!(config.insight.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.database_path, PathBuf::from("agrotech.db"));
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            AppConfig::from_toml("login_delay_ms = \"soon\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = AppConfig::default();
        config.apply_env(|name| match name {
            API_KEY_ENV => Some("secret".into()),
            LOG_ENV => Some("agrotech_core=debug".into()),
            _ => None,
        });
        assert_eq!(config.insight.api_key.as_deref(), Some("secret"));
        assert_eq!(config.log_filter, "agrotech_core=debug");
    }

    #[test]
    fn test_blank_key_is_disabled() {
        let insight = InsightConfig {
            api_key: Some("  ".into()),
            ..Default::default()
        };
        assert!(!insight.enabled());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("agrotech.toml");
        std::fs::write(&path, "database_path = \"/tmp/farm.db\"\n").unwrap();

        let config = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(config.database_path, PathBuf::from("/tmp/farm.db"));

        let missing = AppConfig::load(Some(&dir.path().join("absent.toml"))).unwrap();
        assert_eq!(missing.database_path, PathBuf::from("agrotech.db"));
    }

    #[test]
    fn test_env_log_filter_reaches_subscriber_filter() {
        let mut config = AppConfig::default();
        config.apply_env(|name| (name == LOG_ENV).then(|| "agrotech_core=debug".into()));

        let filter = crate::logging::build_filter(&config.log_filter).unwrap();
        assert!(filter.to_string().contains("agrotech_core=debug"));
    }
}
