//! Configuration management for msqadm
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files and environment variables.

use crate::error::{MsqAdminError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure for msqadm
///
/// This structure holds everything the client needs: backend endpoint
/// settings, query-cache tuning, version-check settings, and the default
/// locale/timezone preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Backend API settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Query cache settings
    #[serde(default)]
    pub cache: CacheConfig,

    /// Deployed-version check settings
    #[serde(default)]
    pub version: VersionConfig,

    /// Default locale for operator-facing strings
    #[serde(default = "default_locale")]
    pub locale: String,

    /// Default IANA timezone used when rendering timestamps
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

/// Backend API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the admin backend (e.g. `https://admin-api.msq.example`)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_timeout() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout(),
        }
    }
}

/// Query cache configuration
///
/// `stale_seconds` controls how long a cached list response is served without
/// refetching; `gc_seconds` controls when entries are evicted entirely.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Seconds before a cached response is considered stale
    #[serde(default = "default_stale_seconds")]
    pub stale_seconds: u64,

    /// Seconds before a cached response is garbage-collected
    #[serde(default = "default_gc_seconds")]
    pub gc_seconds: u64,
}

fn default_stale_seconds() -> u64 {
    30
}

fn default_gc_seconds() -> u64 {
    300
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            stale_seconds: default_stale_seconds(),
            gc_seconds: default_gc_seconds(),
        }
    }
}

/// Deployed-version check configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionConfig {
    /// Path of the version endpoint on the backend
    #[serde(default = "default_version_path")]
    pub path: String,

    /// Poll interval in seconds for `VersionChecker::watch`
    #[serde(default = "default_poll_seconds")]
    pub poll_seconds: u64,
}

fn default_version_path() -> String {
    "/version".to_string()
}

fn default_poll_seconds() -> u64 {
    300
}

impl Default for VersionConfig {
    fn default() -> Self {
        Self {
            path: default_version_path(),
            poll_seconds: default_poll_seconds(),
        }
    }
}

fn default_locale() -> String {
    "en".to_string()
}

fn default_timezone() -> String {
    "UTC".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            cache: CacheConfig::default(),
            version: VersionConfig::default(),
            locale: default_locale(),
            timezone: default_timezone(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file, then apply environment overrides
    ///
    /// A missing file is not an error: defaults are used so the CLI works
    /// out of the box against a locally configured backend. The
    /// `MSQADM_API_BASE` environment variable, when set, overrides
    /// `api.base_url` regardless of the file contents.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the YAML configuration file
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    ///
    /// # Examples
    ///
    /// ```
    /// use msqadm::config::Config;
    ///
    /// let config = Config::load("does/not/exist.yaml").unwrap();
    /// assert_eq!(config.locale, "en");
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(path).map_err(MsqAdminError::Io)?;
            serde_yaml::from_str(&contents).map_err(MsqAdminError::Yaml)?
        } else {
            tracing::debug!("Config file {} not found, using defaults", path.display());
            Self::default()
        };

        if let Ok(base) = std::env::var("MSQADM_API_BASE") {
            tracing::debug!("Overriding api.base_url from MSQADM_API_BASE");
            config.api.base_url = base;
        }

        Ok(config)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns [`MsqAdminError::Config`] if the base URL does not parse, the
    /// staleness window is not shorter than the GC window, or the version
    /// poll interval is zero.
    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.api.base_url).map_err(|e| {
            MsqAdminError::Config(format!("invalid api.base_url '{}': {}", self.api.base_url, e))
        })?;

        if self.api.timeout_seconds == 0 {
            return Err(MsqAdminError::Config("api.timeout_seconds must be > 0".into()).into());
        }

        if self.cache.stale_seconds >= self.cache.gc_seconds {
            return Err(MsqAdminError::Config(format!(
                "cache.stale_seconds ({}) must be shorter than cache.gc_seconds ({})",
                self.cache.stale_seconds, self.cache.gc_seconds
            ))
            .into());
        }

        if self.version.poll_seconds == 0 {
            return Err(MsqAdminError::Config("version.poll_seconds must be > 0".into()).into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.timezone, "UTC");
        assert_eq!(config.cache.stale_seconds, 30);
    }

    #[test]
    #[serial_test::serial]
    fn test_load_missing_file_uses_defaults() {
        let config = Config::load("definitely/not/here.yaml").unwrap();
        assert_eq!(config.api.timeout_seconds, 30);
    }

    #[test]
    #[serial_test::serial]
    fn test_env_override_wins_over_file() {
        std::env::set_var("MSQADM_API_BASE", "https://override.msq.example");
        let config = Config::load("definitely/not/here.yaml").unwrap();
        std::env::remove_var("MSQADM_API_BASE");
        assert_eq!(config.api.base_url, "https://override.msq.example");
    }

    #[test]
    #[serial_test::serial]
    fn test_load_partial_yaml_fills_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "api:\n  base_url: https://admin.msq.example").unwrap();
        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.api.base_url, "https://admin.msq.example");
        assert_eq!(config.api.timeout_seconds, 30);
        assert_eq!(config.version.path, "/version");
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let mut config = Config::default();
        config.api.base_url = "not a url".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_stale_window_must_be_shorter_than_gc() {
        let mut config = Config::default();
        config.cache.stale_seconds = 600;
        config.cache.gc_seconds = 300;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("stale_seconds"));
    }

    #[test]
    fn test_zero_poll_interval_rejected() {
        let mut config = Config::default();
        config.version.poll_seconds = 0;
        assert!(config.validate().is_err());
    }
}
