//! services/client/src/config.rs
//!
//! Defines the client's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use crate::store::sync::DataSource;
use std::time::Duration;
use tracing::Level;

const DEFAULT_API_URL: &str = "http://172.20.10.3:8000/api/auth";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_TOAST_SECS: u64 = 3;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    /// Base URL every endpoint path is appended to, without a trailing slash.
    pub api_base_url: String,
    pub request_timeout: Duration,
    pub toast_duration: Duration,
    pub data_source: DataSource,
    pub log_level: Level,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    pub fn from_vars<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // --- Backend Settings ---
        let api_base_url = lookup("TRACKER_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let api_base_url = parse_base_url(&api_base_url)?;

        let request_timeout = parse_secs(&lookup, "TRACKER_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?;
        let toast_duration = parse_secs(&lookup, "TRACKER_TOAST_SECS", DEFAULT_TOAST_SECS)?;

        let data_source_str = lookup("TRACKER_DATA_SOURCE").unwrap_or_else(|| "live".to_string());
        let data_source = data_source_str.parse::<DataSource>().map_err(|reason| {
            ConfigError::InvalidValue("TRACKER_DATA_SOURCE".to_string(), reason)
        })?;

        // --- Logging ---
        let log_level_str = lookup("RUST_LOG").unwrap_or_else(|| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        Ok(Self {
            api_base_url,
            request_timeout,
            toast_duration,
            data_source,
            log_level,
        })
    }
}

fn parse_base_url(raw: &str) -> Result<String, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidValue("TRACKER_API_URL".to_string(), reason);
    let url = reqwest::Url::parse(raw.trim()).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }
    Ok(url.as_str().trim_end_matches('/').to_string())
}

fn parse_secs<F>(lookup: &F, key: &str, default: u64) -> Result<Duration, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return Ok(Duration::from_secs(default));
    };
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::InvalidValue(
            key.to_string(),
            format!("'{}' is not a positive number of seconds", raw),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_vars(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.api_base_url, "http://172.20.10.3:8000/api/auth");
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.toast_duration, Duration::from_secs(3));
        assert_eq!(config.data_source, DataSource::Live);
        assert_eq!(config.log_level, Level::INFO);
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let config =
            config_from(&[("TRACKER_API_URL", "https://tracker.example/api/auth/")]).unwrap();
        assert_eq!(config.api_base_url, "https://tracker.example/api/auth");
    }

    #[test]
    fn rejects_non_http_base_url() {
        let err = config_from(&[("TRACKER_API_URL", "ftp://tracker.example")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(ref key, _) if key == "TRACKER_API_URL"));
    }

    #[test]
    fn rejects_zero_toast_duration() {
        let err = config_from(&[("TRACKER_TOAST_SECS", "0")]).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue(ref key, _) if key == "TRACKER_TOAST_SECS"
        ));
    }

    #[test]
    fn rejects_unknown_log_level() {
        assert!(config_from(&[("RUST_LOG", "loud")]).is_err());
    }

    #[cfg(any(debug_assertions, feature = "preview"))]
    #[test]
    fn fixture_source_is_selectable_in_debug_builds() {
        let config = config_from(&[("TRACKER_DATA_SOURCE", "fixture")]).unwrap();
        assert_eq!(config.data_source, DataSource::Fixture);
    }
}
