use std::time::Duration;

use alalfy_core::{ApiConfig, DEFAULT_API_BASE_URL, DEFAULT_FEED_URL};
use thiserror::Error;

/// Base URL of the blog API.
pub const API_BASE_URL_ENV: &str = "ALALFY_API_BASE_URL";
/// Full URL of the feed bridge.
pub const FEED_URL_ENV: &str = "ALALFY_FEED_URL";
/// Whole-request timeout in seconds.
pub const HTTP_TIMEOUT_ENV: &str = "ALALFY_HTTP_TIMEOUT_SECS";
/// Connect timeout in seconds.
pub const CONNECT_TIMEOUT_ENV: &str = "ALALFY_CONNECT_TIMEOUT_SECS";

const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 15;
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, Error, PartialEq, Eq)]
/// Invalid client configuration.
pub enum SettingsError {
    /// A numeric variable is not a positive integer.
    #[error("failed to parse {key}={value:?}, expecting positive integer")]
    InvalidNumber {
        /// Variable name.
        key: &'static str,
        /// Raw value.
        value: String,
    },

    /// A numeric variable is zero.
    #[error("{key} must be > 0")]
    Zero {
        /// Variable name.
        key: &'static str,
    },

    /// A URL variable is empty or not http(s).
    #[error("{key} must be an http(s) URL, got {value:?}")]
    InvalidUrl {
        /// Variable name.
        key: &'static str,
        /// Raw value.
        value: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Native client settings.
pub struct Settings {
    /// Base URL of the blog API.
    pub api_base_url: String,
    /// Full URL of the feed bridge.
    pub feed_url: String,
    /// Whole-request timeout.
    pub http_timeout: Duration,
    /// Connect timeout.
    pub connect_timeout: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            feed_url: DEFAULT_FEED_URL.to_string(),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
        }
    }
}

impl Settings {
    /// Reads settings from the process environment.
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through `lookup`; unset variables take their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, SettingsError> {
        let api_base_url = parse_url(&lookup, API_BASE_URL_ENV, DEFAULT_API_BASE_URL)?;
        let feed_url = parse_url(&lookup, FEED_URL_ENV, DEFAULT_FEED_URL)?;
        let http_timeout_secs = parse_u64(&lookup, HTTP_TIMEOUT_ENV, DEFAULT_HTTP_TIMEOUT_SECS)?;
        let connect_timeout_secs =
            parse_u64(&lookup, CONNECT_TIMEOUT_ENV, DEFAULT_CONNECT_TIMEOUT_SECS)?;

        Ok(Self {
            api_base_url,
            feed_url,
            http_timeout: Duration::from_secs(http_timeout_secs),
            connect_timeout: Duration::from_secs(connect_timeout_secs),
        })
    }

    /// Overrides the API base URL.
    pub fn with_api_base_url(mut self, url: &str) -> Result<Self, SettingsError> {
        self.api_base_url = validate_url(API_BASE_URL_ENV, url)?;
        Ok(self)
    }

    /// Overrides the feed URL.
    pub fn with_feed_url(mut self, url: &str) -> Result<Self, SettingsError> {
        self.feed_url = validate_url(FEED_URL_ENV, url)?;
        Ok(self)
    }

    /// Endpoints handed to the content layer.
    pub fn api_config(&self) -> ApiConfig {
        ApiConfig {
            base_url: self.api_base_url.clone(),
            feed_url: self.feed_url.clone(),
        }
    }
}

fn parse_url(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: &str,
) -> Result<String, SettingsError> {
    match lookup(key) {
        Some(raw) => validate_url(key, &raw),
        None => Ok(default.to_string()),
    }
}

fn validate_url(key: &'static str, raw: &str) -> Result<String, SettingsError> {
    let value = raw.trim();
    let has_host = value
        .strip_prefix("https://")
        .or_else(|| value.strip_prefix("http://"))
        .is_some_and(|rest| !rest.is_empty());
    if !has_host {
        return Err(SettingsError::InvalidUrl {
            key,
            value: raw.to_string(),
        });
    }
    Ok(value.to_string())
}

fn parse_u64(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: u64,
) -> Result<u64, SettingsError> {
    let Some(raw) = lookup(key) else {
        return Ok(default);
    };
    let value = raw
        .trim()
        .parse::<u64>()
        .map_err(|_| SettingsError::InvalidNumber {
            key,
            value: raw.clone(),
        })?;

    if value == 0 {
        return Err(SettingsError::Zero { key });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let settings = Settings::from_lookup(lookup(&[])).expect("defaults must be valid");
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.api_config(), ApiConfig::default());
        assert_eq!(settings.http_timeout, Duration::from_secs(15));
        assert_eq!(settings.connect_timeout, Duration::from_secs(5));
    }

    #[test]
    fn reads_overrides() {
        let settings = Settings::from_lookup(lookup(&[
            (API_BASE_URL_ENV, " http://127.0.0.1:9000/api "),
            (HTTP_TIMEOUT_ENV, "30"),
        ]))
        .expect("settings must parse");

        assert_eq!(settings.api_base_url, "http://127.0.0.1:9000/api");
        assert_eq!(settings.http_timeout, Duration::from_secs(30));
        assert_eq!(settings.feed_url, DEFAULT_FEED_URL);
    }

    #[test]
    fn rejects_zero_and_garbage_numbers() {
        assert_eq!(
            Settings::from_lookup(lookup(&[(CONNECT_TIMEOUT_ENV, "0")])),
            Err(SettingsError::Zero {
                key: CONNECT_TIMEOUT_ENV
            })
        );
        assert!(matches!(
            Settings::from_lookup(lookup(&[(HTTP_TIMEOUT_ENV, "ten")])),
            Err(SettingsError::InvalidNumber { .. })
        ));
    }

    #[test]
    fn rejects_non_http_urls() {
        for bad in ["", "ftp://x", "https://", "blog-backend.alalfy.com"] {
            assert!(
                Settings::from_lookup(lookup(&[(FEED_URL_ENV, bad)])).is_err(),
                "{bad:?} must be rejected"
            );
        }
    }

    #[test]
    fn flag_overrides_are_validated() {
        let settings = Settings::default()
            .with_api_base_url("http://localhost:8080/api")
            .expect("valid url");
        assert_eq!(settings.api_base_url, "http://localhost:8080/api");
        assert!(Settings::default().with_feed_url("nope").is_err());
    }
}
