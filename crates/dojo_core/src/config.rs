//! Configuration loading from environment variables.

use crate::constants::{DEFAULT_API_URL, DEFAULT_POLL_INTERVAL, DEFAULT_UPLOADS_URL};
use std::env;
use std::time::Duration;

/// Runtime configuration for the admin console.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_url: String,
    pub uploads_url: String,
    pub poll_interval: Duration,
    /// `None` leaves requests without a deadline.
    pub request_timeout: Option<Duration>,
    pub assume_yes: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            uploads_url: DEFAULT_UPLOADS_URL.to_string(),
            poll_interval: DEFAULT_POLL_INTERVAL,
            request_timeout: None,
            assume_yes: false,
        }
    }
}

/// Parse a boolean-like environment flag value.
///
/// # Supported Values
/// - Truthy: `1`, `true`, `yes`, `on`
/// - Falsy: `0`, `false`, `no`, `off`, empty string
///
/// Matching is case-insensitive and ignores surrounding whitespace.
///
/// # Returns
/// `Some(bool)` when the value is recognized, otherwise `None`.
pub fn parse_env_flag(value: &str) -> Option<bool> {
    let normalized = value.trim().to_ascii_lowercase();
    match normalized.as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "" | "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn trim_trailing_slashes(mut url: String) -> String {
    while url.ends_with('/') {
        url.pop();
    }
    url
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Returns
    /// A populated [`Config`] with defaults applied when env vars are missing.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// Unparseable numeric values fall back to their defaults with a warning.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let poll_interval = match non_blank(lookup("DOJO_POLL_INTERVAL_MS")) {
            Some(raw) => match raw.parse::<u64>() {
                Ok(ms) if ms > 0 => Duration::from_millis(ms),
                _ => {
                    tracing::warn!(
                        "Invalid DOJO_POLL_INTERVAL_MS='{}'; using {} ms",
                        raw,
                        defaults.poll_interval.as_millis()
                    );
                    defaults.poll_interval
                }
            },
            None => defaults.poll_interval,
        };
        let request_timeout = non_blank(lookup("DOJO_REQUEST_TIMEOUT_SECS")).and_then(|raw| {
            match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => Some(Duration::from_secs(secs)),
                _ => {
                    tracing::warn!("Invalid DOJO_REQUEST_TIMEOUT_SECS='{}'; ignoring", raw);
                    None
                }
            }
        });

        Self {
            api_url: non_blank(lookup("DOJO_API_URL"))
                .map(trim_trailing_slashes)
                .unwrap_or(defaults.api_url),
            uploads_url: non_blank(lookup("DOJO_UPLOADS_URL"))
                .map(trim_trailing_slashes)
                .unwrap_or(defaults.uploads_url),
            poll_interval,
            request_timeout,
            assume_yes: lookup("DOJO_ASSUME_YES")
                .and_then(|value| parse_env_flag(&value))
                .unwrap_or(false),
        }
    }

    /// URL of a persisted photo, used as the preview when editing a record.
    pub fn photo_url(&self, photo: &str) -> String {
        format!("{}/{}", self.uploads_url, photo.trim_start_matches('/'))
    }
}
