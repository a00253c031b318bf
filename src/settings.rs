//! Service settings parsed from environment variables.

use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_ANALYTICS_URL: &str = "http://127.0.0.1:8001";
pub const DEFAULT_RECORDING_URL: &str = "http://localhost:8080";
pub const DEFAULT_STORE_PATH: &str = "dashboard-store.json";
pub const DEFAULT_KPI_POLL_INTERVAL_SECS: u64 = 5;
pub const DEFAULT_HEALTH_POLL_INTERVAL_SECS: u64 = 10;
pub const DEFAULT_HTTP_REQUEST_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_HTTP_CONNECT_TIMEOUT_SECS: u64 = 5;
pub const DEFAULT_TOAST_DURATION_MS: u64 = 5000;

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("settings parse failed: {0}")]
    Parse(String),
}

/// Where real-time classroom snapshots come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalyticsSourceKind {
    Http,
    Mock,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpTimeouts {
    pub request: Duration,
    pub connect: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub port: u16,
    pub analytics_url: String,
    pub analytics_source: AnalyticsSourceKind,
    pub recording_url: String,
    pub store_path: PathBuf,
    pub kpi_poll_interval: Duration,
    pub health_poll_interval: Duration,
    pub http_timeouts: HttpTimeouts,
    pub toast_duration: Duration,
}

impl Settings {
    /// Build typed settings from environment variables.
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `ANALYTICS_URL`: base URL of the real-time classroom endpoint
    /// - `ANALYTICS_SOURCE`: `http` (default) or `mock`
    /// - `RECORDING_URL`: base URL of the recording backend
    /// - `STORE_PATH`: JSON file holding persisted dashboard state
    /// - `KPI_POLL_INTERVAL_SECS`: default 5
    /// - `HEALTH_POLL_INTERVAL_SECS`: default 10
    /// - `HTTP_REQUEST_TIMEOUT_SECS`: default 10
    /// - `HTTP_CONNECT_TIMEOUT_SECS`: default 5
    /// - `TOAST_DURATION_MS`: default 5000
    ///
    /// # Errors
    ///
    /// Returns an error if `PORT` or `ANALYTICS_SOURCE` is set to an
    /// unparseable value.
    pub fn from_env() -> Result<Self, SettingsError> {
        let port = match std::env::var("PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .map_err(|_| SettingsError::Parse(format!("invalid PORT: {raw}")))?,
            Err(_) => DEFAULT_PORT,
        };
        let analytics_source = parse_source(std::env::var("ANALYTICS_SOURCE").ok().as_deref())?;

        Ok(Self {
            port,
            analytics_url: base_url_from_env("ANALYTICS_URL", DEFAULT_ANALYTICS_URL),
            analytics_source,
            recording_url: base_url_from_env("RECORDING_URL", DEFAULT_RECORDING_URL),
            store_path: std::env::var("STORE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_STORE_PATH)),
            kpi_poll_interval: Duration::from_secs(
                env_parse("KPI_POLL_INTERVAL_SECS", DEFAULT_KPI_POLL_INTERVAL_SECS).max(1),
            ),
            health_poll_interval: Duration::from_secs(
                env_parse("HEALTH_POLL_INTERVAL_SECS", DEFAULT_HEALTH_POLL_INTERVAL_SECS).max(1),
            ),
            http_timeouts: HttpTimeouts {
                request: Duration::from_secs(env_parse("HTTP_REQUEST_TIMEOUT_SECS", DEFAULT_HTTP_REQUEST_TIMEOUT_SECS)),
                connect: Duration::from_secs(env_parse("HTTP_CONNECT_TIMEOUT_SECS", DEFAULT_HTTP_CONNECT_TIMEOUT_SECS)),
            },
            toast_duration: Duration::from_millis(env_parse("TOAST_DURATION_MS", DEFAULT_TOAST_DURATION_MS)),
        })
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            analytics_url: DEFAULT_ANALYTICS_URL.to_string(),
            analytics_source: AnalyticsSourceKind::Http,
            recording_url: DEFAULT_RECORDING_URL.to_string(),
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
            kpi_poll_interval: Duration::from_secs(DEFAULT_KPI_POLL_INTERVAL_SECS),
            health_poll_interval: Duration::from_secs(DEFAULT_HEALTH_POLL_INTERVAL_SECS),
            http_timeouts: HttpTimeouts {
                request: Duration::from_secs(DEFAULT_HTTP_REQUEST_TIMEOUT_SECS),
                connect: Duration::from_secs(DEFAULT_HTTP_CONNECT_TIMEOUT_SECS),
            },
            toast_duration: Duration::from_millis(DEFAULT_TOAST_DURATION_MS),
        }
    }
}

fn base_url_from_env(key: &str, default: &str) -> String {
    std::env::var(key)
        .unwrap_or_else(|_| default.to_string())
        .trim_end_matches('/')
        .to_string()
}

fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

fn parse_source(raw: Option<&str>) -> Result<AnalyticsSourceKind, SettingsError> {
    match raw.unwrap_or("http") {
        "http" => Ok(AnalyticsSourceKind::Http),
        "mock" => Ok(AnalyticsSourceKind::Mock),
        other => Err(SettingsError::Parse(format!(
            "unknown ANALYTICS_SOURCE '{other}' (expected 'http' or 'mock')"
        ))),
    }
}

#[cfg(test)]
#[path = "settings_test.rs"]
mod tests;
