//! Client configuration
//!
//! Base URL of the analysis service plus the polling knobs. Everything but
//! the base URL is optional; defaults match what the service expects.

use std::time::Duration;

/// Address used when nothing else is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Delay between two status requests, in milliseconds
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 2000;

/// Delay between two status requests
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(DEFAULT_POLL_INTERVAL_MS);

/// Client configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Analysis service base URL (e.g., "http://localhost:8000")
    pub base_url: String,

    /// How long to wait between status requests
    pub poll_interval: Duration,

    /// Give up polling after this long. `None` polls until a terminal status.
    pub max_wait: Option<Duration>,

    /// Per-request timeout applied to the HTTP client
    pub request_timeout: Option<Duration>,
}

impl ClientConfig {
    /// Creates a configuration with defaults for everything but the URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            poll_interval: DEFAULT_POLL_INTERVAL,
            max_wait: None,
            request_timeout: None,
        }
    }

    /// Creates configuration from environment variables
    ///
    /// Recognised environment variables:
    /// - CLASSFEED_API_URL (optional, default: http://localhost:8000)
    /// - CLASSFEED_POLL_INTERVAL_MS (optional, default: 2000)
    /// - CLASSFEED_MAX_WAIT_SECS (optional, default: unset)
    /// - CLASSFEED_REQUEST_TIMEOUT_SECS (optional, default: unset)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let base_url = lookup("CLASSFEED_API_URL")
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let poll_interval = lookup("CLASSFEED_POLL_INTERVAL_MS")
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_POLL_INTERVAL);

        let max_wait = lookup("CLASSFEED_MAX_WAIT_SECS")
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_secs);

        let request_timeout = lookup("CLASSFEED_REQUEST_TIMEOUT_SECS")
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_secs);

        Self {
            base_url,
            poll_interval,
            max_wait,
            request_timeout,
        }
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn with_max_wait(mut self, max_wait: Option<Duration>) -> Self {
        self.max_wait = max_wait;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.trim().is_empty() {
            return Err("base_url cannot be empty".to_string());
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err("base_url must start with http:// or https://".to_string());
        }

        if self.poll_interval.is_zero() {
            return Err("poll_interval must be greater than 0".to_string());
        }

        if self.max_wait.is_some_and(|d| d.is_zero()) {
            return Err("max_wait must be greater than 0 when set".to_string());
        }

        if self.request_timeout.is_some_and(|d| d.is_zero()) {
            return Err("request_timeout must be greater than 0 when set".to_string());
        }

        Ok(())
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
