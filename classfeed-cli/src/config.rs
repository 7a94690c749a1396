//! Configuration module
//!
//! Turns command-line settings into a validated client configuration.

use anyhow::{Result, anyhow};
use classfeed_client::{ClientConfig, FeedbackClient};
use std::sync::Arc;
use std::time::Duration;

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub client: ClientConfig,
}

impl Config {
    pub fn new(
        api_url: String,
        poll_interval_ms: u64,
        max_wait_secs: Option<u64>,
        request_timeout_secs: Option<u64>,
    ) -> Result<Self> {
        let client = ClientConfig::new(api_url)
            .with_poll_interval(Duration::from_millis(poll_interval_ms))
            .with_max_wait(max_wait_secs.map(Duration::from_secs))
            .with_request_timeout(request_timeout_secs.map(Duration::from_secs));

        client
            .validate()
            .map_err(|e| anyhow!("Invalid configuration: {}", e))?;

        Ok(Self { client })
    }

    /// Build the HTTP client for the configured service
    pub fn http_client(&self) -> Result<Arc<FeedbackClient>> {
        Ok(Arc::new(FeedbackClient::from_config(&self.client)?))
    }
}
