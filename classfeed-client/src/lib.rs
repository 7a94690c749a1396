//! Classfeed HTTP Client
//!
//! Submits lesson videos to the analysis service, tracks the resulting job
//! and fetches the multilingual feedback once processing is done.
//!
//! Layers, bottom up:
//! - [`FeedbackClient`]: the three HTTP operations, behind the [`Transport`] trait
//! - [`JobPoller`]: fixed-cadence status polling with cancellation
//! - [`SubmissionWorkflow`]: validate, submit, poll, retrieve, pick a language
//!
//! # Example
//!
//! ```no_run
//! use classfeed_client::{ClientConfig, FeedbackClient, SubmissionWorkflow};
//! use classfeed_core::domain::submission::{SubmissionInput, VideoAsset};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ClientConfig::from_env();
//!     let client = Arc::new(FeedbackClient::from_config(&config)?);
//!
//!     let input = SubmissionInput {
//!         video: VideoAsset::new("lesson.mp4", std::fs::read("lesson.mp4")?),
//!         subject: "physics".to_string(),
//!         theme: "Newton's laws".to_string(),
//!         source_language: "english".to_string(),
//!         target_language: "russian".to_string(),
//!     };
//!
//!     let outcome = SubmissionWorkflow::new(client, &config)
//!         .on_update(|snapshot| println!("{:>3.0}%", snapshot.progress * 100.0))
//!         .run(&input)
//!         .await?;
//!
//!     println!("Overall score: {:?}", outcome.presented().and_then(|f| f.overall_score));
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
mod jobs;
pub mod poller;
pub mod transport;
mod videos;
pub mod workflow;

// Re-export commonly used types
pub use config::ClientConfig;
pub use error::{ClientError, ErrorKind, Result};
pub use poller::{JobPoller, PollHandle};
pub use transport::Transport;
pub use workflow::{SubmissionOutcome, SubmissionState, SubmissionWorkflow, WorkflowSnapshot};

use reqwest::Client;
use serde::de::DeserializeOwned;

/// HTTP client for the lesson analysis API
#[derive(Debug, Clone)]
pub struct FeedbackClient {
    /// Base URL of the service (e.g., "http://localhost:8000")
    base_url: String,
    /// HTTP client instance
    client: Client,
}

impl FeedbackClient {
    /// Create a new client
    ///
    /// # Example
    /// ```
    /// use classfeed_client::FeedbackClient;
    ///
    /// let client = FeedbackClient::new("http://localhost:8000");
    /// ```
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Create a new client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Create a client from a [`ClientConfig`], applying its request timeout
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self::with_client(config.base_url.clone(), builder.build()?))
    }

    /// Get the base URL of the service
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Check the status code and deserialize the JSON body.
    ///
    /// Non-success responses are classified by
    /// [`ClientError::from_response_body`], using `fallback` when the body
    /// carries no message.
    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
        fallback: &str,
    ) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::debug!(status = status.as_u16(), body = %body, "request rejected");
            return Err(ClientError::from_response_body(status.as_u16(), &body, fallback));
        }

        Ok(response.json().await?)
    }
}
