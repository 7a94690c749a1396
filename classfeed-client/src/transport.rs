//! Transport seam
//!
//! The poller and the workflow only talk to the service through this
//! trait, so they can run against a scripted double in tests.

use async_trait::async_trait;
use classfeed_core::domain::feedback::FeedbackResult;
use classfeed_core::domain::job::{Job, JobId, JobStatus};
use classfeed_core::domain::submission::SubmissionInput;

use crate::FeedbackClient;
use crate::error::Result;

/// The three remote operations of the analysis service
///
/// Implementations never retry; retry policy belongs to the caller.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Upload a video with its metadata, creating a job
    async fn submit(&self, input: &SubmissionInput) -> Result<Job>;

    /// Fetch a fresh status snapshot for a job
    async fn fetch_status(&self, job_id: JobId) -> Result<JobStatus>;

    /// Fetch the feedback of a completed job
    async fn fetch_result(&self, job_id: JobId) -> Result<FeedbackResult>;
}

#[async_trait]
impl Transport for FeedbackClient {
    async fn submit(&self, input: &SubmissionInput) -> Result<Job> {
        self.upload_video(input).await
    }

    async fn fetch_status(&self, job_id: JobId) -> Result<JobStatus> {
        self.get_status(job_id).await
    }

    async fn fetch_result(&self, job_id: JobId) -> Result<FeedbackResult> {
        self.get_feedback(job_id).await
    }
}
