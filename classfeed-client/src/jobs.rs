//! Job status and feedback endpoints

use crate::FeedbackClient;
use crate::error::Result;
use classfeed_core::domain::feedback::FeedbackResult;
use classfeed_core::domain::job::{JobId, JobStatus};

impl FeedbackClient {
    /// Get the current processing status of a job
    pub async fn get_status(&self, job_id: JobId) -> Result<JobStatus> {
        let url = format!("{}/status/{}", self.base_url, job_id);
        let response = self.client.get(&url).send().await?;

        self.handle_response(response, "Failed to get status").await
    }

    /// Get the feedback produced for a job
    ///
    /// Only meaningful once the job is `completed`.
    pub async fn get_feedback(&self, job_id: JobId) -> Result<FeedbackResult> {
        let url = format!("{}/get-feedback/{}", self.base_url, job_id);
        let response = self.client.get(&url).send().await?;

        self.handle_response(response, "Failed to get feedback").await
    }
}
