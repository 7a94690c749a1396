//! Video upload endpoint

use crate::FeedbackClient;
use crate::error::{ClientError, Result};
use classfeed_core::domain::job::Job;
use classfeed_core::domain::submission::SubmissionInput;
use classfeed_core::dto::upload::UploadForm;
use reqwest::multipart::{Form, Part};
use tracing::debug;

impl FeedbackClient {
    /// Upload a video and its metadata, creating a job
    ///
    /// Language labels are mapped to backend codes before sending.
    /// Input is not validated here; the workflow does that.
    ///
    /// # Returns
    /// The job created by the service
    pub async fn upload_video(&self, input: &SubmissionInput) -> Result<Job> {
        let url = format!("{}/upload-video", self.base_url);
        let video = &input.video;

        let file = Part::stream_with_length(video.data.clone(), video.len() as u64)
            .file_name(video.file_name.clone())
            .mime_str(&video.content_type)
            .map_err(|_| {
                ClientError::Validation(format!(
                    "Validation error: file: invalid content type '{}'",
                    video.content_type
                ))
            })?;

        let fields = UploadForm::from(input);
        debug!(
            file = %video.file_name,
            bytes = video.len(),
            subject = %fields.subject,
            language = fields.language,
            feedback_language = fields.feedback_language,
            "uploading video"
        );

        let form = fields
            .fields()
            .into_iter()
            .fold(Form::new().part(UploadForm::FILE, file), |form, (name, value)| {
                form.text(name, value)
            });

        let response = self.client.post(&url).multipart(form).send().await?;

        self.handle_response(response, "Failed to upload video").await
    }
}
