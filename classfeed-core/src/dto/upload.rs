//! Upload form DTO

use crate::domain::language::to_backend_code;
use crate::domain::submission::SubmissionInput;

/// Text fields of the `POST /upload-video` multipart body
///
/// The binary `file` part is attached by the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadForm {
    pub subject: String,
    pub theme: String,
    pub language: &'static str,
    pub feedback_language: &'static str,
}

impl UploadForm {
    pub const FILE: &'static str = "file";
    pub const SUBJECT: &'static str = "subject";
    pub const THEME: &'static str = "theme";
    pub const LANGUAGE: &'static str = "language";
    pub const FEEDBACK_LANGUAGE: &'static str = "feedback_language";

    /// Field name / value pairs in the order they are sent
    pub fn fields(&self) -> [(&'static str, String); 4] {
        [
            (Self::SUBJECT, self.subject.clone()),
            (Self::THEME, self.theme.clone()),
            (Self::LANGUAGE, self.language.to_string()),
            (Self::FEEDBACK_LANGUAGE, self.feedback_language.to_string()),
        ]
    }
}

impl From<&SubmissionInput> for UploadForm {
    fn from(input: &SubmissionInput) -> Self {
        // Known subjects go out in their canonical wire form; anything else
        // is forwarded so the service can reject it.
        let subject = input
            .subject
            .parse::<crate::domain::subject::Subject>()
            .map(|s| s.as_str().to_string())
            .unwrap_or_else(|_| input.subject.trim().to_string());

        Self {
            subject,
            theme: input.theme.clone(),
            language: to_backend_code(&input.source_language),
            feedback_language: to_backend_code(&input.target_language),
        }
    }
}
