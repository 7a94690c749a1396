//! Submission input and client-side validation

use bytes::Bytes;
use std::fmt;
use std::path::Path;

use super::subject::Subject;

/// Extensions the analysis service accepts
pub const ALLOWED_VIDEO_EXTENSIONS: [&str; 6] = ["mp4", "avi", "mov", "wmv", "flv", "webm"];

/// Video file to be uploaded
#[derive(Clone, PartialEq, Eq)]
pub struct VideoAsset {
    pub file_name: String,
    pub content_type: String,
    pub data: Bytes,
}

impl VideoAsset {
    /// Wrap raw bytes, guessing the content type from the file name
    pub fn new(file_name: impl Into<String>, data: impl Into<Bytes>) -> Self {
        let file_name = file_name.into();
        let content_type = mime_guess::from_path(&file_name)
            .first_or_octet_stream()
            .to_string();
        Self {
            file_name,
            content_type,
            data: data.into(),
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    fn extension(&self) -> Option<String> {
        Path::new(&self.file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
    }

    /// `video/*` content type, or an extension the service accepts
    pub fn is_video(&self) -> bool {
        self.content_type.starts_with("video/")
            || self
                .extension()
                .is_some_and(|ext| ALLOWED_VIDEO_EXTENSIONS.contains(&ext.as_str()))
    }
}

// Keep the payload out of debug output.
impl fmt::Debug for VideoAsset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VideoAsset")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.data.len())
            .finish()
    }
}

/// Everything needed to request an analysis
///
/// Languages are human-facing labels ("english", "russian", "tajik");
/// they are mapped to backend codes on the way out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionInput {
    pub video: VideoAsset,
    pub subject: String,
    pub theme: String,
    pub source_language: String,
    pub target_language: String,
}

/// Reasons a submission is rejected before anything is sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidInput {
    EmptyVideo,
    UnsupportedMedia { file_name: String, content_type: String },
    MissingSubject,
    UnknownSubject(String),
    MissingTheme,
}

impl fmt::Display for InvalidInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidInput::EmptyVideo => f.write_str("file: video file is empty"),
            InvalidInput::UnsupportedMedia {
                file_name,
                content_type,
            } => write!(
                f,
                "file: '{}' ({}) is not a supported video; expected one of {}",
                file_name,
                content_type,
                ALLOWED_VIDEO_EXTENSIONS.join(", ")
            ),
            InvalidInput::MissingSubject => f.write_str("subject: field required"),
            InvalidInput::UnknownSubject(s) => write!(f, "subject: unknown subject '{}'", s),
            InvalidInput::MissingTheme => f.write_str("theme: field required"),
        }
    }
}

impl std::error::Error for InvalidInput {}

impl SubmissionInput {
    /// Check the input the same way the upload endpoint would.
    ///
    /// Returns the parsed subject on success.
    pub fn validate(&self) -> Result<Subject, InvalidInput> {
        if self.video.is_empty() {
            return Err(InvalidInput::EmptyVideo);
        }
        if !self.video.is_video() {
            return Err(InvalidInput::UnsupportedMedia {
                file_name: self.video.file_name.clone(),
                content_type: self.video.content_type.clone(),
            });
        }

        if self.subject.trim().is_empty() {
            return Err(InvalidInput::MissingSubject);
        }
        let subject = self
            .subject
            .parse::<Subject>()
            .map_err(|e| InvalidInput::UnknownSubject(e.0))?;

        if self.theme.trim().is_empty() {
            return Err(InvalidInput::MissingTheme);
        }

        Ok(subject)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> SubmissionInput {
        SubmissionInput {
            video: VideoAsset::new("lesson.mp4", vec![0u8; 16]),
            subject: "mathematics".to_string(),
            theme: "Quadratic equations".to_string(),
            source_language: "english".to_string(),
            target_language: "russian".to_string(),
        }
    }

    #[test]
    fn test_guesses_video_content_type() {
        let asset = VideoAsset::new("lesson.webm", vec![1u8]);
        assert_eq!(asset.content_type, "video/webm");
        assert!(asset.is_video());
    }

    #[test]
    fn test_extension_alone_is_enough() {
        let asset = VideoAsset::new("LESSON.MOV", vec![1u8]).with_content_type("application/octet-stream");
        assert!(asset.is_video());
    }

    #[test]
    fn test_rejects_non_video() {
        let mut input = input();
        input.video = VideoAsset::new("notes.pdf", vec![1u8]);
        assert!(matches!(input.validate(), Err(InvalidInput::UnsupportedMedia { .. })));
    }

    #[test]
    fn test_rejects_empty_video() {
        let mut input = input();
        input.video = VideoAsset::new("lesson.mp4", Vec::new());
        assert_eq!(input.validate(), Err(InvalidInput::EmptyVideo));
    }

    #[test]
    fn test_rejects_blank_theme() {
        let mut input = input();
        input.theme = "   ".to_string();
        assert_eq!(input.validate(), Err(InvalidInput::MissingTheme));
    }

    #[test]
    fn test_long_theme_is_accepted() {
        let mut input = input();
        input.theme = "x".repeat(201);
        assert_eq!(input.validate(), Ok(Subject::Mathematics));
    }

    #[test]
    fn test_subject_checks() {
        let mut input = input();
        input.subject = String::new();
        assert_eq!(input.validate(), Err(InvalidInput::MissingSubject));
        input.subject = "alchemy".to_string();
        assert!(input.validate().unwrap_err().to_string().contains("alchemy"));
    }

    #[test]
    fn test_valid_input() {
        assert_eq!(input().validate(), Ok(Subject::Mathematics));
    }

    #[test]
    fn test_debug_hides_payload() {
        let debug = format!("{:?}", input().video);
        assert!(debug.contains("len: 16"));
    }
}
