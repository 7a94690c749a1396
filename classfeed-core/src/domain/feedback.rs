//! Feedback results and language selection

use serde::{Deserialize, Deserializer, Serialize};

use super::job::{JobId, ProcessingState};

/// Everything the service produced for one video
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackResult {
    pub video_id: JobId,
    pub status: ProcessingState,
    /// Lesson transcript; absent when transcription produced nothing
    #[serde(default)]
    pub transcription: Option<String>,
    /// One entry per language the service generated feedback in
    #[serde(default)]
    pub feedbacks: Vec<LanguageFeedback>,
}

/// Feedback written in a single language
///
/// The service stores whatever the model produced, so any score may be
/// null and null narratives are read as empty text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageFeedback {
    /// Backend language code ("en", "ru", "tj")
    pub language: String,
    /// 0-10
    #[serde(default)]
    pub teaching_quality_score: Option<f64>,
    /// 0-10
    #[serde(default)]
    pub student_engagement_score: Option<f64>,
    /// 0-10
    #[serde(default)]
    pub overall_score: Option<f64>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub strengths: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub areas_for_improvement: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub specific_recommendations: String,
    /// Opaque payload, passed through untouched
    #[serde(default = "empty_object")]
    pub technical_analysis: serde_json::Value,
}

fn empty_object() -> serde_json::Value {
    serde_json::Value::Object(Default::default())
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// How the presented feedback relates to the language the caller asked for
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LanguageMatch {
    /// The requested language was available
    Exact,
    /// The requested language was missing; the first entry is shown instead
    Fallback { requested: String, shown: String },
}

/// Which entry of [`FeedbackResult::feedbacks`] should be presented
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedbackSelection {
    pub index: usize,
    pub language_match: LanguageMatch,
}

impl FeedbackSelection {
    pub fn is_fallback(&self) -> bool {
        matches!(self.language_match, LanguageMatch::Fallback { .. })
    }
}

impl FeedbackResult {
    pub fn transcription(&self) -> &str {
        self.transcription.as_deref().unwrap_or_default()
    }

    /// Pick the feedback entry for `code`.
    ///
    /// Falls back to the first entry when no entry matches. Returns `None`
    /// only when the service produced no feedback at all.
    pub fn select(&self, code: &str) -> Option<FeedbackSelection> {
        if let Some(index) = self
            .feedbacks
            .iter()
            .position(|fb| fb.language.eq_ignore_ascii_case(code))
        {
            return Some(FeedbackSelection {
                index,
                language_match: LanguageMatch::Exact,
            });
        }

        self.feedbacks.first().map(|first| FeedbackSelection {
            index: 0,
            language_match: LanguageMatch::Fallback {
                requested: code.to_string(),
                shown: first.language.clone(),
            },
        })
    }

    /// Entry referenced by a selection
    pub fn selected(&self, selection: &FeedbackSelection) -> Option<&LanguageFeedback> {
        self.feedbacks.get(selection.index)
    }
}
