//! Language labels and backend codes
//!
//! Callers pick languages by human-facing label ("english", "russian",
//! "tajik"); the analysis service only understands two-letter codes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Code used whenever a label is not recognised
pub const DEFAULT_LANGUAGE_CODE: &str = "en";

/// Languages supported by the analysis service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "ru")]
    Russian,
    #[serde(rename = "tj")]
    Tajik,
}

impl Language {
    /// All supported languages, in presentation order
    pub const ALL: [Language; 3] = [Language::English, Language::Russian, Language::Tajik];

    /// Two-letter code understood by the backend
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Russian => "ru",
            Language::Tajik => "tj",
        }
    }

    /// Human-facing label
    pub fn label(&self) -> &'static str {
        match self {
            Language::English => "english",
            Language::Russian => "russian",
            Language::Tajik => "tajik",
        }
    }

    /// Resolve a human-facing label, ignoring case and surrounding whitespace
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|lang| lang.label().eq_ignore_ascii_case(label))
    }

    /// Resolve a backend code
    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim();
        Self::ALL
            .into_iter()
            .find(|lang| lang.code().eq_ignore_ascii_case(code))
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Map a language label to the code the backend expects.
///
/// Total: unknown labels fall back to [`DEFAULT_LANGUAGE_CODE`].
pub fn to_backend_code(label: &str) -> &'static str {
    Language::from_label(label)
        .map(|lang| lang.code())
        .unwrap_or(DEFAULT_LANGUAGE_CODE)
}
