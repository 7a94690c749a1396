//! Error bodies returned by the analysis service

use serde::Deserialize;
use serde_json::Value;

/// Body of a non-success response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<ErrorDetail>,
    #[serde(default)]
    pub message: Option<String>,
}

/// `detail` is either a plain message or a list of field-level issues
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ErrorDetail {
    Text(String),
    Issues(Vec<ValidationIssue>),
    Other(Value),
}

/// One field-level validation failure
#[derive(Debug, Clone, Deserialize)]
pub struct ValidationIssue {
    /// Path to the offending field, e.g. `["body", "subject"]`
    #[serde(default)]
    pub loc: Vec<Value>,
    #[serde(default)]
    pub msg: String,
}

impl ValidationIssue {
    /// Dotted field path (`body.subject`)
    pub fn path(&self) -> String {
        self.loc
            .iter()
            .map(|segment| match segment {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect::<Vec<_>>()
            .join(".")
    }
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path(), self.msg)
    }
}

fn join_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl ErrorBody {
    /// Parse a raw body; anything that is not a JSON object yields `None`
    pub fn parse(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok()
    }

    /// Composite message for a structured validation rejection
    pub fn validation_message(&self) -> Option<String> {
        match self.detail.as_ref()? {
            ErrorDetail::Issues(issues) => {
                Some(format!("Validation errors: {}", join_issues(issues)))
            }
            ErrorDetail::Text(text) => Some(format!("Validation error: {}", text)),
            ErrorDetail::Other(_) => None,
        }
    }

    /// Best human-readable message: `detail`, then `message`
    pub fn message(&self) -> Option<String> {
        match &self.detail {
            Some(ErrorDetail::Text(text)) if !text.is_empty() => return Some(text.clone()),
            Some(ErrorDetail::Issues(issues)) if !issues.is_empty() => {
                return Some(join_issues(issues));
            }
            _ => {}
        }
        self.message.clone().filter(|m| !m.is_empty())
    }
}
