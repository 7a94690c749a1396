//! Lesson subject categories

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Subject of the recorded lesson, as accepted by the upload endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Subject {
    Mathematics,
    Physics,
    Chemistry,
    Biology,
    History,
    Geography,
    Literature,
    Language,
    ComputerScience,
    Art,
    Music,
    PhysicalEducation,
    Other,
}

impl Subject {
    pub const ALL: [Subject; 13] = [
        Subject::Mathematics,
        Subject::Physics,
        Subject::Chemistry,
        Subject::Biology,
        Subject::History,
        Subject::Geography,
        Subject::Literature,
        Subject::Language,
        Subject::ComputerScience,
        Subject::Art,
        Subject::Music,
        Subject::PhysicalEducation,
        Subject::Other,
    ];

    /// Wire value sent in the `subject` form field
    pub fn as_str(&self) -> &'static str {
        match self {
            Subject::Mathematics => "mathematics",
            Subject::Physics => "physics",
            Subject::Chemistry => "chemistry",
            Subject::Biology => "biology",
            Subject::History => "history",
            Subject::Geography => "geography",
            Subject::Literature => "literature",
            Subject::Language => "language",
            Subject::ComputerScience => "computer_science",
            Subject::Art => "art",
            Subject::Music => "music",
            Subject::PhysicalEducation => "physical_education",
            Subject::Other => "other",
        }
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a subject string is not one of [`Subject::ALL`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSubject(pub String);

impl fmt::Display for UnknownSubject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown subject '{}'", self.0)
    }
}

impl std::error::Error for UnknownSubject {}

impl FromStr for Subject {
    type Err = UnknownSubject;

    /// Accepts wire values plus their spaced or hyphenated spellings
    /// ("computer science", "Physical-Education").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace([' ', '-'], "_");
        Subject::ALL
            .into_iter()
            .find(|subject| subject.as_str() == normalized)
            .ok_or_else(|| UnknownSubject(s.to_string()))
    }
}
