//! Core domain types
//!
//! These types model what the analysis service knows about a submitted
//! lesson video: the job that tracks it, the status snapshots it emits
//! while processing, and the feedback it produces once done.

pub mod feedback;
pub mod job;
pub mod language;
pub mod subject;
pub mod submission;
