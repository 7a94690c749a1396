//! Submission workflow
//!
//! Drives one submission attempt end to end:
//! validate → submit → poll → retrieve → select language.
//!
//! Progress is reported on a single overall scale: submitting owns the
//! first 30%, polling the next 60% and retrieval the final 10%. Every
//! transition is published as a [`WorkflowSnapshot`], so a presentation
//! layer can render from one value instead of tracking flags itself.

use classfeed_core::domain::feedback::{FeedbackResult, FeedbackSelection, LanguageFeedback, LanguageMatch};
use classfeed_core::domain::job::{Job, JobId, JobStatus, ProcessingState};
use classfeed_core::domain::submission::SubmissionInput;
use classfeed_core::to_backend_code;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::poller::JobPoller;
use crate::transport::Transport;

/// Overall progress once the upload is accepted
pub const SUBMITTED_PROGRESS: f64 = 0.30;
/// Overall progress once the job is done and retrieval starts
pub const RETRIEVING_PROGRESS: f64 = 0.90;
pub const COMPLETE_PROGRESS: f64 = 1.0;

/// Message used when a job fails without saying why
const PROCESSING_FAILED: &str = "Video processing failed";

/// Where a submission attempt currently is
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionState {
    Idle,
    Submitting,
    Polling { job_id: JobId },
    Retrieving { job_id: JobId },
    Complete { job_id: JobId },
    Failed { reason: String },
}

impl SubmissionState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Complete { .. } | Self::Failed { .. })
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Submitting => "submitting",
            Self::Polling { .. } => "polling",
            Self::Retrieving { .. } => "retrieving",
            Self::Complete { .. } => "complete",
            Self::Failed { .. } => "failed",
        }
    }
}

/// Everything a presentation layer needs to render the attempt
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowSnapshot {
    pub state: SubmissionState,
    /// Overall progress in `[0.0, 1.0]`, never decreasing
    pub progress: f64,
    /// Latest status reported by the service, if any
    pub status: Option<JobStatus>,
}

/// Result of a successful attempt
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionOutcome {
    pub job: Job,
    pub result: FeedbackResult,
    /// Backend code of the language the caller asked for
    pub requested_language: &'static str,
    /// Entry to present; `None` only when the service sent no feedback
    pub selection: Option<FeedbackSelection>,
}

impl SubmissionOutcome {
    /// Feedback entry to show the user
    pub fn presented(&self) -> Option<&LanguageFeedback> {
        self.selection
            .as_ref()
            .and_then(|selection| self.result.selected(selection))
    }

    /// True when the requested language was unavailable and another one is shown
    pub fn is_language_fallback(&self) -> bool {
        self.selection
            .as_ref()
            .is_some_and(FeedbackSelection::is_fallback)
    }
}

type Observer = Box<dyn FnMut(&WorkflowSnapshot) + Send>;

/// Holds the current snapshot and publishes every change
struct Reporter {
    snapshot: WorkflowSnapshot,
    observer: Option<Observer>,
}

impl Reporter {
    fn publish(&mut self) {
        if let Some(observer) = self.observer.as_mut() {
            observer(&self.snapshot);
        }
    }

    fn transition(&mut self, state: SubmissionState, progress: f64) {
        self.snapshot.state = state;
        self.snapshot.progress = self.snapshot.progress.max(progress);
        self.publish();
    }

    /// Map a polled status onto the overall scale
    fn observe(&mut self, status: &JobStatus) {
        let progress = overall_progress(status.clamped_progress());
        self.snapshot.progress = self.snapshot.progress.max(progress);
        self.snapshot.status = Some(status.clone());
        self.publish();
    }
}

/// Server-side progress `p` → overall progress `0.30 + p * 0.60`
pub fn overall_progress(p: f64) -> f64 {
    // Computed in percent to keep the common values exact.
    (30.0 + p * 60.0) / 100.0
}

/// One submission attempt
///
/// [`SubmissionWorkflow::run`] consumes the workflow; a retry needs a new
/// instance.
pub struct SubmissionWorkflow {
    transport: Arc<dyn Transport>,
    poll_interval: Duration,
    max_wait: Option<Duration>,
    cancel: CancellationToken,
    reporter: Reporter,
}

impl SubmissionWorkflow {
    pub fn new(transport: Arc<dyn Transport>, config: &ClientConfig) -> Self {
        Self {
            transport,
            poll_interval: config.poll_interval,
            max_wait: config.max_wait,
            cancel: CancellationToken::new(),
            reporter: Reporter {
                snapshot: WorkflowSnapshot {
                    state: SubmissionState::Idle,
                    progress: 0.0,
                    status: None,
                },
                observer: None,
            },
        }
    }

    /// Called with a snapshot on every state or progress change
    pub fn on_update<F>(mut self, observer: F) -> Self
    where
        F: FnMut(&WorkflowSnapshot) + Send + 'static,
    {
        self.reporter.observer = Some(Box::new(observer));
        self
    }

    /// Observe `token`; cancelling it aborts polling
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    pub fn snapshot(&self) -> &WorkflowSnapshot {
        &self.reporter.snapshot
    }

    /// Run the attempt to completion.
    ///
    /// # Errors
    /// * `Validation` - bad input (nothing is sent) or a 422 from the service
    /// * `Remote` / `Transport` - the service refused or could not be reached
    /// * `Processing` - the job itself failed
    /// * `Cancelled` / `TimedOut` - polling stopped early
    pub async fn run(mut self, input: &SubmissionInput) -> Result<SubmissionOutcome> {
        match self.execute(input).await {
            Ok(outcome) => Ok(outcome),
            Err(e) => {
                warn!(error = %e, state = self.reporter.snapshot.state.label(), "submission failed");
                self.reporter.transition(
                    SubmissionState::Failed {
                        reason: e.to_string(),
                    },
                    0.0,
                );
                Err(e)
            }
        }
    }

    async fn execute(&mut self, input: &SubmissionInput) -> Result<SubmissionOutcome> {
        self.reporter.transition(SubmissionState::Submitting, 0.0);
        let subject = input.validate()?;

        let job = self.transport.submit(input).await?;
        info!(
            job_id = job.id,
            file = %job.video_filename,
            %subject,
            "video submitted"
        );
        self.reporter
            .transition(SubmissionState::Polling { job_id: job.id }, SUBMITTED_PROGRESS);

        let poller = JobPoller::new(self.transport.clone())
            .with_interval(self.poll_interval)
            .with_max_wait(self.max_wait)
            .with_cancellation(self.cancel.clone());
        let reporter = &mut self.reporter;
        let final_status = poller.poll(job.id, |status| reporter.observe(status)).await?;

        if final_status.status == ProcessingState::Failed {
            let reason = final_status
                .error_message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| PROCESSING_FAILED.to_string());
            return Err(ClientError::Processing(reason));
        }

        self.reporter
            .transition(SubmissionState::Retrieving { job_id: job.id }, RETRIEVING_PROGRESS);
        let result = self.transport.fetch_result(job.id).await?;

        let requested_language = to_backend_code(&input.target_language);
        let selection = result.select(requested_language);
        match selection.as_ref().map(|s| &s.language_match) {
            Some(LanguageMatch::Fallback { requested, shown }) => warn!(
                job_id = job.id,
                requested = %requested,
                shown = %shown,
                "requested feedback language unavailable, showing default"
            ),
            None => warn!(job_id = job.id, "service returned no feedback entries"),
            Some(LanguageMatch::Exact) => {}
        }

        info!(job_id = job.id, feedbacks = result.feedbacks.len(), "feedback retrieved");
        self.reporter
            .transition(SubmissionState::Complete { job_id: job.id }, COMPLETE_PROGRESS);

        Ok(SubmissionOutcome {
            job,
            result,
            requested_language,
            selection,
        })
    }
}
