//! Job poller
//!
//! Queries the status of a submitted job at a fixed cadence until it
//! reaches `completed` or `failed`. Every observed snapshot is handed to a
//! progress callback, the first one included.
//!
//! Polling is unbounded by default. It stops early on a transport error,
//! on cancellation, or when an optional `max_wait` ceiling is configured
//! and exceeded.

use classfeed_core::domain::job::{JobId, JobStatus};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::config::{ClientConfig, DEFAULT_POLL_INTERVAL};
use crate::error::{ClientError, Result};
use crate::transport::Transport;

/// Polls one job's status until it is terminal
#[derive(Clone)]
pub struct JobPoller {
    transport: Arc<dyn Transport>,
    interval: Duration,
    max_wait: Option<Duration>,
    cancel: CancellationToken,
}

impl JobPoller {
    /// Creates a poller with the default 2 s interval and no ceiling
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            interval: DEFAULT_POLL_INTERVAL,
            max_wait: None,
            cancel: CancellationToken::new(),
        }
    }

    /// Creates a poller using the interval and ceiling from `config`
    pub fn from_config(transport: Arc<dyn Transport>, config: &ClientConfig) -> Self {
        Self::new(transport)
            .with_interval(config.poll_interval)
            .with_max_wait(config.max_wait)
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_max_wait(mut self, max_wait: Option<Duration>) -> Self {
        self.max_wait = max_wait;
        self
    }

    /// Observe `token`: cancelling it stops the poll with [`ClientError::Cancelled`]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// Poll `job_id` until it reaches a terminal status.
    ///
    /// A `failed` status is a successful outcome here; deciding what it
    /// means is up to the caller.
    ///
    /// # Arguments
    /// * `job_id` - The job to track
    /// * `on_progress` - Called with every observed status
    pub async fn poll<F>(&self, job_id: JobId, mut on_progress: F) -> Result<JobStatus>
    where
        F: FnMut(&JobStatus) + Send,
    {
        let polling = async {
            match self.max_wait {
                Some(max_wait) => {
                    match time::timeout(max_wait, self.poll_loop(job_id, &mut on_progress)).await {
                        Ok(outcome) => outcome,
                        Err(_) => {
                            warn!(job_id, ?max_wait, "gave up waiting for job");
                            Err(ClientError::TimedOut(max_wait))
                        }
                    }
                }
                None => self.poll_loop(job_id, &mut on_progress).await,
            }
        };

        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => {
                warn!(job_id, "polling cancelled");
                Err(ClientError::Cancelled)
            }
            outcome = polling => outcome,
        }
    }

    async fn poll_loop<F>(&self, job_id: JobId, on_progress: &mut F) -> Result<JobStatus>
    where
        F: FnMut(&JobStatus) + Send,
    {
        let started = Instant::now();
        let mut attempt: u64 = 0;

        loop {
            attempt += 1;
            let status = self.transport.fetch_status(job_id).await?;

            debug!(
                job_id,
                attempt,
                status = %status.status,
                progress = status.progress,
                task = status.current_task.as_deref().unwrap_or("-"),
                "polled job status"
            );

            on_progress(&status);

            if status.is_terminal() {
                info!(
                    job_id,
                    status = %status.status,
                    attempts = attempt,
                    elapsed = ?started.elapsed(),
                    "job reached terminal status"
                );
                return Ok(status);
            }

            time::sleep(self.interval).await;
        }
    }

    /// Run the poll on a background task.
    ///
    /// The returned handle cancels the task when dropped, so an abandoned
    /// poll stops scheduling requests. Cancelling the handle does not cancel
    /// the token passed to [`JobPoller::with_cancellation`].
    pub fn spawn<F>(self, job_id: JobId, on_progress: F) -> PollHandle
    where
        F: FnMut(&JobStatus) + Send + 'static,
    {
        let cancel = self.cancel.child_token();
        let poller = self.with_cancellation(cancel.clone());

        let task = tokio::spawn(async move { poller.poll(job_id, on_progress).await });

        PollHandle {
            job_id,
            cancel,
            task,
        }
    }
}

/// Handle to a poll running in the background
pub struct PollHandle {
    job_id: JobId,
    cancel: CancellationToken,
    task: JoinHandle<Result<JobStatus>>,
}

impl PollHandle {
    pub fn job_id(&self) -> JobId {
        self.job_id
    }

    /// Stop scheduling further status requests
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Wait for the poll to finish
    pub async fn wait(mut self) -> Result<JobStatus> {
        (&mut self.task)
            .await
            .map_err(|e| ClientError::Internal(format!("poll task failed: {}", e)))?
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::scripted::{ScriptedTransport, failed, status};
    use classfeed_core::domain::job::ProcessingState;
    use std::sync::Mutex;
    use std::sync::atomic::Ordering;

    fn poller(transport: &Arc<ScriptedTransport>) -> JobPoller {
        JobPoller::new(transport.clone())
    }

    #[tokio::test(start_paused = true)]
    async fn test_resolves_on_first_terminal_status() {
        let transport = Arc::new(ScriptedTransport::new(vec![Ok(status(
            ProcessingState::Completed,
            1.0,
        ))]));
        let mut seen = Vec::new();

        let outcome = poller(&transport)
            .poll(42, |s| seen.push(s.status))
            .await
            .unwrap();

        assert_eq!(outcome.status, ProcessingState::Completed);
        assert_eq!(seen, vec![ProcessingState::Completed]);
        assert_eq!(transport.status_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_polls_every_two_seconds_until_terminal() {
        let transport = Arc::new(ScriptedTransport::new(vec![
            Ok(status(ProcessingState::Pending, 0.0)),
            Ok(status(ProcessingState::Processing, 0.5)),
            Ok(status(ProcessingState::Completed, 1.0)),
        ]));
        let mut progress = Vec::new();
        let started = Instant::now();

        poller(&transport)
            .poll(42, |s| progress.push(s.progress))
            .await
            .unwrap();

        assert_eq!(progress, vec![0.0, 0.5, 1.0]);
        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_millis(4000), "{:?}", elapsed);
        assert!(elapsed < Duration::from_millis(4100), "{:?}", elapsed);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_is_a_terminal_outcome() {
        let transport = Arc::new(ScriptedTransport::new(vec![
            Ok(status(ProcessingState::Processing, 0.5)),
            Ok(failed(Some("decode error"))),
        ]));

        let outcome = poller(&transport).poll(42, |_| {}).await.unwrap();

        assert_eq!(outcome.status, ProcessingState::Failed);
        assert_eq!(outcome.error_message.as_deref(), Some("decode error"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_transport_error_is_not_retried() {
        let transport = Arc::new(ScriptedTransport::new(vec![
            Ok(status(ProcessingState::Processing, 0.2)),
            Err(ClientError::Transport("connection reset".to_string())),
            Ok(status(ProcessingState::Completed, 1.0)),
        ]));

        let err = poller(&transport).poll(42, |_| {}).await.unwrap_err();

        assert_eq!(err, ClientError::Transport("connection reset".to_string()));
        assert_eq!(transport.status_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_max_wait_ceiling() {
        let transport = Arc::new(ScriptedTransport::new(vec![Ok(status(
            ProcessingState::Processing,
            0.1,
        ))]));

        let err = poller(&transport)
            .with_max_wait(Some(Duration::from_secs(5)))
            .poll(42, |_| {})
            .await
            .unwrap_err();

        assert_eq!(err, ClientError::TimedOut(Duration::from_secs(5)));
        assert_eq!(transport.status_calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_through_token() {
        let transport = Arc::new(ScriptedTransport::new(vec![Ok(status(
            ProcessingState::Processing,
            0.1,
        ))]));
        let token = CancellationToken::new();
        let poller = poller(&transport).with_cancellation(token.clone());

        let canceller = tokio::spawn(async move {
            time::sleep(Duration::from_millis(3000)).await;
            token.cancel();
        });

        let err = poller.poll(42, |_| {}).await.unwrap_err();
        canceller.await.unwrap();

        assert!(err.is_cancelled());
        assert_eq!(transport.status_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_handle_cancel_stops_scheduling() {
        let transport = Arc::new(ScriptedTransport::new(vec![Ok(status(
            ProcessingState::Processing,
            0.1,
        ))]));
        let observed = Arc::new(Mutex::new(0usize));
        let counter = observed.clone();

        let handle = poller(&transport).spawn(42, move |_| *counter.lock().unwrap() += 1);
        assert_eq!(handle.job_id(), 42);

        time::sleep(Duration::from_millis(4500)).await;
        handle.cancel();
        let err = handle.wait().await.unwrap_err();
        assert!(err.is_cancelled());

        let calls = transport.status_calls.load(Ordering::SeqCst);
        time::sleep(Duration::from_secs(10)).await;
        assert_eq!(transport.status_calls.load(Ordering::SeqCst), calls);
        assert_eq!(*observed.lock().unwrap(), calls);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_handle_cancels_poll() {
        let transport = Arc::new(ScriptedTransport::new(vec![Ok(status(
            ProcessingState::Processing,
            0.1,
        ))]));
        let parent = CancellationToken::new();

        let handle = poller(&transport)
            .with_cancellation(parent.clone())
            .spawn(42, |_| {});
        time::sleep(Duration::from_millis(100)).await;
        drop(handle);

        let calls = transport.status_calls.load(Ordering::SeqCst);
        time::sleep(Duration::from_secs(10)).await;
        assert_eq!(transport.status_calls.load(Ordering::SeqCst), calls);
        assert!(!parent.is_cancelled());
    }

    #[tokio::test(start_paused = true)]
    async fn test_spawned_poll_completes() {
        let transport = Arc::new(ScriptedTransport::new(vec![
            Ok(status(ProcessingState::Processing, 0.5)),
            Ok(status(ProcessingState::Completed, 1.0)),
        ]));

        let handle = poller(&transport).spawn(42, |_| {});
        let outcome = handle.wait().await.unwrap();
        assert_eq!(outcome.status, ProcessingState::Completed);
    }
}
