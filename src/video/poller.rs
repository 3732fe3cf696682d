//! The video job status poller.
//!
//! A job is polled on a fixed interval until the backend reports a terminal
//! status, the poll budget runs out, or the job handle is cancelled.
//!
//! # State machine
//!
//! ```text
//! Pending --completed--> Completed{filename}
//!         --failed-----> Failed{message}
//!         --budget-----> TimedOut
//!         --cancel-----> Cancelled
//! ```
//!
//! Polls are not serialized: when a status request is still in flight at
//! the next tick, another one is issued. The first terminal answer wins and
//! abandons the rest.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::watch;
use tokio::task::JoinSet;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use crate::api::{ApiError, ShowcaseClient};
use crate::config::ShowcaseConfig;
use crate::model::{JobId, JobStatus, PollState};

/// Where the poller reads job status from.
#[async_trait]
pub trait JobStatusSource: Send + Sync {
    /// Reads the current status of a job.
    async fn job_status(&self, job: &JobId) -> Result<JobStatus, ApiError>;
}

#[async_trait]
impl JobStatusSource for ShowcaseClient {
    async fn job_status(&self, job: &JobId) -> Result<JobStatus, ApiError> {
        self.video_status(job).await
    }
}

/// Poll timing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PollSettings {
    /// Time between two ticks; the first tick fires one interval after start.
    pub interval: Duration,
    /// Number of ticks after which a pending job times out.
    pub max_polls: u32,
}

impl PollSettings {
    /// Reads the poll timing from the configuration.
    #[must_use]
    pub const fn from_config(config: &ShowcaseConfig) -> Self {
        Self {
            interval: config.poll_interval(),
            max_polls: config.max_polls(),
        }
    }
}

/// How a poll loop ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PollOutcome {
    /// The polled job.
    pub job: JobId,
    /// The terminal state.
    pub state: PollState,
    /// Number of status requests issued.
    pub attempts: u32,
}

/// Polls a job until it reaches a terminal state.
///
/// The loop ends with [`PollState::Cancelled`] as soon as `cancel` receives
/// a value or its sender is dropped. Transport errors are logged and
/// otherwise ignored; the tick that issued the failed request still counts
/// against `max_polls`.
pub async fn poll_job(
    source: Arc<dyn JobStatusSource>,
    job: JobId,
    settings: PollSettings,
    mut cancel: watch::Receiver<bool>,
) -> PollOutcome {
    let mut ticker = interval_at(Instant::now() + settings.interval, settings.interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut in_flight: JoinSet<Result<JobStatus, ApiError>> = JoinSet::new();
    let mut attempts: u32 = 0;

    let state = loop {
        tokio::select! {
            biased;

            // A closed channel means the handle was dropped
            _ = cancel.changed() => break PollState::Cancelled,

            Some(joined) = in_flight.join_next(), if !in_flight.is_empty() => {
                match joined {
                    Ok(Ok(status)) => {
                        let state = status.state();
                        if state.is_terminal() {
                            break state;
                        }
                        tracing::debug!(job_id = %job, status = %status.status, "video job pending");
                    }
                    Ok(Err(error)) => {
                        tracing::warn!(job_id = %job, %error, "video status poll failed");
                    }
                    Err(error) => {
                        tracing::warn!(job_id = %job, %error, "video status poll aborted");
                    }
                }
                if attempts >= settings.max_polls && in_flight.is_empty() {
                    break PollState::TimedOut;
                }
            }

            _ = ticker.tick(), if attempts < settings.max_polls => {
                attempts += 1;
                let source = Arc::clone(&source);
                let job = job.clone();
                in_flight.spawn(async move { source.job_status(&job).await });
            }
        }
    };

    in_flight.abort_all();
    tracing::info!(job_id = %job, attempts, state = ?state, "video job finished");

    PollOutcome {
        job,
        state,
        attempts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    use crate::clients::{HttpError, HttpResponseError};

    /// Answers `processing` until call `done_at`, then `completed`.
    struct Scripted {
        calls: AtomicU32,
        done_at: Option<u32>,
        fail_on: Vec<u32>,
    }

    #[async_trait]
    impl JobStatusSource for Scripted {
        async fn job_status(&self, _job: &JobId) -> Result<JobStatus, ApiError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if self.fail_on.contains(&call) {
                return Err(ApiError::Http(HttpError::Response(HttpResponseError {
                    code: 502,
                    message: "Bad Gateway".to_string(),
                    error_reference: None,
                })));
            }
            let status = if Some(call) == self.done_at {
                "completed"
            } else {
                "processing"
            };
            Ok(JobStatus {
                status: status.to_string(),
                message: None,
                filename: Some("x.mp4".to_string()),
            })
        }
    }

    fn settings() -> PollSettings {
        PollSettings {
            interval: Duration::from_secs(5),
            max_polls: 60,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_poll_waits_one_interval() {
        let source = Arc::new(Scripted {
            calls: AtomicU32::new(0),
            done_at: Some(1),
            fail_on: Vec::new(),
        });
        let (_tx, rx) = watch::channel(false);
        let started = Instant::now();

        let outcome = poll_job(source, JobId::new("job"), settings(), rx).await;

        assert_eq!(outcome.attempts, 1);
        assert!(started.elapsed() >= Duration::from_secs(5));
        assert!(started.elapsed() < Duration::from_secs(10));
    }

    #[tokio::test(start_paused = true)]
    async fn test_completion_stops_polling() {
        let source = Arc::new(Scripted {
            calls: AtomicU32::new(0),
            done_at: Some(3),
            fail_on: Vec::new(),
        });
        let (_tx, rx) = watch::channel(false);

        let outcome = poll_job(source.clone(), JobId::new("job"), settings(), rx).await;

        assert_eq!(
            outcome.state,
            PollState::Completed {
                filename: "x.mp4".to_string()
            }
        );
        assert_eq!(outcome.attempts, 3);
        // Give a stray tick every chance to fire
        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(source.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_budget_exhaustion_times_out() {
        let source = Arc::new(Scripted {
            calls: AtomicU32::new(0),
            done_at: None,
            fail_on: Vec::new(),
        });
        let (_tx, rx) = watch::channel(false);

        let outcome = poll_job(source.clone(), JobId::new("job"), settings(), rx).await;

        assert_eq!(outcome.state, PollState::TimedOut);
        assert_eq!(outcome.attempts, 60);
        assert_eq!(source.calls.load(Ordering::SeqCst), 60);
    }

    #[tokio::test(start_paused = true)]
    async fn test_transport_errors_are_swallowed() {
        let source = Arc::new(Scripted {
            calls: AtomicU32::new(0),
            done_at: Some(5),
            fail_on: vec![2, 3],
        });
        let (_tx, rx) = watch::channel(false);

        let outcome = poll_job(source, JobId::new("job"), settings(), rx).await;

        assert!(matches!(outcome.state, PollState::Completed { .. }));
        assert_eq!(outcome.attempts, 5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_sender_cancels() {
        let source = Arc::new(Scripted {
            calls: AtomicU32::new(0),
            done_at: None,
            fail_on: Vec::new(),
        });
        let (tx, rx) = watch::channel(false);

        let task = tokio::spawn(poll_job(source.clone(), JobId::new("job"), settings(), rx));
        tokio::time::sleep(Duration::from_secs(12)).await;
        drop(tx);

        let outcome = task.await.unwrap();
        assert_eq!(outcome.state, PollState::Cancelled);
        assert_eq!(outcome.attempts, 2);
    }
}
