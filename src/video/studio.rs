//! Video generation requests.
//!
//! [`VideoStudio`] runs the confirm, submit and poll flow for a product and
//! hands back a [`VideoJob`] without waiting for the video to render.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::api::{ApiError, ShowcaseClient};
use crate::config::GenerationPolicy;
use crate::error::ValidationError;
use crate::model::{JobId, PollState, Product};
use crate::prompt::Prompter;
use crate::video::poller::{poll_job, JobStatusSource, PollOutcome, PollSettings};

/// Notice shown once a job has been accepted.
pub const GENERATION_STARTED: &str =
    "Video generation started! This may take a few minutes. You can check the status later.";

type ActiveJobs = Arc<Mutex<HashMap<String, usize>>>;

/// Starts video generation jobs and polls them in the background.
///
/// # Example
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use showcase_client::video::VideoStudio;
///
/// let studio = VideoStudio::new(client, prompter);
/// if let Some(job) = studio.request(&product).await? {
///     // The poller runs on its own; dropping `job` cancels it.
///     let outcome = job.wait().await;
/// }
/// ```
pub struct VideoStudio {
    client: Arc<ShowcaseClient>,
    status_source: Arc<dyn JobStatusSource>,
    prompter: Arc<dyn Prompter>,
    settings: PollSettings,
    policy: GenerationPolicy,
    active: ActiveJobs,
}

impl std::fmt::Debug for VideoStudio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VideoStudio")
            .field("settings", &self.settings)
            .field("policy", &self.policy)
            .field("active_jobs", &self.active_jobs())
            .finish_non_exhaustive()
    }
}

impl VideoStudio {
    /// Creates a studio that submits and polls through `client`.
    #[must_use]
    pub fn new(client: Arc<ShowcaseClient>, prompter: Arc<dyn Prompter>) -> Self {
        let settings = PollSettings::from_config(client.config());
        let policy = client.config().generation_policy();
        let status_source: Arc<dyn JobStatusSource> = client.clone();
        Self {
            client,
            status_source,
            prompter,
            settings,
            policy,
            active: Arc::default(),
        }
    }

    /// Reads job status from another source instead of the client.
    #[must_use]
    pub fn with_status_source(mut self, source: Arc<dyn JobStatusSource>) -> Self {
        self.status_source = source;
        self
    }

    /// Returns the number of jobs whose poller is still running.
    #[must_use]
    pub fn active_jobs(&self) -> usize {
        lock(&self.active).values().sum()
    }

    /// Asks for confirmation, submits the product and starts polling.
    ///
    /// Returns `Ok(None)` when the operator declines. On success the poller
    /// is already running and the operator has been notified; terminal
    /// states are reported through the [`Prompter`] as well.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::GenerationInProgress`] under
    /// [`GenerationPolicy::RejectWhileActive`] when a job for the same
    /// product is still pending, and [`ApiError`] when the backend refuses
    /// the job. Both are also shown to the operator.
    pub async fn request(&self, product: &Product) -> Result<Option<VideoJob>, ApiError> {
        let key = product_key(product);
        let Some(slot) = ActiveSlot::claim(&self.active, &key, self.policy) else {
            let error = ApiError::from(ValidationError::GenerationInProgress { product: key });
            self.prompter.alert(&error.user_message());
            return Err(error);
        };

        let question = format!(
            "Create a marketing video for \"{}\"?\nThis may take a few minutes.",
            product.display_title()
        );
        if !self.prompter.confirm(&question) {
            return Ok(None);
        }

        let job = match self.client.generate_video(product).await {
            Ok(job) => job,
            Err(error) => {
                if error.is_transport() {
                    tracing::warn!(product = %key, %error, "video request failed");
                }
                self.prompter
                    .alert(&format!("Failed to generate video: {}", error.user_message()));
                return Err(error);
            }
        };

        let (cancel, cancelled) = watch::channel(false);
        let source = Arc::clone(&self.status_source);
        let prompter = Arc::clone(&self.prompter);
        let settings = self.settings;
        let polled = job.clone();
        let handle = tokio::spawn(async move {
            let outcome = poll_job(source, polled, settings, cancelled).await;
            drop(slot);
            if let Some(notice) = outcome.state.notice() {
                prompter.alert(&notice);
            }
            outcome
        });

        self.prompter.alert(GENERATION_STARTED);
        Ok(Some(VideoJob {
            id: job,
            cancel,
            handle,
        }))
    }
}

/// A running video job.
///
/// Dropping the handle cancels the poller.
#[derive(Debug)]
pub struct VideoJob {
    id: JobId,
    cancel: watch::Sender<bool>,
    handle: JoinHandle<PollOutcome>,
}

impl VideoJob {
    /// Returns the backend job identifier.
    #[must_use]
    pub const fn id(&self) -> &JobId {
        &self.id
    }

    /// Stops the poller; it finishes with [`PollState::Cancelled`].
    pub fn cancel(&self) {
        // The poller may already be gone, which is fine
        let _ = self.cancel.send(true);
    }

    /// Returns `true` once the poller has finished.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Waits for the poller to reach a terminal state.
    pub async fn wait(self) -> PollOutcome {
        let Self { id, cancel, handle } = self;
        let outcome = handle.await;
        drop(cancel);
        outcome.unwrap_or_else(|error| {
            tracing::warn!(job_id = %id, %error, "video poller task failed");
            PollOutcome {
                job: id,
                state: PollState::Cancelled,
                attempts: 0,
            }
        })
    }
}

/// The key duplicate requests are detected by: the identifier, else the title.
fn product_key(product: &Product) -> String {
    product.id().map_or_else(
        || product.display_title().to_string(),
        |id| id.as_ref().to_string(),
    )
}

/// A registration in the active-job table, released on drop.
struct ActiveSlot {
    active: ActiveJobs,
    key: String,
}

impl ActiveSlot {
    fn claim(active: &ActiveJobs, key: &str, policy: GenerationPolicy) -> Option<Self> {
        let mut jobs = lock(active);
        let count = jobs.entry(key.to_string()).or_insert(0);
        if policy == GenerationPolicy::RejectWhileActive && *count > 0 {
            return None;
        }
        *count += 1;
        Some(Self {
            active: Arc::clone(active),
            key: key.to_string(),
        })
    }
}

impl Drop for ActiveSlot {
    fn drop(&mut self) {
        let mut jobs = lock(&self.active);
        if let Some(count) = jobs.get_mut(&self.key) {
            *count = count.saturating_sub(1);
            if *count == 0 {
                jobs.remove(&self.key);
            }
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
