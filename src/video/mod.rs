//! Marketing video generation.
//!
//! - [`VideoStudio`]: confirm, submit and start polling for a product
//! - [`VideoJob`]: the handle of a running job; dropping it cancels polling
//! - [`poll_job`]: the status poller itself
//! - [`JobStatusSource`]: where the poller reads job status from

mod poller;
mod studio;

pub use poller::{poll_job, JobStatusSource, PollOutcome, PollSettings};
pub use studio::{VideoJob, VideoStudio, GENERATION_STARTED};
