//! Configuration types for the showcase client.
//!
//! This module provides the configuration used to construct the backend
//! client and the page components built on top of it.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`ShowcaseConfig`]: The configuration struct holding all client settings
//! - [`ShowcaseConfigBuilder`]: A builder for constructing [`ShowcaseConfig`] instances
//! - [`BaseUrl`]: A validated backend base URL
//! - [`Store`] and [`LinkType`]: Operator selections for adding products
//! - [`GenerationPolicy`]: How concurrent video requests for one product are treated
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use showcase_client::{BaseUrl, ShowcaseConfig};
//!
//! let config = ShowcaseConfig::builder()
//!     .base_url(BaseUrl::new("http://localhost:5000").unwrap())
//!     .poll_interval(Duration::from_secs(5))
//!     .max_polls(60)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.max_polls(), 60);
//! ```

mod newtypes;

pub use newtypes::{BaseUrl, LinkType, Store};

use std::time::Duration;

use crate::error::ConfigError;

/// Default interval between two video status polls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Default number of status polls before the client gives up (about five minutes).
pub const DEFAULT_MAX_POLLS: u32 = 60;

/// Default per-request timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Default result cap for keyword and category searches.
pub const DEFAULT_RESULT_LIMIT: u32 = 20;

/// Policy for a second video request on a product whose job is still pending.
///
/// The backend happily accepts concurrent jobs for one product; whether a
/// re-generation should be allowed is left to the embedding application.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GenerationPolicy {
    /// Every request starts its own job and poller.
    #[default]
    AllowConcurrent,
    /// A request is rejected while a poller for the same product is pending.
    RejectWhileActive,
}

/// Configuration for the showcase client.
///
/// # Thread Safety
///
/// `ShowcaseConfig` is `Clone`, `Send`, and `Sync`, making it safe to share
/// across threads and async tasks.
#[derive(Clone, Debug)]
pub struct ShowcaseConfig {
    base_url: BaseUrl,
    user_agent_prefix: Option<String>,
    request_timeout: Duration,
    poll_interval: Duration,
    max_polls: u32,
    generation_policy: GenerationPolicy,
    result_limit: u32,
}

impl ShowcaseConfig {
    /// Creates a new builder for constructing a `ShowcaseConfig`.
    #[must_use]
    pub fn builder() -> ShowcaseConfigBuilder {
        ShowcaseConfigBuilder::new()
    }

    /// Returns the backend base URL.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Returns the per-request timeout.
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    /// Returns the interval between video status polls.
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Returns the number of polls after which a pending job is abandoned.
    #[must_use]
    pub const fn max_polls(&self) -> u32 {
        self.max_polls
    }

    /// Returns the duplicate video-generation policy.
    #[must_use]
    pub const fn generation_policy(&self) -> GenerationPolicy {
        self.generation_policy
    }

    /// Returns the result cap for keyword and category searches.
    #[must_use]
    pub const fn result_limit(&self) -> u32 {
        self.result_limit
    }
}

// Verify ShowcaseConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ShowcaseConfig>();
};

/// Builder for constructing [`ShowcaseConfig`] instances.
///
/// The only required field is `base_url`.
///
/// # Defaults
///
/// - `request_timeout`: 30 seconds
/// - `poll_interval`: 5 seconds
/// - `max_polls`: 60
/// - `generation_policy`: [`GenerationPolicy::AllowConcurrent`]
/// - `result_limit`: 20
/// - `user_agent_prefix`: `None`
#[derive(Debug, Default)]
pub struct ShowcaseConfigBuilder {
    base_url: Option<BaseUrl>,
    user_agent_prefix: Option<String>,
    request_timeout: Option<Duration>,
    poll_interval: Option<Duration>,
    max_polls: Option<u32>,
    generation_policy: Option<GenerationPolicy>,
    result_limit: Option<u32>,
}

impl ShowcaseConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the backend base URL (required).
    #[must_use]
    pub fn base_url(mut self, url: BaseUrl) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub const fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Sets the interval between video status polls.
    #[must_use]
    pub const fn poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = Some(interval);
        self
    }

    /// Sets how many polls are made before a pending job is abandoned.
    #[must_use]
    pub const fn max_polls(mut self, max_polls: u32) -> Self {
        self.max_polls = Some(max_polls);
        self
    }

    /// Sets the duplicate video-generation policy.
    #[must_use]
    pub const fn generation_policy(mut self, policy: GenerationPolicy) -> Self {
        self.generation_policy = Some(policy);
        self
    }

    /// Sets the result cap for keyword and category searches.
    #[must_use]
    pub const fn result_limit(mut self, limit: u32) -> Self {
        self.result_limit = Some(limit);
        self
    }

    /// Builds the [`ShowcaseConfig`], validating that required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `base_url` is not set,
    /// and [`ConfigError::ZeroValue`] if a duration or count is zero.
    pub fn build(self) -> Result<ShowcaseConfig, ConfigError> {
        let base_url = self
            .base_url
            .ok_or(ConfigError::MissingRequiredField { field: "base_url" })?;

        let request_timeout = self.request_timeout.unwrap_or(DEFAULT_REQUEST_TIMEOUT);
        if request_timeout.is_zero() {
            return Err(ConfigError::ZeroValue {
                field: "request_timeout",
            });
        }

        let poll_interval = self.poll_interval.unwrap_or(DEFAULT_POLL_INTERVAL);
        if poll_interval.is_zero() {
            return Err(ConfigError::ZeroValue {
                field: "poll_interval",
            });
        }

        let max_polls = self.max_polls.unwrap_or(DEFAULT_MAX_POLLS);
        if max_polls == 0 {
            return Err(ConfigError::ZeroValue { field: "max_polls" });
        }

        let result_limit = self.result_limit.unwrap_or(DEFAULT_RESULT_LIMIT);
        if result_limit == 0 {
            return Err(ConfigError::ZeroValue {
                field: "result_limit",
            });
        }

        Ok(ShowcaseConfig {
            base_url,
            user_agent_prefix: self.user_agent_prefix,
            request_timeout,
            poll_interval,
            max_polls,
            generation_policy: self.generation_policy.unwrap_or_default(),
            result_limit,
        })
    }
}
