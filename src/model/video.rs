//! Video job identifiers, status payloads and the poll state machine states.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An opaque video job identifier issued by the backend.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(String);

impl JobId {
    /// Wraps a job identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl AsRef<str> for JobId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The body of `GET /api/video/status/<job>`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct JobStatus {
    /// `processing`, `completed`, `failed`, `not_found` or anything else.
    #[serde(default)]
    pub status: String,
    /// Human-readable progress or failure message.
    #[serde(default)]
    pub message: Option<String>,
    /// File name of the finished video.
    #[serde(default)]
    pub filename: Option<String>,
}

impl JobStatus {
    /// Maps the payload onto the poller state.
    ///
    /// Only `completed` and `failed` are terminal; every other value,
    /// including `not_found`, keeps the job pending.
    #[must_use]
    pub fn state(&self) -> PollState {
        match self.status.as_str() {
            "completed" => PollState::Completed {
                filename: self.filename.clone().unwrap_or_default(),
            },
            "failed" => PollState::Failed {
                message: self.message.clone().unwrap_or_default(),
            },
            _ => PollState::Pending,
        }
    }
}

/// State of a video generation job as seen by the poller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PollState {
    /// No terminal status observed yet.
    Pending,
    /// The backend finished rendering the video.
    Completed {
        /// The generated file name.
        filename: String,
    },
    /// The backend reported a failure.
    Failed {
        /// The failure message.
        message: String,
    },
    /// The poll budget ran out without a terminal status.
    TimedOut,
    /// The job handle was cancelled or dropped.
    Cancelled,
}

impl PollState {
    /// Returns `true` for every state except `Pending`.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }

    /// Returns the notice shown to the operator, if this state has one.
    ///
    /// `Pending` and `Cancelled` are silent.
    #[must_use]
    pub fn notice(&self) -> Option<String> {
        match self {
            Self::Completed { filename } => {
                Some(format!("Video generated successfully: {filename}"))
            }
            Self::Failed { message } => Some(format!("Video generation failed: {message}")),
            Self::TimedOut => Some("Video generation timed out. Try again later.".to_string()),
            Self::Pending | Self::Cancelled => None,
        }
    }
}

/// A generated video listed by `GET /api/videos`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct VideoFile {
    /// File name on the server.
    pub filename: String,
    /// Size in bytes.
    #[serde(default)]
    pub size: u64,
    /// Relative URL the file is served from.
    #[serde(default)]
    pub url: String,
}
