//! Error type for backend API operations.
//!
//! [`ApiError`] is what every typed endpoint method and page component
//! returns. It separates the three failure classes operators care about:
//!
//! - [`ApiError::Validation`]: rejected client-side, nothing was sent
//! - [`ApiError::Http`]: the transport failed or the response was not JSON
//! - [`ApiError::Rejected`]: the backend answered with `success: false`
//!
//! plus [`ApiError::Io`] for local file access during import and export.
//!
//! # Example
//!
//! ```rust
//! use showcase_client::api::ApiError;
//! use showcase_client::ValidationError;
//!
//! let error = ApiError::from(ValidationError::EmptyInput { field: "a search term" });
//! assert_eq!(error.user_message(), "Please enter a search term.");
//!
//! let error = ApiError::Rejected { message: "Product not found".to_string() };
//! assert_eq!(error.user_message(), "Product not found");
//! ```

use std::path::PathBuf;

use thiserror::Error;

use crate::clients::{HttpError, InvalidHttpRequestError};
use crate::error::ValidationError;

/// Message shown for transport failures; the details go to the log.
pub const TRANSPORT_FAILURE_MESSAGE: &str =
    "Could not reach the showcase server. Please try again.";

/// Error type for backend API operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Operator input was rejected before any request was sent.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// An HTTP-level error occurred.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// The backend reported an application failure.
    #[error("Request rejected: {message}")]
    Rejected {
        /// The `error` or `message` field of the envelope.
        message: String,
    },

    /// A local file could not be read or written.
    #[error("Failed to access '{}': {source}", .path.display())]
    Io {
        /// The file that was accessed.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl From<InvalidHttpRequestError> for ApiError {
    fn from(error: InvalidHttpRequestError) -> Self {
        Self::Http(HttpError::InvalidRequest(error))
    }
}

impl ApiError {
    /// Returns the text shown to the operator for this error.
    ///
    /// Validation and application failures carry their own message;
    /// transport failures collapse into [`TRANSPORT_FAILURE_MESSAGE`].
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(e) => e.to_string(),
            Self::Rejected { message } => message.clone(),
            Self::Http(_) => TRANSPORT_FAILURE_MESSAGE.to_string(),
            Self::Io { .. } => self.to_string(),
        }
    }

    /// Returns `true` if the error was raised before any request was sent.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Returns `true` for transport failures.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Http(_))
    }
}
