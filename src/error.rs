//! Error types for configuration and client-side input validation.
//!
//! This module contains the two error families that are raised before any
//! request reaches the backend:
//!
//! - [`ConfigError`]: the client configuration itself is invalid
//! - [`ValidationError`]: operator input was rejected client-side
//!
//! # Error Handling
//!
//! All configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation. Input validation errors carry the human-readable
//! message that is shown to the operator.
//!
//! # Example
//!
//! ```rust
//! use showcase_client::{BaseUrl, ConfigError};
//!
//! let result = BaseUrl::new("");
//! assert!(matches!(result, Err(ConfigError::InvalidBaseUrl { .. })));
//! ```

use thiserror::Error;

use crate::config::Store;

/// Errors that can occur while building the client configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Base URL is invalid.
    #[error("Invalid base URL '{url}'. Please provide a URL with scheme and host (e.g., 'https://showcase.example.com').")]
    InvalidBaseUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// A duration or count that must be positive was zero.
    #[error("Invalid value for '{field}': must be greater than zero.")]
    ZeroValue {
        /// The name of the offending field.
        field: &'static str,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// A store name could not be parsed.
    #[error("Unknown store '{store}'. Expected 'amazon' or 'aliexpress'.")]
    UnknownStore {
        /// The unrecognized store name.
        store: String,
    },

    /// A link type could not be parsed.
    #[error("Unknown link type '{link_type}'. Expected 'regular' or 'affiliate'.")]
    UnknownLinkType {
        /// The unrecognized link type.
        link_type: String,
    },

    /// A search mode could not be parsed.
    #[error("Unknown search mode '{mode}'. Expected 'keywords', 'url' or 'category'.")]
    UnknownSearchMode {
        /// The unrecognized mode.
        mode: String,
    },
}

/// Operator input rejected before any network call.
///
/// The `Display` output of every variant is suitable for a blocking dialog.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required text field was empty after trimming.
    #[error("Please enter {field}.")]
    EmptyInput {
        /// What the operator was expected to type.
        field: &'static str,
    },

    /// The URL does not belong to the selected store.
    #[error("Please enter a valid {} link.", .store.display_name())]
    UrlNotAllowed {
        /// The store the URL was checked against.
        store: Store,
        /// The rejected URL.
        url: String,
    },

    /// The product has no extractable identifier.
    #[error("This product has no identifier and cannot be edited or removed.")]
    MissingIdentifier,

    /// The uploaded video file has an unsupported extension.
    #[error("Invalid video format '{file_name}'. Supported: mp4, mov, avi, webm.")]
    UnsupportedVideoFormat {
        /// The rejected file name.
        file_name: String,
    },

    /// A video is already being generated for this product.
    #[error("A video is already being generated for '{product}'.")]
    GenerationInProgress {
        /// The product key the active job was started for.
        product: String,
    },
}
