//! HTTP-specific error types for the showcase client.
//!
//! This module contains error types for HTTP operations, including response
//! errors, undecodable bodies, and request validation failures.
//!
//! # Error Handling
//!
//! The client uses specific error types for different failure scenarios:
//!
//! - [`HttpResponseError`]: Non-2xx HTTP responses that carry no JSON envelope
//! - [`InvalidBodyError`]: 2xx responses whose body is not JSON
//! - [`InvalidHttpRequestError`]: When a request fails validation before sending
//! - [`HttpError`]: Unified error type encompassing all HTTP-related errors
//!
//! Non-2xx responses that *do* carry a JSON body are not errors at this
//! layer: the backend reports application failures through its envelope, and
//! status codes are not distinguished beyond that.
//!
//! # Example
//!
//! ```rust,ignore
//! use showcase_client::clients::{HttpClient, HttpRequest, HttpMethod, HttpError};
//!
//! match client.request(request).await {
//!     Ok(response) => println!("Envelope: {}", response.body),
//!     Err(HttpError::Response(e)) => println!("HTTP {}: {}", e.code, e.message),
//!     Err(HttpError::InvalidBody(e)) => println!("Not JSON: {}", e),
//!     Err(HttpError::InvalidRequest(e)) => println!("Invalid request: {}", e),
//!     Err(HttpError::Network(e)) => println!("Network error: {}", e),
//! }
//! ```

use thiserror::Error;

/// Error returned when a non-successful response carries no JSON body.
#[derive(Debug, Error)]
#[error("HTTP {code}: {message}")]
pub struct HttpResponseError {
    /// The HTTP status code of the response.
    pub code: u16,
    /// The status reason or the start of the raw body.
    pub message: String,
    /// Reference ID for error reporting (from X-Request-Id header).
    pub error_reference: Option<String>,
}

/// Error returned when a successful response body is not valid JSON.
#[derive(Debug, Error)]
#[error("Response with status {code} is not valid JSON: {source}")]
pub struct InvalidBodyError {
    /// The HTTP status code of the response.
    pub code: u16,
    /// The underlying JSON error.
    #[source]
    pub source: serde_json::Error,
}

/// Error returned when an HTTP request fails validation.
///
/// This error is raised before a request is sent if it fails validation
/// checks, such as:
/// - Missing body for POST/PUT requests
/// - Body provided without `body_type`
/// - A JSON body and a file upload on the same request
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// A request body was provided without specifying the body type.
    #[error("Cannot set a body without also setting body_type.")]
    MissingBodyType,

    /// A POST or PUT request was made without a body.
    #[error("Cannot use {method} without specifying data.")]
    MissingBody {
        /// The HTTP method that requires a body.
        method: String,
    },

    /// The declared body type does not match the body that was set.
    #[error("Body type {body_type} does not match the request body.")]
    BodyTypeMismatch {
        /// The declared body type.
        body_type: String,
    },

    /// Both a JSON body and a file upload were set.
    #[error("Cannot send a JSON body and a file upload in the same request.")]
    ConflictingBodies,
}

/// Unified error type for all HTTP-related errors.
#[derive(Debug, Error)]
pub enum HttpError {
    /// A non-2xx response without a JSON envelope.
    #[error(transparent)]
    Response(#[from] HttpResponseError),

    /// A 2xx response whose body could not be decoded.
    #[error(transparent)]
    InvalidBody(#[from] InvalidBodyError),

    /// Request validation failed.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// Network or connection error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_response_error_includes_status_code_in_message() {
        let error = HttpResponseError {
            code: 502,
            message: "Bad Gateway".to_string(),
            error_reference: None,
        };
        assert_eq!(error.to_string(), "HTTP 502: Bad Gateway");
    }

    #[test]
    fn test_invalid_body_error_reports_code() {
        let source = serde_json::from_str::<serde_json::Value>("<html>").unwrap_err();
        let error = InvalidBodyError { code: 200, source };
        assert!(error.to_string().contains("status 200"));
    }

    #[test]
    fn test_invalid_request_error_missing_body() {
        let error = InvalidHttpRequestError::MissingBody {
            method: "post".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Cannot use post without specifying data."
        );
    }

    #[test]
    fn test_http_error_wraps_validation_error() {
        let error: HttpError = InvalidHttpRequestError::ConflictingBodies.into();
        assert!(matches!(
            error,
            HttpError::InvalidRequest(InvalidHttpRequestError::ConflictingBodies)
        ));
    }
}
