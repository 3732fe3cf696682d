//! HTTP client types for showcase backend communication.
//!
//! This module provides the transport layer used by every page component.
//! It handles request validation, JSON and multipart bodies, raw downloads,
//! and the mapping of transport failures into [`HttpError`].
//!
//! # Overview
//!
//! - [`HttpClient`]: The async HTTP client
//! - [`HttpRequest`]: A request to be sent to the backend
//! - [`HttpResponse`]: A decoded JSON response
//! - [`Download`]: A raw file body
//! - [`FileUpload`]: A file sent as a multipart form part
//! - [`HttpMethod`] and [`DataType`]: Request method and body content type
//!
//! # Retry Behavior
//!
//! The client never retries. The only repeated request in the crate is the
//! video status poll, which lives in [`crate::video`].

mod errors;
mod http_client;
mod http_request;
mod http_response;

pub use errors::{HttpError, HttpResponseError, InvalidBodyError, InvalidHttpRequestError};
pub use http_client::{HttpClient, CLIENT_VERSION};
pub use http_request::{DataType, FileUpload, HttpMethod, HttpRequest, HttpRequestBuilder};
pub use http_response::{parse_content_disposition, Download, HttpResponse};
