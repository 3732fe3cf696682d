//! HTTP client for showcase backend communication.
//!
//! This module provides the [`HttpClient`] type for sending JSON, multipart
//! and download requests to the backend.

use std::collections::HashMap;

use crate::clients::errors::{HttpError, HttpResponseError, InvalidBodyError};
use crate::clients::http_request::{HttpMethod, HttpRequest};
use crate::clients::http_response::{Download, HttpResponse};
use crate::config::{BaseUrl, ShowcaseConfig};

/// Client version from Cargo.toml.
pub const CLIENT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Longest raw-body excerpt kept in an [`HttpResponseError`] message.
const ERROR_EXCERPT_LEN: usize = 200;

/// HTTP client for making requests to the showcase backend.
///
/// The client handles:
/// - URL construction from the configured base URL
/// - Default headers including User-Agent
/// - JSON and multipart bodies
/// - Envelope decoding regardless of status code
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use showcase_client::{BaseUrl, ShowcaseConfig};
/// use showcase_client::clients::{HttpClient, HttpRequest, HttpMethod};
///
/// let config = ShowcaseConfig::builder()
///     .base_url(BaseUrl::new("http://localhost:5000").unwrap())
///     .build()
///     .unwrap();
/// let client = HttpClient::new(&config)?;
///
/// let request = HttpRequest::builder(HttpMethod::Get, "api/products/saved")
///     .build()
///     .unwrap();
/// let response = client.request(request).await?;
/// ```
#[derive(Debug)]
pub struct HttpClient {
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
    /// Base URL of the backend.
    base_url: BaseUrl,
    /// Default headers to include in all requests.
    default_headers: HashMap<String, String>,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new HTTP client from the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the underlying reqwest client cannot
    /// be created (e.g., TLS initialization failure).
    pub fn new(config: &ShowcaseConfig) -> Result<Self, HttpError> {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let user_agent = format!("{user_agent_prefix}Showcase Client v{CLIENT_VERSION}");

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());

        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url().clone(),
            default_headers,
        })
    }

    /// Returns the base URL for this client.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Sends a request and decodes the JSON envelope.
    ///
    /// Any response with a JSON body is returned as-is, including non-2xx
    /// responses; the backend signals failures through the envelope.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if:
    /// - Request validation fails (`InvalidRequest`)
    /// - Network error occurs (`Network`)
    /// - A non-2xx response has no JSON body (`Response`)
    /// - A 2xx response body is not JSON (`InvalidBody`)
    pub async fn request(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        let res = self.send(&request).await?;

        let code = res.status().as_u16();
        let res_headers = Self::parse_response_headers(res.headers());
        let body_text = res.text().await?;

        let body = if body_text.trim().is_empty() {
            serde_json::json!({})
        } else {
            match serde_json::from_str(&body_text) {
                Ok(body) => body,
                Err(source) if (200..300).contains(&code) => {
                    return Err(InvalidBodyError { code, source }.into());
                }
                Err(_) => {
                    return Err(Self::response_error(code, &res_headers, &body_text).into());
                }
            }
        };

        Ok(HttpResponse::new(code, res_headers, body))
    }

    /// Sends a request and returns the raw body of a successful response.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Response`] for any non-2xx status, plus the
    /// validation and network errors of [`request`](Self::request).
    pub async fn download(&self, request: HttpRequest) -> Result<Download, HttpError> {
        let res = self.send(&request).await?;

        let code = res.status().as_u16();
        let res_headers = Self::parse_response_headers(res.headers());
        if !(200..300).contains(&code) {
            let body_text = res.text().await.unwrap_or_default();
            return Err(Self::response_error(code, &res_headers, &body_text).into());
        }

        let bytes = res.bytes().await?;
        Ok(Download::new(bytes.to_vec(), &res_headers))
    }

    async fn send(&self, request: &HttpRequest) -> Result<reqwest::Response, HttpError> {
        request.verify()?;

        let url = self.base_url.join(&request.path);
        tracing::debug!(method = %request.http_method, %url, "dispatching request");

        let mut req_builder = match request.http_method {
            HttpMethod::Get => self.client.get(&url),
            HttpMethod::Post => self.client.post(&url),
            HttpMethod::Put => self.client.put(&url),
            HttpMethod::Delete => self.client.delete(&url),
        };

        for (key, value) in &self.default_headers {
            req_builder = req_builder.header(key, value);
        }

        // Multipart sets its own Content-Type with the boundary
        if let Some(upload) = &request.upload {
            let mut part = reqwest::multipart::Part::bytes(upload.bytes.clone())
                .file_name(upload.file_name.clone());
            if let Some(mime) = &upload.mime {
                part = part.mime_str(mime)?;
            }
            let form = reqwest::multipart::Form::new().part(upload.field.clone(), part);
            req_builder = req_builder.multipart(form);
        } else if let Some(body) = &request.body {
            if let Some(body_type) = &request.body_type {
                req_builder = req_builder.header("Content-Type", body_type.as_content_type());
            }
            req_builder = req_builder.body(body.to_string());
        }

        Ok(req_builder.send().await?)
    }

    /// Parses response headers into a `HashMap`.
    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }

    fn response_error(
        code: u16,
        headers: &HashMap<String, Vec<String>>,
        body_text: &str,
    ) -> HttpResponseError {
        let excerpt: String = body_text.trim().chars().take(ERROR_EXCERPT_LEN).collect();
        let message = if excerpt.is_empty() {
            reqwest::StatusCode::from_u16(code)
                .ok()
                .and_then(|status| status.canonical_reason())
                .unwrap_or("Unexpected response")
                .to_string()
        } else {
            excerpt
        };

        HttpResponseError {
            code,
            message,
            error_reference: headers
                .get("x-request-id")
                .and_then(|values| values.first())
                .cloned(),
        }
    }
}
