//! HTTP request types for the showcase client.
//!
//! This module provides the [`HttpRequest`] type and its builder for
//! constructing requests to the showcase backend.

use std::fmt;
use std::path::Path;

use crate::clients::errors::InvalidHttpRequestError;

/// HTTP methods used by the showcase backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HttpMethod {
    /// HTTP GET method for retrieving resources.
    Get,
    /// HTTP POST method for creating resources and running searches.
    Post,
    /// HTTP PUT method for updating resources.
    Put,
    /// HTTP DELETE method for removing resources.
    Delete,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "get"),
            Self::Post => write!(f, "post"),
            Self::Put => write!(f, "put"),
            Self::Delete => write!(f, "delete"),
        }
    }
}

/// Content type for HTTP request bodies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DataType {
    /// JSON content type (`application/json`).
    Json,
    /// Multipart form upload (`multipart/form-data`).
    Multipart,
}

impl DataType {
    /// Returns the MIME type string for this data type.
    #[must_use]
    pub const fn as_content_type(&self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::Multipart => "multipart/form-data",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_content_type())
    }
}

/// A file sent as one part of a multipart form.
#[derive(Clone, PartialEq, Eq)]
pub struct FileUpload {
    /// The form field name (the backend expects `file`).
    pub field: String,
    /// The file name reported to the backend.
    pub file_name: String,
    /// The file contents.
    pub bytes: Vec<u8>,
    /// Optional MIME type of the file.
    pub mime: Option<String>,
}

impl FileUpload {
    /// Creates an upload for the `file` form field.
    #[must_use]
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            field: "file".to_string(),
            file_name: file_name.into(),
            bytes: bytes.into(),
            mime: None,
        }
    }

    /// Reads a file from disk into an upload for the `file` form field.
    ///
    /// # Errors
    ///
    /// Returns the I/O error if the file cannot be read.
    pub async fn from_path(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map_or_else(|| "upload".to_string(), |n| n.to_string_lossy().into_owned());
        Ok(Self::new(file_name, bytes))
    }

    /// Sets the MIME type of the file.
    #[must_use]
    pub fn mime(mut self, mime: impl Into<String>) -> Self {
        self.mime = Some(mime.into());
        self
    }

    /// Returns the lowercase file extension, if any.
    #[must_use]
    pub fn extension(&self) -> Option<String> {
        Path::new(&self.file_name)
            .extension()
            .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
    }
}

impl fmt::Debug for FileUpload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileUpload")
            .field("field", &self.field)
            .field("file_name", &self.file_name)
            .field("len", &self.bytes.len())
            .field("mime", &self.mime)
            .finish()
    }
}

/// An HTTP request to be sent to the showcase backend.
///
/// Use [`HttpRequest::builder`] to construct requests with the builder pattern.
///
/// # Example
///
/// ```rust
/// use showcase_client::clients::{HttpRequest, HttpMethod, DataType};
/// use serde_json::json;
///
/// let get_request = HttpRequest::builder(HttpMethod::Get, "api/products/saved")
///     .build()
///     .unwrap();
///
/// let post_request = HttpRequest::builder(HttpMethod::Post, "api/search")
///     .body(json!({"keywords": "headphones", "store": "amazon", "count": 20}))
///     .body_type(DataType::Json)
///     .build()
///     .unwrap();
/// ```
#[derive(Clone, Debug)]
pub struct HttpRequest {
    /// The HTTP method for this request.
    pub http_method: HttpMethod,
    /// The path (relative to the base URL) for this request.
    pub path: String,
    /// The JSON request body, if any.
    pub body: Option<serde_json::Value>,
    /// The content type of the body.
    pub body_type: Option<DataType>,
    /// The file sent as a multipart form, if any.
    pub upload: Option<FileUpload>,
}

impl HttpRequest {
    /// Creates a new builder for constructing an `HttpRequest`.
    #[must_use]
    pub fn builder(method: HttpMethod, path: impl Into<String>) -> HttpRequestBuilder {
        HttpRequestBuilder::new(method, path)
    }

    /// Validates the request, ensuring it meets all requirements.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if:
    /// - both `body` and `upload` are set
    /// - a body is present but `body_type` is `None` or does not match it
    /// - `http_method` is `Post` or `Put` and there is no body
    pub fn verify(&self) -> Result<(), InvalidHttpRequestError> {
        if self.body.is_some() && self.upload.is_some() {
            return Err(InvalidHttpRequestError::ConflictingBodies);
        }

        let has_body = self.body.is_some() || self.upload.is_some();
        match (self.body_type, has_body) {
            (None, true) => return Err(InvalidHttpRequestError::MissingBodyType),
            (Some(DataType::Json), true) if self.body.is_none() => {
                return Err(InvalidHttpRequestError::BodyTypeMismatch {
                    body_type: DataType::Json.to_string(),
                })
            }
            (Some(DataType::Multipart), true) if self.upload.is_none() => {
                return Err(InvalidHttpRequestError::BodyTypeMismatch {
                    body_type: DataType::Multipart.to_string(),
                })
            }
            _ => {}
        }

        if matches!(self.http_method, HttpMethod::Post | HttpMethod::Put) && !has_body {
            return Err(InvalidHttpRequestError::MissingBody {
                method: self.http_method.to_string(),
            });
        }

        Ok(())
    }
}

/// Builder for constructing [`HttpRequest`] instances.
#[derive(Debug)]
pub struct HttpRequestBuilder {
    http_method: HttpMethod,
    path: String,
    body: Option<serde_json::Value>,
    body_type: Option<DataType>,
    upload: Option<FileUpload>,
}

impl HttpRequestBuilder {
    fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            http_method: method,
            path: path.into(),
            body: None,
            body_type: None,
            upload: None,
        }
    }

    /// Sets the JSON request body.
    ///
    /// When setting a body, you must also set the body type via [`body_type`](Self::body_type).
    #[must_use]
    pub fn body(mut self, body: impl Into<serde_json::Value>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Sets the content type of the request body.
    #[must_use]
    pub const fn body_type(mut self, body_type: DataType) -> Self {
        self.body_type = Some(body_type);
        self
    }

    /// Sets a file upload and marks the body as multipart.
    #[must_use]
    pub fn upload(mut self, upload: FileUpload) -> Self {
        self.upload = Some(upload);
        self.body_type = Some(DataType::Multipart);
        self
    }

    /// Builds the [`HttpRequest`], validating it in the process.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if the request fails validation.
    pub fn build(self) -> Result<HttpRequest, InvalidHttpRequestError> {
        let request = HttpRequest {
            http_method: self.http_method,
            path: self.path,
            body: self.body,
            body_type: self.body_type,
            upload: self.upload,
        };
        request.verify()?;
        Ok(request)
    }
}
