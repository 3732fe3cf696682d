//! Typed client for the showcase backend endpoints.
//!
//! [`ShowcaseClient`] wraps the transport-level [`HttpClient`] with one
//! method per REST endpoint. Each method builds the request body, checks the
//! response envelope and decodes the payload.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::api::errors::ApiError;
use crate::api::requests::{AddProduct, ProductEdit};
use crate::clients::{
    DataType, Download, FileUpload, HttpClient, HttpError, HttpMethod, HttpRequest, HttpResponse,
    InvalidBodyError,
};
use crate::config::{ShowcaseConfig, Store};
use crate::error::ValidationError;
use crate::model::{Envelope, JobId, JobStatus, Product, ProductId, VideoFile};

/// Video file extensions accepted by the upload endpoint.
pub const VIDEO_EXTENSIONS: [&str; 4] = ["mp4", "mov", "avi", "webm"];

/// The saved product list and its server-side count.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct SavedProducts {
    /// The saved products, in server order.
    #[serde(default)]
    pub products: Vec<Product>,
    /// The number of saved products as reported by the server.
    #[serde(default)]
    pub count: u64,
}

/// The result of adding a product by URL.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct AddedProduct {
    /// The product as fetched and stored by the backend.
    #[serde(default)]
    pub product: Option<Product>,
    /// Whether the backend recognized an affiliate link.
    #[serde(default)]
    pub is_affiliate: bool,
    /// Confirmation message.
    #[serde(default)]
    pub message: Option<String>,
}

/// A file stored by one of the upload endpoints.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadedFile {
    /// Absolute URL of the stored file.
    pub url: String,
    /// Name under which the server stored the file.
    pub filename: String,
}

#[derive(Deserialize)]
struct UploadBody {
    url: String,
    #[serde(default)]
    filename: String,
}

#[derive(Deserialize)]
struct GenerationStarted {
    video_id: JobId,
}

/// Client for the showcase backend REST API.
///
/// # Thread Safety
///
/// `ShowcaseClient` is `Send + Sync`; page components share one instance
/// through an [`Arc`].
///
/// # Example
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use showcase_client::{BaseUrl, ShowcaseConfig, Store};
/// use showcase_client::api::ShowcaseClient;
///
/// let config = ShowcaseConfig::builder()
///     .base_url(BaseUrl::new("http://localhost:5000")?)
///     .build()?;
/// let client = Arc::new(ShowcaseClient::new(config)?);
///
/// let products = client.search("headphones", Store::Amazon).await?;
/// ```
#[derive(Debug)]
pub struct ShowcaseClient {
    http: HttpClient,
    config: ShowcaseConfig,
}

// Verify ShowcaseClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ShowcaseClient>();
};

impl ShowcaseClient {
    /// Creates a client for the configured backend.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the HTTP client cannot be created.
    pub fn new(config: ShowcaseConfig) -> Result<Self, ApiError> {
        let http = HttpClient::new(&config)?;
        Ok(Self { http, config })
    }

    /// Creates a client and wraps it in an [`Arc`] for sharing.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the HTTP client cannot be created.
    pub fn shared(config: ShowcaseConfig) -> Result<Arc<Self>, ApiError> {
        Self::new(config).map(Arc::new)
    }

    /// Returns the configuration this client was built with.
    #[must_use]
    pub const fn config(&self) -> &ShowcaseConfig {
        &self.config
    }

    /// Returns the underlying HTTP client.
    #[must_use]
    pub const fn http(&self) -> &HttpClient {
        &self.http
    }

    /// Searches the store catalog by keywords (`POST /api/search`).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure or a failed envelope.
    pub async fn search(&self, keywords: &str, store: Store) -> Result<Vec<Product>, ApiError> {
        let body = json!({
            "keywords": keywords,
            "store": store,
            "count": self.config.result_limit(),
        });
        let response = self.send(json_request(HttpMethod::Post, "api/search", body)?).await?;
        product_list(response)
    }

    /// Resolves a single product page URL (`POST /api/product/url`).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure or a failed envelope.
    pub async fn product_by_url(&self, url: &str, store: Store) -> Result<Vec<Product>, ApiError> {
        let body = json!({ "url": url, "store": store });
        let response = self
            .send(json_request(HttpMethod::Post, "api/product/url", body)?)
            .await?;
        product_list(response)
    }

    /// Lists the products of a category page (`POST /api/category`).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure or a failed envelope.
    pub async fn category(&self, url: &str) -> Result<Vec<Product>, ApiError> {
        let body = json!({ "url": url, "max_products": self.config.result_limit() });
        let response = self.send(json_request(HttpMethod::Post, "api/category", body)?).await?;
        product_list(response)
    }

    /// Fetches one product by identifier (`GET /api/product/<id>`).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Rejected`] when the product is not found.
    pub async fn product(&self, id: &ProductId) -> Result<Product, ApiError> {
        let path = format!("api/product/{}", urlencoding::encode(id.as_ref()));
        let response = accept(self.send(HttpRequest::builder(HttpMethod::Get, path).build()?).await?)?;
        let code = response.code;
        let mut body = response.body;
        decode(code, take(&mut body, "product"))
    }

    /// Lists the saved products (`GET /api/products/saved`).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure or a failed envelope.
    pub async fn saved_products(&self) -> Result<SavedProducts, ApiError> {
        let request = HttpRequest::builder(HttpMethod::Get, "api/products/saved").build()?;
        let response = accept(self.send(request).await?)?;
        decode(response.code, response.body)
    }

    /// Searches the saved products (`POST /api/products/search`).
    ///
    /// An empty query returns every saved product.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure or a failed envelope.
    pub async fn search_saved(&self, query: &str) -> Result<Vec<Product>, ApiError> {
        let body = json!({ "query": query.trim() });
        let response = accept(
            self.send(json_request(HttpMethod::Post, "api/products/search", body)?)
                .await?,
        )?;
        let saved: SavedProducts = decode(response.code, response.body)?;
        Ok(saved.products)
    }

    /// Adds a product by URL (`POST /api/products/add`).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure or a failed envelope.
    pub async fn add_product(&self, request: &AddProduct) -> Result<AddedProduct, ApiError> {
        let response = accept(
            self.send(json_request(
                HttpMethod::Post,
                "api/products/add",
                request.to_body(),
            )?)
            .await?,
        )?;
        decode(response.code, response.body)
    }

    /// Removes a saved product (`DELETE /api/products/remove/<id>`).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Rejected`] when the product is not found.
    pub async fn remove_product(&self, id: &ProductId) -> Result<(), ApiError> {
        let path = format!("api/products/remove/{}", urlencoding::encode(id.as_ref()));
        accept(self.send(HttpRequest::builder(HttpMethod::Delete, path).build()?).await?)?;
        Ok(())
    }

    /// Updates the editable fields of a saved product
    /// (`PUT /api/products/update/<id>`).
    ///
    /// Returns the updated product when the backend echoes it.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Rejected`] when the product is not found.
    pub async fn update_product(
        &self,
        id: &ProductId,
        edit: &ProductEdit,
    ) -> Result<Option<Product>, ApiError> {
        let path = format!("api/products/update/{}", urlencoding::encode(id.as_ref()));
        let response = accept(
            self.send(json_request(HttpMethod::Put, path, to_json(edit)?)?)
                .await?,
        )?;
        let code = response.code;
        let mut body = response.body;
        match take(&mut body, "product") {
            Value::Null => Ok(None),
            product => decode(code, product).map(Some),
        }
    }

    /// Imports products from an uploaded JSON file (`POST /api/products/import`).
    ///
    /// Returns the number of imported products.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure or a failed envelope.
    pub async fn import_products(&self, file: FileUpload) -> Result<u64, ApiError> {
        let request = HttpRequest::builder(HttpMethod::Post, "api/products/import")
            .upload(file)
            .build()?;
        let response = accept(self.send(request).await?)?;
        Ok(response.body.get("count").and_then(Value::as_u64).unwrap_or(0))
    }

    /// Downloads the saved products as a file (`GET /api/products/export`).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] for any non-2xx response.
    pub async fn export_products(&self) -> Result<Download, ApiError> {
        let request = HttpRequest::builder(HttpMethod::Get, "api/products/export").build()?;
        self.http.download(request).await.map_err(|e| {
            tracing::warn!(error = %e, "export download failed");
            ApiError::from(e)
        })
    }

    /// Uploads a product image (`POST /api/products/upload-image`).
    ///
    /// The returned URL is absolute.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure or a failed envelope.
    pub async fn upload_image(&self, file: FileUpload) -> Result<UploadedFile, ApiError> {
        self.upload("api/products/upload-image", file).await
    }

    /// Uploads a product video (`POST /api/products/upload-video`).
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::UnsupportedVideoFormat`] without sending
    /// anything unless the file extension is one of [`VIDEO_EXTENSIONS`].
    pub async fn upload_video(&self, file: FileUpload) -> Result<UploadedFile, ApiError> {
        let supported = file
            .extension()
            .is_some_and(|ext| VIDEO_EXTENSIONS.contains(&ext.as_str()));
        if !supported {
            return Err(ValidationError::UnsupportedVideoFormat {
                file_name: file.file_name,
            }
            .into());
        }
        self.upload("api/products/upload-video", file).await
    }

    async fn upload(&self, path: &str, file: FileUpload) -> Result<UploadedFile, ApiError> {
        let request = HttpRequest::builder(HttpMethod::Post, path).upload(file).build()?;
        let response = accept(self.send(request).await?)?;
        let body: UploadBody = decode(response.code, response.body)?;
        Ok(UploadedFile {
            url: self.config.base_url().resolve(&body.url),
            filename: body.filename,
        })
    }

    /// Translates an English description to Hebrew (`POST /api/translate`).
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyInput`] for blank text, and
    /// [`ApiError::Rejected`] with the server's `message` (or `error`) when
    /// the translation service is unavailable.
    pub async fn translate(&self, text: &str) -> Result<String, ApiError> {
        if text.trim().is_empty() {
            return Err(ValidationError::EmptyInput {
                field: "an English description first",
            }
            .into());
        }
        let body = json!({ "text": text, "target": "he" });
        let response = self.send(json_request(HttpMethod::Post, "api/translate", body)?).await?;

        let envelope = Envelope::from_body(&response.body);
        let translated = response
            .body
            .get("translated")
            .and_then(Value::as_str)
            .filter(|t| !t.is_empty());
        match translated {
            Some(translated) if envelope.success => Ok(translated.to_string()),
            _ => Err(ApiError::Rejected {
                message: match envelope.message.as_deref().filter(|m| !m.is_empty()) {
                    Some(message) => message.to_string(),
                    None => envelope.failure_message(),
                },
            }),
        }
    }

    /// Lists the generated videos (`GET /api/videos`).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Rejected`] if the response carries an `error`.
    pub async fn list_videos(&self) -> Result<Vec<VideoFile>, ApiError> {
        let request = HttpRequest::builder(HttpMethod::Get, "api/videos").build()?;
        let response = self.send(request).await?;
        let envelope = Envelope::from_body(&response.body);
        if !response.is_ok() || envelope.error.is_some() {
            return Err(ApiError::Rejected {
                message: envelope.failure_message(),
            });
        }
        let code = response.code;
        let mut body = response.body;
        match take(&mut body, "videos") {
            Value::Null => Ok(Vec::new()),
            videos => decode(code, videos),
        }
    }

    /// Starts video generation for a product (`POST /api/video/generate`).
    ///
    /// The full product payload, including fields this crate does not
    /// interpret, is sent.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Rejected`] with the server message (or
    /// "Unknown error") when the backend refuses the job.
    pub async fn generate_video(&self, product: &Product) -> Result<JobId, ApiError> {
        let body = json!({ "product": to_json(product)? });
        let response = accept(
            self.send(json_request(HttpMethod::Post, "api/video/generate", body)?)
                .await?,
        )?;
        let started: GenerationStarted = decode(response.code, response.body)?;
        Ok(started.video_id)
    }

    /// Reads the status of a video job (`GET /api/video/status/<job>`).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure or a non-2xx response.
    pub async fn video_status(&self, job: &JobId) -> Result<JobStatus, ApiError> {
        let path = format!("api/video/status/{}", urlencoding::encode(job.as_ref()));
        let response = self.send(HttpRequest::builder(HttpMethod::Get, path).build()?).await?;
        if !response.is_ok() {
            return Err(ApiError::Rejected {
                message: Envelope::from_body(&response.body).failure_message(),
            });
        }
        decode(response.code, response.body)
    }

    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let path = request.path.clone();
        self.http.request(request).await.map_err(|e| {
            tracing::warn!(%path, error = %e, "backend request failed");
            ApiError::from(e)
        })
    }
}

fn json_request(
    method: HttpMethod,
    path: impl Into<String>,
    body: Value,
) -> Result<HttpRequest, ApiError> {
    Ok(HttpRequest::builder(method, path)
        .body(body)
        .body_type(DataType::Json)
        .build()?)
}

/// Passes a response through only if its envelope reports success.
fn accept(response: HttpResponse) -> Result<HttpResponse, ApiError> {
    let envelope = Envelope::from_body(&response.body);
    if envelope.success {
        Ok(response)
    } else {
        Err(ApiError::Rejected {
            message: envelope.failure_message(),
        })
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<Value, ApiError> {
    serde_json::to_value(value)
        .map_err(|source| HttpError::from(InvalidBodyError { code: 0, source }).into())
}

fn decode<T: DeserializeOwned>(code: u16, value: Value) -> Result<T, ApiError> {
    serde_json::from_value(value)
        .map_err(|source| HttpError::from(InvalidBodyError { code, source }).into())
}

fn take(body: &mut Value, key: &str) -> Value {
    body.get_mut(key).map(Value::take).unwrap_or_default()
}

/// Decodes the polymorphic search response.
///
/// `success` with a `products` array yields that list; otherwise a single
/// `product` yields a one-element list; a successful envelope with neither
/// is an empty result.
fn product_list(response: HttpResponse) -> Result<Vec<Product>, ApiError> {
    let envelope = Envelope::from_body(&response.body);
    let code = response.code;
    let mut body = response.body;

    if envelope.success {
        let products = take(&mut body, "products");
        if !products.is_null() {
            return decode(code, products);
        }
    }
    match take(&mut body, "product") {
        Value::Null if envelope.success => Ok(Vec::new()),
        Value::Null => Err(ApiError::Rejected {
            message: envelope.failure_message(),
        }),
        product => Ok(vec![decode(code, product)?]),
    }
}
