//! # Showcase Client
//!
//! An async client layer for an affiliate product-showcase backend: catalog
//! search, product cards rendered as HTML fragments, curation of the
//! server-side saved-product list, and marketing-video generation with
//! background status polling.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`ShowcaseConfig`] and [`ShowcaseConfigBuilder`]
//! - A typed client with one method per backend endpoint via [`api::ShowcaseClient`]
//! - Page components owning explicit view state via [`pages`]
//! - Pure, deterministic HTML rendering with typed card actions via [`render`]
//! - A cancellable video status poller via [`video`]
//! - Operator dialogs abstracted behind [`prompt::Prompter`]
//!
//! ## Quick Start
//!
//! ```rust
//! use showcase_client::{BaseUrl, ShowcaseConfig, GenerationPolicy};
//!
//! let config = ShowcaseConfig::builder()
//!     .base_url(BaseUrl::new("http://localhost:5000").unwrap())
//!     .generation_policy(GenerationPolicy::RejectWhileActive)
//!     .build()
//!     .unwrap();
//! ```
//!
//! ## Searching
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use showcase_client::api::ShowcaseClient;
//! use showcase_client::pages::{SearchController, SearchMode};
//! use showcase_client::prompt::RecordingPrompter;
//!
//! let client = ShowcaseClient::shared(config)?;
//! let mut search = SearchController::new(client, Arc::new(RecordingPrompter::answering(true)));
//! search.set_mode(SearchMode::Keywords);
//! search.search("wireless headphones").await?;
//! println!("{}", search.html());
//! ```
//!
//! ## Generating Videos
//!
//! ```rust,ignore
//! use showcase_client::video::VideoStudio;
//!
//! let studio = VideoStudio::new(client.clone(), prompter.clone());
//! if let Some(job) = studio.request(&product).await? {
//!     // Polling runs in the background; dropping `job` cancels it.
//!     let outcome = job.wait().await;
//! }
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: Pages are constructed with their collaborators
//! - **Fail-fast validation**: Operator input is checked before any request
//! - **Thread-safe**: The client and configuration are `Send + Sync`
//! - **Async-first**: Designed for use with the Tokio runtime
//! - **No client cache**: The saved list is re-fetched after every mutation
//!
//! ## Logging
//!
//! The crate emits [`tracing`] events and installs no subscriber.

pub mod api;
pub mod clients;
pub mod config;
pub mod error;
pub mod model;
pub mod pages;
pub mod prompt;
pub mod render;
pub mod video;

// Re-export public types at crate root for convenience
pub use config::{
    BaseUrl, GenerationPolicy, LinkType, ShowcaseConfig, ShowcaseConfigBuilder, Store,
};
pub use error::{ConfigError, ValidationError};

// Re-export HTTP client types
pub use clients::{
    DataType, Download, FileUpload, HttpClient, HttpError, HttpMethod, HttpRequest,
    HttpRequestBuilder, HttpResponse, HttpResponseError, InvalidBodyError,
    InvalidHttpRequestError,
};

// Re-export the domain types used across pages
pub use api::{ApiError, ShowcaseClient};
pub use model::{JobId, PollState, Product, ProductId};
pub use prompt::Prompter;
