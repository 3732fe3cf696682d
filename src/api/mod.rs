//! Typed access to the showcase backend REST API.
//!
//! - [`ShowcaseClient`]: one async method per endpoint
//! - [`ApiError`]: the error every endpoint method returns
//! - [`AddProduct`] and [`ProductEdit`]: validated request payloads
//!
//! # Endpoints
//!
//! | Method | Endpoint |
//! |---|---|
//! | [`search`](ShowcaseClient::search) | `POST /api/search` |
//! | [`product_by_url`](ShowcaseClient::product_by_url) | `POST /api/product/url` |
//! | [`category`](ShowcaseClient::category) | `POST /api/category` |
//! | [`product`](ShowcaseClient::product) | `GET /api/product/<id>` |
//! | [`saved_products`](ShowcaseClient::saved_products) | `GET /api/products/saved` |
//! | [`search_saved`](ShowcaseClient::search_saved) | `POST /api/products/search` |
//! | [`add_product`](ShowcaseClient::add_product) | `POST /api/products/add` |
//! | [`remove_product`](ShowcaseClient::remove_product) | `DELETE /api/products/remove/<id>` |
//! | [`update_product`](ShowcaseClient::update_product) | `PUT /api/products/update/<id>` |
//! | [`import_products`](ShowcaseClient::import_products) | `POST /api/products/import` |
//! | [`export_products`](ShowcaseClient::export_products) | `GET /api/products/export` |
//! | [`upload_image`](ShowcaseClient::upload_image) | `POST /api/products/upload-image` |
//! | [`upload_video`](ShowcaseClient::upload_video) | `POST /api/products/upload-video` |
//! | [`translate`](ShowcaseClient::translate) | `POST /api/translate` |
//! | [`list_videos`](ShowcaseClient::list_videos) | `GET /api/videos` |
//! | [`generate_video`](ShowcaseClient::generate_video) | `POST /api/video/generate` |
//! | [`video_status`](ShowcaseClient::video_status) | `GET /api/video/status/<job>` |

mod client;
mod errors;
mod requests;

pub use client::{AddedProduct, SavedProducts, ShowcaseClient, UploadedFile, VIDEO_EXTENSIONS};
pub use errors::{ApiError, TRANSPORT_FAILURE_MESSAGE};
pub use requests::{AddProduct, ProductEdit};
