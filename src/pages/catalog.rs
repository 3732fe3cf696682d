//! The saved-product management page.
//!
//! [`CatalogManager`] mirrors the server-side saved list. It never edits its
//! copy locally: every successful mutation is followed by a full re-fetch of
//! the list and the statistics.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::api::{AddProduct, AddedProduct, ApiError, ProductEdit, ShowcaseClient, UploadedFile};
use crate::clients::FileUpload;
use crate::config::{LinkType, Store};
use crate::error::ValidationError;
use crate::model::{Product, ProductId};
use crate::prompt::Prompter;
use crate::render::{render_saved_grid, ProductCard};

/// File name used when exporting into a directory and the server suggests none.
pub const DEFAULT_EXPORT_FILE: &str = "products_export.json";

/// Message rendered in place of the list when it cannot be loaded.
pub const LOAD_FAILED: &str = "Error loading saved products";

/// Confirmation asked before a product is removed.
pub const CONFIRM_REMOVE: &str = "Are you sure you want to remove this product?";

/// An edit form pre-filled from a saved product.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditForm {
    /// The product being edited.
    pub id: ProductId,
    /// The editable fields.
    pub fields: ProductEdit,
    /// The current price, shown read-only.
    pub price: String,
}

/// State of the saved-product page.
pub struct CatalogManager {
    client: Arc<ShowcaseClient>,
    prompter: Arc<dyn Prompter>,
    store: Store,
    link_type: LinkType,
    products: Vec<Product>,
    cards: Vec<ProductCard>,
    html: String,
    saved_count: u64,
    video_count: usize,
    status: Option<String>,
}

impl fmt::Debug for CatalogManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CatalogManager")
            .field("store", &self.store)
            .field("link_type", &self.link_type)
            .field("products", &self.products.len())
            .field("saved_count", &self.saved_count)
            .field("video_count", &self.video_count)
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

impl CatalogManager {
    /// Creates an empty page; call [`refresh`](Self::refresh) to load it.
    #[must_use]
    pub fn new(client: Arc<ShowcaseClient>, prompter: Arc<dyn Prompter>) -> Self {
        Self {
            client,
            prompter,
            store: Store::default(),
            link_type: LinkType::default(),
            products: Vec::new(),
            cards: Vec::new(),
            html: String::new(),
            saved_count: 0,
            video_count: 0,
            status: None,
        }
    }

    /// Selects the store new URLs are validated against.
    pub fn set_store(&mut self, store: Store) {
        self.store = store;
    }

    /// Selects whether new URLs are sent as affiliate links.
    pub fn set_link_type(&mut self, link_type: LinkType) {
        self.link_type = link_type;
    }

    /// Returns the URL input placeholder for the current selection.
    #[must_use]
    pub const fn placeholder(&self) -> &'static str {
        self.link_type.placeholder(self.store)
    }

    /// Returns the products currently shown.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Returns the rendered cards currently shown.
    #[must_use]
    pub fn cards(&self) -> &[ProductCard] {
        &self.cards
    }

    /// Returns the rendered product grid.
    #[must_use]
    pub fn html(&self) -> &str {
        &self.html
    }

    /// Returns the number of saved products reported by the server.
    #[must_use]
    pub const fn saved_count(&self) -> u64 {
        self.saved_count
    }

    /// Returns the number of generated videos.
    #[must_use]
    pub const fn video_count(&self) -> usize {
        self.video_count
    }

    /// Returns the status line of the add form.
    #[must_use]
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Re-fetches the saved list and the statistics.
    ///
    /// On failure the list area shows an error notice and both counts drop
    /// to zero.
    ///
    /// # Errors
    ///
    /// Returns the [`ApiError`] of the saved-list request.
    pub async fn refresh(&mut self) -> Result<(), ApiError> {
        let saved = self.client.saved_products().await;
        self.video_count = match self.client.list_videos().await {
            Ok(videos) => videos.len(),
            Err(error) => {
                tracing::warn!(%error, "failed to count videos");
                0
            }
        };

        match saved {
            Ok(saved) => {
                self.saved_count = saved.count;
                self.show(saved.products);
                Ok(())
            }
            Err(error) => {
                tracing::warn!(%error, "failed to load saved products");
                self.saved_count = 0;
                self.products.clear();
                self.cards.clear();
                self.html = format!(r#"<p class="error-state">{LOAD_FAILED}</p>"#);
                Err(error)
            }
        }
    }

    /// Filters the shown list through the server-side saved search.
    ///
    /// Counts are left untouched; a failed search keeps the current list.
    ///
    /// # Errors
    ///
    /// Returns the [`ApiError`] of the search request.
    pub async fn search(&mut self, query: &str) -> Result<(), ApiError> {
        let products = self.client.search_saved(query).await?;
        self.show(products);
        Ok(())
    }

    /// Adds a product by URL using the selected store and link type.
    ///
    /// The outcome is written to the [`status`](Self::status) line.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] (wrapped in [`ApiError`]) without any
    /// request when the URL is blank or not on the store's allow-list.
    pub async fn add(&mut self, url: &str) -> Result<AddedProduct, ApiError> {
        let result = match AddProduct::new(url, self.store, self.link_type) {
            Ok(request) => self.client.add_product(&request).await,
            Err(error) => {
                let error = ApiError::from(error);
                self.prompter.alert(&error.user_message());
                return Err(error);
            }
        };

        match result {
            Ok(added) => {
                let mut status = "Product added successfully!".to_string();
                if added.is_affiliate {
                    status.push_str(" Affiliate link detected.");
                }
                self.status = Some(status);
                self.refresh_after_mutation().await;
                Ok(added)
            }
            Err(error) => {
                self.status = Some(format!("Error: {}", error.user_message()));
                Err(error)
            }
        }
    }

    /// Removes a saved product after confirmation.
    ///
    /// Returns `Ok(false)` when the operator declines.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingIdentifier`] for a blank identifier.
    pub async fn remove(&mut self, id: &str) -> Result<bool, ApiError> {
        let id = self.require_id(id)?;
        if !self.prompter.confirm(CONFIRM_REMOVE) {
            return Ok(false);
        }
        match self.client.remove_product(&id).await {
            Ok(()) => {
                self.prompter.alert("Product removed successfully");
                self.refresh_after_mutation().await;
                Ok(true)
            }
            Err(error) => Err(self.report("Failed to remove product", error)),
        }
    }

    /// Loads the edit form for a saved product.
    ///
    /// The saved list is re-fetched so the form reflects the server state.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingIdentifier`] for a blank identifier
    /// and [`ApiError::Rejected`] when no saved product has that identifier.
    pub async fn edit_form(&mut self, id: &str) -> Result<EditForm, ApiError> {
        let id = self.require_id(id)?;
        let saved = match self.client.saved_products().await {
            Ok(saved) => saved,
            Err(error) => return Err(self.report("Failed to load products", error)),
        };
        let Some(product) = saved.products.iter().find(|p| p.id().as_ref() == Some(&id)) else {
            return Err(self.report(
                "Failed to load product for editing",
                ApiError::Rejected {
                    message: "Product not found in saved products".to_string(),
                },
            ));
        };
        Ok(EditForm {
            fields: ProductEdit::from_product(product),
            price: product.display_price().to_string(),
            id,
        })
    }

    /// Saves an edit form.
    ///
    /// # Errors
    ///
    /// Returns the [`ApiError`] of the update request.
    pub async fn save_edit(&mut self, form: &EditForm) -> Result<Option<Product>, ApiError> {
        match self.client.update_product(&form.id, &form.fields).await {
            Ok(product) => {
                self.prompter.alert("Product updated successfully!");
                self.refresh_after_mutation().await;
                Ok(product)
            }
            Err(error) => Err(self.report("Failed to update product", error)),
        }
    }

    /// Imports products from an in-memory file.
    ///
    /// Returns the number of imported products.
    ///
    /// # Errors
    ///
    /// Returns the [`ApiError`] of the import request.
    pub async fn import(&mut self, file: FileUpload) -> Result<u64, ApiError> {
        match self.client.import_products(file).await {
            Ok(count) => {
                self.prompter
                    .alert(&format!("Imported {count} products successfully!"));
                self.refresh_after_mutation().await;
                Ok(count)
            }
            Err(error) => Err(self.report("Import failed", error)),
        }
    }

    /// Imports products from a file on disk.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Io`] if the file cannot be read.
    pub async fn import_file(&mut self, path: impl AsRef<Path>) -> Result<u64, ApiError> {
        let path = path.as_ref();
        let file = match FileUpload::from_path(path).await {
            Ok(file) => file.mime("application/json"),
            Err(source) => {
                return Err(self.report(
                    "Import failed",
                    ApiError::Io {
                        path: path.to_path_buf(),
                        source,
                    },
                ))
            }
        };
        self.import(file).await
    }

    /// Exports the saved products to `target`.
    ///
    /// When `target` is a directory the file is named after the server's
    /// suggestion, falling back to [`DEFAULT_EXPORT_FILE`]. Returns the path
    /// written.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] for a failed download and [`ApiError::Io`]
    /// if the file cannot be written.
    pub async fn export_to(&self, target: impl AsRef<Path>) -> Result<PathBuf, ApiError> {
        let download = match self.client.export_products().await {
            Ok(download) => download,
            Err(error) => return Err(self.report("Export failed", error)),
        };

        let target = target.as_ref();
        let path = if tokio::fs::metadata(target)
            .await
            .is_ok_and(|meta| meta.is_dir())
        {
            let name = download
                .file_name
                .as_deref()
                .and_then(|name| Path::new(name).file_name())
                .map_or_else(|| PathBuf::from(DEFAULT_EXPORT_FILE), PathBuf::from);
            target.join(name)
        } else {
            target.to_path_buf()
        };

        if let Err(source) = tokio::fs::write(&path, &download.bytes).await {
            return Err(self.report("Export failed", ApiError::Io { path, source }));
        }
        self.prompter.alert("Products exported successfully!");
        Ok(path)
    }

    /// Uploads an image for the edit form; the returned URL is absolute.
    ///
    /// # Errors
    ///
    /// Returns the [`ApiError`] of the upload request.
    pub async fn upload_image(&self, file: FileUpload) -> Result<UploadedFile, ApiError> {
        match self.client.upload_image(file).await {
            Ok(uploaded) => {
                self.prompter.alert("Image uploaded successfully!");
                Ok(uploaded)
            }
            Err(error) => Err(self.report("Failed to upload image", error)),
        }
    }

    /// Uploads a video for the edit form; the returned URL is absolute.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::UnsupportedVideoFormat`] without any
    /// request for files that are not mp4, mov, avi or webm.
    pub async fn upload_video(&self, file: FileUpload) -> Result<UploadedFile, ApiError> {
        match self.client.upload_video(file).await {
            Ok(uploaded) => {
                self.prompter.alert("Video uploaded successfully!");
                Ok(uploaded)
            }
            Err(error) => Err(self.report("Failed to upload video", error)),
        }
    }

    /// Translates an English description to Hebrew.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyInput`] for blank text and
    /// [`ApiError::Rejected`] when the translation service is unavailable.
    pub async fn translate(&self, text: &str) -> Result<String, ApiError> {
        match self.client.translate(text).await {
            Ok(translated) => Ok(translated),
            Err(error) => Err(self.report(
                "Cannot translate right now. Please enter the Hebrew description manually",
                error,
            )),
        }
    }

    fn show(&mut self, products: Vec<Product>) {
        let (html, cards) = render_saved_grid(&products);
        self.products = products;
        self.cards = cards;
        self.html = html;
    }

    async fn refresh_after_mutation(&mut self) {
        // Already logged and rendered as an error notice
        let _ = self.refresh().await;
    }

    fn require_id(&self, id: &str) -> Result<ProductId, ApiError> {
        ProductId::new(id).ok_or_else(|| {
            let error = ApiError::from(ValidationError::MissingIdentifier);
            self.prompter.alert(&error.user_message());
            error
        })
    }

    /// Shows an error to the operator and hands it back.
    fn report(&self, context: &str, error: ApiError) -> ApiError {
        if error.is_validation() {
            self.prompter.alert(&error.user_message());
        } else {
            self.prompter
                .alert(&format!("{context}: {}", error.user_message()));
        }
        error
    }
}
