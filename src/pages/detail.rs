//! The product detail page.

use std::fmt;
use std::sync::Arc;

use crate::api::{ApiError, ShowcaseClient};
use crate::model::{Product, ProductId};
use crate::render::{render_detail, render_message, ProductCard};

/// Shown when the page is opened without an identifier.
pub const MISSING_IDENTIFIER: &str = "Error: missing product identifier";

/// Shown when the backend does not know the product.
pub const PRODUCT_NOT_FOUND: &str = "Product not found";

/// Shown when the product could not be loaded.
pub const LOAD_FAILED: &str = "Error loading the product";

/// What the detail page currently shows.
#[derive(Clone, Debug, PartialEq)]
pub enum DetailState {
    /// Nothing has been loaded yet.
    Empty,
    /// The product was loaded and rendered.
    Loaded {
        /// The loaded product.
        product: Box<Product>,
        /// The rendered page and its actions.
        page: ProductCard,
    },
    /// A message is shown instead of a product.
    Message(&'static str),
}

/// State of the product detail page.
pub struct ProductDetailPage {
    client: Arc<ShowcaseClient>,
    state: DetailState,
    html: String,
}

impl fmt::Debug for ProductDetailPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProductDetailPage")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl ProductDetailPage {
    /// Creates an empty detail page.
    #[must_use]
    pub fn new(client: Arc<ShowcaseClient>) -> Self {
        Self {
            client,
            state: DetailState::Empty,
            html: String::new(),
        }
    }

    /// Returns what the page currently shows.
    #[must_use]
    pub const fn state(&self) -> &DetailState {
        &self.state
    }

    /// Returns the rendered page.
    #[must_use]
    pub fn html(&self) -> &str {
        &self.html
    }

    /// Loads and renders the product with the given identifier.
    ///
    /// A blank identifier is reported without contacting the backend.
    pub async fn load(&mut self, id: &str) -> &DetailState {
        self.state = match ProductId::new(id) {
            None => DetailState::Message(MISSING_IDENTIFIER),
            Some(id) => match self.client.product(&id).await {
                Ok(product) => {
                    let page = render_detail(&product);
                    DetailState::Loaded {
                        product: Box::new(product),
                        page,
                    }
                }
                Err(ApiError::Rejected { .. }) => DetailState::Message(PRODUCT_NOT_FOUND),
                Err(error) => {
                    tracing::warn!(product_id = %id, %error, "failed to load product");
                    DetailState::Message(LOAD_FAILED)
                }
            },
        };
        self.html = match &self.state {
            DetailState::Empty => String::new(),
            DetailState::Loaded { page, .. } => page.html.clone(),
            DetailState::Message(message) => render_message(message),
        };
        &self.state
    }
}
