//! The public product listing.
//!
//! [`ShowcasePage`] shows the saved products to visitors. Cards link to the
//! detail page and carry no edit or remove actions.

use std::fmt;
use std::sync::Arc;

use crate::api::{ApiError, ShowcaseClient};
use crate::model::Product;
use crate::pages::catalog::LOAD_FAILED;
use crate::render::{render_showcase_grid, ProductCard};

/// State of the public listing.
pub struct ShowcasePage {
    client: Arc<ShowcaseClient>,
    products: Vec<Product>,
    cards: Vec<ProductCard>,
    html: String,
}

impl fmt::Debug for ShowcasePage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShowcasePage")
            .field("products", &self.products.len())
            .finish_non_exhaustive()
    }
}

impl ShowcasePage {
    /// Creates an empty page; call [`load`](Self::load) to fill it.
    #[must_use]
    pub fn new(client: Arc<ShowcaseClient>) -> Self {
        Self {
            client,
            products: Vec::new(),
            cards: Vec::new(),
            html: String::new(),
        }
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

    /// Returns the number of products shown.
    #[must_use]
    pub fn count(&self) -> usize {
        self.products.len()
    }

    /// Returns the count shown next to the page heading, e.g. `(3 products)`.
    #[must_use]
    pub fn count_label(&self) -> String {
        format!("({} products)", self.count())
    }

    /// Fetches the saved products and renders them.
    ///
    /// On failure the grid shows an error notice and the count drops to zero.
    ///
    /// # Errors
    ///
    /// Returns the [`ApiError`] of the saved-list request.
    pub async fn load(&mut self) -> Result<(), ApiError> {
        match self.client.saved_products().await {
            Ok(saved) => {
                let (html, cards) = render_showcase_grid(&saved.products);
                self.products = saved.products;
                self.cards = cards;
                self.html = html;
                Ok(())
            }
            Err(error) => {
                tracing::warn!(%error, "failed to load showcase products");
                self.products.clear();
                self.cards.clear();
                self.html = format!(r#"<p class="error-state">{LOAD_FAILED}</p>"#);
                Err(error)
            }
        }
    }
}
