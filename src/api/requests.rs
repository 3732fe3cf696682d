//! Validated request payloads for the catalog endpoints.

use serde::Serialize;
use serde_json::{json, Value};

use crate::config::{LinkType, Store};
use crate::error::ValidationError;
use crate::model::Product;

/// A validated add-by-URL request.
///
/// ```rust
/// use showcase_client::{LinkType, Store, ValidationError};
/// use showcase_client::api::AddProduct;
///
/// assert!(AddProduct::new("https://amzn.to/abc", Store::Amazon, LinkType::Regular).is_ok());
/// assert!(matches!(
///     AddProduct::new("https://example.com/foo", Store::Amazon, LinkType::Regular),
///     Err(ValidationError::UrlNotAllowed { .. })
/// ));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AddProduct {
    url: String,
    store: Store,
    link_type: LinkType,
}

impl AddProduct {
    /// Validates the operator's input.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyInput`] for a blank URL and
    /// [`ValidationError::UrlNotAllowed`] when the URL is not on the store's
    /// domain allow-list.
    pub fn new(url: &str, store: Store, link_type: LinkType) -> Result<Self, ValidationError> {
        let url = url.trim();
        if url.is_empty() {
            return Err(ValidationError::EmptyInput {
                field: "a product link",
            });
        }
        if !store.allows_url(url) {
            return Err(ValidationError::UrlNotAllowed {
                store,
                url: url.to_string(),
            });
        }
        Ok(Self {
            url: url.to_string(),
            store,
            link_type,
        })
    }

    /// Returns the trimmed URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns the selected store.
    #[must_use]
    pub const fn store(&self) -> Store {
        self.store
    }

    /// Returns the selected link type.
    #[must_use]
    pub const fn link_type(&self) -> LinkType {
        self.link_type
    }

    pub(crate) fn to_body(&self) -> Value {
        let mut body = json!({
            "url": self.url,
            "store": self.store,
        });
        if self.link_type == LinkType::Affiliate {
            body["affiliate_link"] = Value::String(self.url.clone());
        }
        body
    }
}

/// The editable fields of a saved product.
///
/// The price is deliberately absent: the store-listed price is never
/// overwritten from the edit form.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ProductEdit {
    /// Product title.
    pub title: String,
    /// English description.
    pub description: String,
    /// Hebrew description.
    pub description_hebrew: String,
    /// Main image URL.
    pub image_url: String,
    /// Product video URL.
    pub video_url: String,
    /// Crossed-out original price label.
    pub original_price: String,
}

impl ProductEdit {
    /// Pre-fills the form from a saved product.
    #[must_use]
    pub fn from_product(product: &Product) -> Self {
        Self {
            title: product.title.clone().unwrap_or_default(),
            description: product.edit_description().to_string(),
            description_hebrew: product.edit_description_hebrew().to_string(),
            image_url: product.image_url.clone().unwrap_or_default(),
            video_url: product.display_video().unwrap_or_default().to_string(),
            original_price: product.original_price.clone().unwrap_or_default(),
        }
    }
}
