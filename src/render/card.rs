//! Product cards for search results and the saved-product list.

use std::fmt::Write as _;

use crate::model::{Product, ProductId};
use crate::render::{attr, price_row, rating_row, text};

/// Shown when a search yields no products.
pub const NO_RESULTS: &str = "No products found";

/// Shown when the saved list is empty.
pub const NO_SAVED_PRODUCTS: &str = "No saved products";

/// A user action bound to an element of a rendered card.
#[derive(Clone, Debug, PartialEq)]
pub enum CardAction {
    /// Open the affiliate purchase link.
    Buy {
        /// The affiliate URL, or `#` when the product has none.
        url: String,
    },
    /// Request a marketing video for the product.
    GenerateVideo {
        /// The full product payload sent to the backend.
        product: Box<Product>,
    },
    /// Open the product detail page.
    ViewDetail {
        /// The product identifier.
        id: ProductId,
    },
    /// Open the edit form of a saved product.
    Edit {
        /// The product identifier.
        id: ProductId,
    },
    /// Remove a saved product.
    Remove {
        /// The product identifier.
        id: ProductId,
    },
}

impl CardAction {
    /// Returns the `data-action` attribute value of this action.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Buy { .. } => "buy",
            Self::GenerateVideo { .. } => "generate-video",
            Self::ViewDetail { .. } => "view-detail",
            Self::Edit { .. } => "edit",
            Self::Remove { .. } => "remove",
        }
    }
}

/// A rendered card: the HTML fragment and the actions its elements trigger.
#[derive(Clone, Debug, PartialEq)]
pub struct ProductCard {
    /// The product identifier, if one could be derived.
    pub id: Option<ProductId>,
    /// The `<div class="product-card">` fragment.
    pub html: String,
    /// Actions in the order their elements appear in `html`.
    pub actions: Vec<CardAction>,
}

impl ProductCard {
    /// Looks up the action bound to a `data-action` value.
    #[must_use]
    pub fn action(&self, name: &str) -> Option<&CardAction> {
        self.actions.iter().find(|a| a.name() == name)
    }
}

/// Renders a search-result card.
///
/// The title links to the detail page when the product has an identifier.
///
/// ```rust
/// use showcase_client::model::Product;
/// use showcase_client::render::render_card;
///
/// let product = Product {
///     title: Some("Desk <Lamp>".to_string()),
///     affiliate_url: Some("https://amazon.com/dp/B08N5WRWNW?tag=x-20".to_string()),
///     ..Product::default()
/// };
/// let card = render_card(&product);
/// assert!(card.html.contains("Desk &lt;Lamp&gt;"));
/// assert!(card.action("view-detail").is_some());
/// ```
#[must_use]
pub fn render_card(product: &Product) -> ProductCard {
    build(product, false)
}

/// Renders a saved-list card.
///
/// Edit and remove buttons are only rendered when the product has an
/// identifier.
#[must_use]
pub fn render_saved_card(product: &Product) -> ProductCard {
    build(product, true)
}

/// Renders search results, or the no-results notice for an empty list.
#[must_use]
pub fn render_grid(products: &[Product]) -> (String, Vec<ProductCard>) {
    grid(products, render_card, NO_RESULTS)
}

/// Renders saved products as public cards, or the empty-list notice.
#[must_use]
pub fn render_showcase_grid(products: &[Product]) -> (String, Vec<ProductCard>) {
    grid(products, render_card, NO_SAVED_PRODUCTS)
}

/// Renders the saved list, or the empty-list notice.
#[must_use]
pub fn render_saved_grid(products: &[Product]) -> (String, Vec<ProductCard>) {
    grid(products, render_saved_card, NO_SAVED_PRODUCTS)
}

fn grid(
    products: &[Product],
    render: fn(&Product) -> ProductCard,
    empty: &str,
) -> (String, Vec<ProductCard>) {
    if products.is_empty() {
        return (format!(r#"<p class="empty-state">{}</p>"#, text(empty)), Vec::new());
    }
    let cards: Vec<ProductCard> = products.iter().map(render).collect();
    let html = cards.iter().map(|c| c.html.as_str()).collect::<String>();
    (html, cards)
}

fn build(product: &Product, saved: bool) -> ProductCard {
    let id = product.id();
    let title = product.display_title();
    let id_attr = id.as_ref().map_or_else(String::new, |id| attr(id.as_ref()));
    let mut actions = Vec::new();
    let mut html = String::new();

    let _ = write!(
        html,
        r#"<div class="product-card" data-product-id="{id_attr}"><img src="{}" alt="{}" class="product-image"><div class="product-info"><h3 class="product-title">"#,
        attr(product.display_image()),
        attr(title),
    );
    match (&id, saved) {
        (Some(id), false) => {
            let _ = write!(
                html,
                r#"<a href="/product/{}" data-action="view-detail" data-product-id="{id_attr}">{}</a>"#,
                attr(&urlencoding::encode(id.as_ref())),
                text(title)
            );
            actions.push(CardAction::ViewDetail { id: id.clone() });
        }
        _ => html.push_str(&text(title)),
    }
    html.push_str("</h3>");

    price_row(&mut html, product, "product-price");
    rating_row(&mut html, product);

    let buy_url = product.display_affiliate_url();
    let _ = write!(
        html,
        r#"<div class="product-actions"><a href="{}" target="_blank" rel="noopener" class="btn btn-success" data-action="buy">Buy now</a><button type="button" class="btn btn-secondary" data-action="generate-video" data-product-id="{id_attr}">Create video</button>"#,
        attr(buy_url)
    );
    actions.push(CardAction::Buy {
        url: buy_url.to_string(),
    });
    actions.push(CardAction::GenerateVideo {
        product: Box::new(product.clone()),
    });

    if saved {
        if let Some(id) = &id {
            let _ = write!(
                html,
                r#"<button type="button" class="btn btn-edit" data-action="edit" data-product-id="{id_attr}">Edit</button><button type="button" class="btn btn-remove" data-action="remove" data-product-id="{id_attr}">Remove</button>"#
            );
            actions.push(CardAction::Edit { id: id.clone() });
            actions.push(CardAction::Remove { id: id.clone() });
        }
    }
    html.push_str("</div></div></div>");

    ProductCard { id, html, actions }
}
