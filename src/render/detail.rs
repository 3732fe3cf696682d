//! The product detail page.

use std::fmt::Write as _;

use crate::model::{Product, PLACEHOLDER_IMAGE_LARGE};
use crate::render::card::{CardAction, ProductCard};
use crate::render::{attr, price_row, rating_row, text};

/// Shown when a product has no description in any language.
pub const NO_DESCRIPTION: &str = "No description available";

/// Renders the detail page of a product.
///
/// The description prefers the Hebrew text, then the operator's Hebrew
/// text, then the English one. A video section is appended when the product
/// has a `video_url`.
#[must_use]
pub fn render_detail(product: &Product) -> ProductCard {
    let id = product.id();
    let id_attr = id.as_ref().map_or_else(String::new, |id| attr(id.as_ref()));
    let title = product.display_title();
    let image = product
        .image_url
        .as_deref()
        .filter(|url| !url.is_empty())
        .unwrap_or(PLACEHOLDER_IMAGE_LARGE);
    let mut html = String::new();

    let _ = write!(
        html,
        r#"<div class="detail-grid" data-product-id="{id_attr}"><div><img src="{}" alt="{}" class="detail-image"></div><div class="detail-info"><h1>{}</h1>"#,
        attr(image),
        attr(title),
        text(title)
    );
    price_row(&mut html, product, "detail-price");
    rating_row(&mut html, product);
    let _ = write!(
        html,
        r#"<div class="detail-description">{}</div>"#,
        text(product.display_description().unwrap_or(NO_DESCRIPTION))
    );

    let buy_url = product.display_affiliate_url();
    let _ = write!(
        html,
        r#"<div class="detail-actions"><a href="{}" target="_blank" rel="noopener" class="btn btn-success" data-action="buy">Buy now</a><button type="button" class="btn btn-secondary" data-action="generate-video" data-product-id="{id_attr}">Create marketing video</button></div></div></div>"#,
        attr(buy_url)
    );

    if let Some(video) = product.video_url.as_deref().filter(|v| !v.is_empty()) {
        let _ = write!(
            html,
            r#"<div class="video-section"><h2>Product video</h2><div class="video-container"><video controls><source src="{}" type="video/mp4">Your browser does not support video playback.</video></div></div>"#,
            attr(video)
        );
    }

    let actions = vec![
        CardAction::Buy {
            url: buy_url.to_string(),
        },
        CardAction::GenerateVideo {
            product: Box::new(product.clone()),
        },
    ];
    ProductCard { id, html, actions }
}

/// Renders a plain message in place of the detail page.
#[must_use]
pub fn render_message(message: &str) -> String {
    format!(r#"<p class="detail-message">{}</p>"#, text(message))
}
