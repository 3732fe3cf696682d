//! HTML fragment rendering.
//!
//! Every renderer is a pure function of its input: the same products always
//! produce byte-identical markup. Interactive elements carry `data-action`
//! and `data-product-id` attributes, and the matching [`CardAction`]s are
//! returned alongside the markup so the embedding UI can bind them without
//! evaluating inline handler code.
//!
//! All interpolated text is HTML-escaped.

mod card;
mod detail;

pub use card::{
    render_card, render_grid, render_saved_card, render_saved_grid, render_showcase_grid,
    CardAction, ProductCard, NO_RESULTS, NO_SAVED_PRODUCTS,
};
pub use detail::{render_detail, render_message, NO_DESCRIPTION};

use std::fmt::Write as _;

use crate::model::Product;

/// Escapes text for use between tags.
pub(crate) fn text(value: &str) -> String {
    html_escape::encode_text(value).into_owned()
}

/// Escapes text for use inside a double-quoted attribute.
pub(crate) fn attr(value: &str) -> String {
    html_escape::encode_quoted_attribute(value).into_owned()
}

/// Formats a count with comma thousands separators.
///
/// ```rust
/// use showcase_client::render::format_count;
///
/// assert_eq!(format_count(1234567), "1,234,567");
/// assert_eq!(format_count(999), "999");
/// ```
#[must_use]
pub fn format_count(count: u64) -> String {
    let digits = count.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Renders the price row shared by cards and the detail page.
pub(crate) fn price_row(out: &mut String, product: &Product, class: &str) {
    let _ = write!(
        out,
        r#"<div class="{class}"><span class="price-current">{}</span>"#,
        text(product.display_price())
    );
    if let Some(original) = product.original_price.as_deref().filter(|p| !p.is_empty()) {
        let _ = write!(out, r#"<span class="price-original">{}</span>"#, text(original));
    }
    if let Some(discount) = product.discount.as_deref().filter(|d| !d.is_empty()) {
        let _ = write!(
            out,
            r#"<span class="discount-badge">{} off</span>"#,
            text(discount)
        );
    }
    out.push_str("</div>");
}

/// Renders the rating row, which is omitted unless the rating is positive.
pub(crate) fn rating_row(out: &mut String, product: &Product) {
    let rating = product.display_rating();
    if rating > 0.0 {
        let _ = write!(
            out,
            r#"<div class="product-rating"><span class="rating-stars">&#9733;</span><span>{} ({} reviews)</span></div>"#,
            rating,
            format_count(product.reviews_count.unwrap_or(0))
        );
    }
}
