//! The product record and its vendor identifier.
//!
//! The backend owns the product shape; this module decodes the fields the
//! client renders and keeps every other field so a product can be sent back
//! verbatim (for example as the video-generation payload).

use std::fmt;
use std::sync::OnceLock;

use chrono::NaiveDateTime;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};

/// Placeholder shown when a product has no image.
pub const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/300x300?text=No+Image";

/// Placeholder shown on the detail page when a product has no image.
pub const PLACEHOLDER_IMAGE_LARGE: &str = "https://via.placeholder.com/500x500?text=No+Image";

/// Title shown when a product has none.
pub const UNTITLED: &str = "Untitled product";

/// A product record as returned by the backend.
///
/// All fields are optional; renderers apply the fallbacks documented on
/// each accessor.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Explicit vendor identifier, present on newer records only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asin: Option<String>,
    /// Product title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Main image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Current price label.
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    /// Price as listed by the store, preferred over `price` for display.
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub amazon_original_price: Option<String>,
    /// Crossed-out original price label.
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub original_price: Option<String>,
    /// Discount label such as `25%`.
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub discount: Option<String>,
    /// Star rating, `0` when unknown.
    #[serde(default, deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    /// Number of reviews.
    #[serde(default, deserialize_with = "lenient::count", skip_serializing_if = "Option::is_none")]
    pub reviews_count: Option<u64>,
    /// Outbound purchase link carrying the referral tag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affiliate_url: Option<String>,
    /// Source product page URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// English description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Hebrew description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_hebrew: Option<String>,
    /// Operator-written English description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_description: Option<String>,
    /// Operator-written Hebrew description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_description_hebrew: Option<String>,
    /// Product video URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    /// Operator-uploaded video URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_video: Option<String>,
    /// Operator-uploaded image URLs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_images: Option<Vec<String>>,
    /// When the product was first saved.
    #[serde(default, deserialize_with = "lenient::timestamp", skip_serializing_if = "Option::is_none")]
    pub added_at: Option<NaiveDateTime>,
    /// When the saved product was last changed.
    #[serde(default, deserialize_with = "lenient::timestamp", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<NaiveDateTime>,
    /// Fields this client does not interpret.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Product {
    /// Returns the vendor identifier, or `None` if it cannot be derived.
    #[must_use]
    pub fn id(&self) -> Option<ProductId> {
        ProductId::from_product(self)
    }

    /// Returns the title, or a fixed fallback.
    #[must_use]
    pub fn display_title(&self) -> &str {
        non_empty(self.title.as_deref()).unwrap_or(UNTITLED)
    }

    /// Returns the image URL, or the placeholder image.
    #[must_use]
    pub fn display_image(&self) -> &str {
        non_empty(self.image_url.as_deref()).unwrap_or(PLACEHOLDER_IMAGE)
    }

    /// Returns the store-listed price, then the current price, then `$0`.
    #[must_use]
    pub fn display_price(&self) -> &str {
        non_empty(self.amazon_original_price.as_deref())
            .or_else(|| non_empty(self.price.as_deref()))
            .unwrap_or("$0")
    }

    /// Returns the affiliate URL, or `#`.
    #[must_use]
    pub fn display_affiliate_url(&self) -> &str {
        non_empty(self.affiliate_url.as_deref()).unwrap_or("#")
    }

    /// Returns the rating, treating a missing value as zero.
    #[must_use]
    pub fn display_rating(&self) -> f64 {
        self.rating.unwrap_or(0.0)
    }

    /// Returns the description for the detail page, preferring Hebrew.
    #[must_use]
    pub fn display_description(&self) -> Option<&str> {
        non_empty(self.description_hebrew.as_deref())
            .or_else(|| non_empty(self.custom_description_hebrew.as_deref()))
            .or_else(|| non_empty(self.description.as_deref()))
    }

    /// Returns the English description used to pre-fill the edit form.
    #[must_use]
    pub fn edit_description(&self) -> &str {
        non_empty(self.description.as_deref())
            .or_else(|| non_empty(self.custom_description.as_deref()))
            .unwrap_or_default()
    }

    /// Returns the Hebrew description used to pre-fill the edit form.
    #[must_use]
    pub fn edit_description_hebrew(&self) -> &str {
        non_empty(self.description_hebrew.as_deref())
            .or_else(|| non_empty(self.custom_description_hebrew.as_deref()))
            .unwrap_or_default()
    }

    /// Returns the video URL, falling back to the uploaded one.
    #[must_use]
    pub fn display_video(&self) -> Option<&str> {
        non_empty(self.video_url.as_deref()).or_else(|| non_empty(self.custom_video.as_deref()))
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// A vendor product identifier (ASIN): ten uppercase letters or digits.
///
/// # Example
///
/// ```rust
/// use showcase_client::ProductId;
///
/// let id = ProductId::from_url("https://www.amazon.com/dp/B08N5WRWNW?tag=x-20").unwrap();
/// assert_eq!(id.as_ref(), "B08N5WRWNW");
/// assert!(ProductId::from_url("https://example.com/foo").is_none());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

fn identifier_patterns() -> &'static [Regex; 3] {
    static PATTERNS: OnceLock<[Regex; 3]> = OnceLock::new();
    // Literal patterns; a failure here is caught by the unit tests
    PATTERNS.get_or_init(|| {
        [
            Regex::new(r"/dp/([A-Z0-9]{10})").expect("dp regex is valid"),
            Regex::new(r"/gp/product/([A-Z0-9]{10})").expect("gp regex is valid"),
            Regex::new(r"[?&]product=([A-Z0-9]{10})").expect("product query regex is valid"),
        ]
    })
}

impl ProductId {
    /// Wraps an identifier that is already known, rejecting empty strings.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Option<Self> {
        let id = id.into();
        let id = id.trim();
        if id.is_empty() {
            None
        } else {
            Some(Self(id.to_string()))
        }
    }

    /// Extracts the identifier from a URL, trying `/dp/`, `/gp/product/`
    /// and the `product=` query parameter in that order.
    #[must_use]
    pub fn from_url(url: &str) -> Option<Self> {
        identifier_patterns()
            .iter()
            .find_map(|re| re.captures(url))
            .and_then(|caps| caps.get(1))
            .map(|m| Self(m.as_str().to_string()))
    }

    /// Derives the identifier of a product.
    ///
    /// An explicit `asin` field wins; otherwise the affiliate URL is scanned,
    /// then the source URL.
    #[must_use]
    pub fn from_product(product: &Product) -> Option<Self> {
        if let Some(id) = product.asin.as_deref().and_then(Self::new) {
            return Some(id);
        }
        [product.affiliate_url.as_deref(), product.url.as_deref()]
            .into_iter()
            .flatten()
            .find_map(Self::from_url)
    }
}

/// Extracts an identifier from a URL, returning an empty string when no
/// pattern matches.
///
/// ```rust
/// use showcase_client::model::extract_identifier;
///
/// assert_eq!(extract_identifier("https://amazon.com/gp/product/B08N5WRWNW"), "B08N5WRWNW");
/// assert_eq!(extract_identifier("https://example.com/foo"), "");
/// ```
#[must_use]
pub fn extract_identifier(url: &str) -> String {
    ProductId::from_url(url).map(|id| id.0).unwrap_or_default()
}

impl AsRef<str> for ProductId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Deserializers that accept the loosely typed values the scraper emits.
mod lenient {
    use super::{Deserialize, Deserializer, NaiveDateTime};
    use serde_json::Value;

    /// Strings stay strings, numbers become their decimal form, anything else is `None`.
    pub fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<Value>::deserialize(deserializer)? {
            Some(Value::String(s)) => Some(s),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        })
    }

    pub fn number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<Value>::deserialize(deserializer)? {
            Some(Value::Number(n)) => n.as_f64(),
            Some(Value::String(s)) => s.trim().parse().ok(),
            _ => None,
        })
    }

    /// Accepts `1234`, `"1,234"` and `"1234"`.
    pub fn count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<Value>::deserialize(deserializer)? {
            Some(Value::Number(n)) => n
                .as_u64()
                .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64)),
            Some(Value::String(s)) => s.trim().replace(',', "").parse().ok(),
            _ => None,
        })
    }

    /// Accepts ISO-8601 local timestamps with or without fractional seconds
    /// or an offset; anything unparseable becomes `None`.
    pub fn timestamp<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let Some(Value::String(s)) = Option::<Value>::deserialize(deserializer)? else {
            return Ok(None);
        };
        Ok(s.parse::<NaiveDateTime>().ok().or_else(|| {
            chrono::DateTime::parse_from_rfc3339(&s)
                .ok()
                .map(|dt| dt.naive_utc())
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_identifier_extraction_patterns() {
        assert_eq!(
            extract_identifier("https://www.amazon.com/Echo-Dot/dp/B08N5WRWNW?tag=abc-20"),
            "B08N5WRWNW"
        );
        assert_eq!(
            extract_identifier("https://www.amazon.com/gp/product/B08N5WRWNW"),
            "B08N5WRWNW"
        );
        assert_eq!(
            extract_identifier("https://www.amazon.com/vdp/abc?ref=x&product=B08N5WRWNW"),
            "B08N5WRWNW"
        );
        assert_eq!(extract_identifier("https://example.com/foo"), "");
        // Lowercase or short codes are not identifiers
        assert_eq!(extract_identifier("https://amazon.com/dp/b08n5wrwnw"), "");
        assert_eq!(extract_identifier("https://amazon.com/dp/B08N5"), "");
    }

    #[test]
    fn test_explicit_asin_wins_over_url() {
        let product = Product {
            asin: Some("B000000001".to_string()),
            affiliate_url: Some("https://amazon.com/dp/B08N5WRWNW".to_string()),
            ..Product::default()
        };
        assert_eq!(product.id().unwrap().as_ref(), "B000000001");
    }

    #[test]
    fn test_source_url_is_fallback() {
        let product = Product {
            affiliate_url: Some("https://amzn.to/xyz".to_string()),
            url: Some("https://amazon.com/gp/product/B08N5WRWNW".to_string()),
            ..Product::default()
        };
        assert_eq!(product.id().unwrap().as_ref(), "B08N5WRWNW");

        let blank = Product {
            asin: Some("   ".to_string()),
            ..Product::default()
        };
        assert!(blank.id().is_none());
    }

    #[test]
    fn test_display_fallbacks() {
        let product = Product::default();
        assert_eq!(product.display_title(), UNTITLED);
        assert_eq!(product.display_image(), PLACEHOLDER_IMAGE);
        assert_eq!(product.display_price(), "$0");
        assert_eq!(product.display_affiliate_url(), "#");
        assert!(product.display_description().is_none());

        let product = Product {
            price: Some("$10".to_string()),
            amazon_original_price: Some("$12".to_string()),
            description: Some("English".to_string()),
            custom_description_hebrew: Some("עברית".to_string()),
            ..Product::default()
        };
        assert_eq!(product.display_price(), "$12");
        assert_eq!(product.display_description(), Some("עברית"));
        assert_eq!(product.edit_description(), "English");
        assert_eq!(product.edit_description_hebrew(), "עברית");
    }

    #[test]
    fn test_lenient_decoding_and_unknown_fields() {
        let product: Product = serde_json::from_value(json!({
            "title": "Lamp",
            "price": 19.99,
            "rating": "4.5",
            "reviews_count": "1,234",
            "added_at": "2024-05-01T10:20:30.123456",
            "updated_at": "yesterday",
            "store": "amazon"
        }))
        .unwrap();

        assert_eq!(product.price.as_deref(), Some("19.99"));
        assert_eq!(product.rating, Some(4.5));
        assert_eq!(product.reviews_count, Some(1234));
        assert!(product.added_at.is_some());
        assert!(product.updated_at.is_none());
        assert_eq!(product.extra.get("store"), Some(&json!("amazon")));

        // Unknown fields survive a round trip to the backend
        let value = serde_json::to_value(&product).unwrap();
        assert_eq!(value["store"], "amazon");
        assert_eq!(value["title"], "Lamp");
    }
}
