//! Validated newtype wrappers and enums for configuration values.
//!
//! This module provides type-safe wrappers around string values that validate
//! their contents on construction. Invalid values are rejected with clear error messages.

use crate::error::ConfigError;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A validated base URL of the showcase backend.
///
/// The URL must carry a scheme and a host. A trailing slash is trimmed so
/// endpoint paths can be appended directly.
///
/// # Example
///
/// ```rust
/// use showcase_client::BaseUrl;
///
/// let url = BaseUrl::new("http://localhost:5000/").unwrap();
/// assert_eq!(url.as_ref(), "http://localhost:5000");
/// assert_eq!(url.scheme(), "http");
/// assert_eq!(url.host_name(), "localhost");
/// assert_eq!(url.origin(), "http://localhost:5000");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BaseUrl {
    url: String,
    scheme_end: usize,
    host_start: usize,
    host_end: usize,
    origin_end: usize,
}

impl BaseUrl {
    /// Creates a new validated base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] if the URL has no scheme or host.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let url = url.trim().trim_end_matches('/').to_string();
        let invalid = || ConfigError::InvalidBaseUrl { url: url.clone() };

        let scheme_end = url.find("://").ok_or_else(invalid)?;
        let scheme = &url[..scheme_end];
        if scheme.is_empty() || !scheme.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(invalid());
        }

        let host_start = scheme_end + 3;
        if host_start >= url.len() {
            return Err(invalid());
        }

        // Host ends at port, path, query, or end of string
        let remainder = &url[host_start..];
        let host_end = remainder
            .find([':', '/', '?', '#'])
            .map_or(url.len(), |i| host_start + i);
        if host_end == host_start {
            return Err(invalid());
        }

        // Origin keeps the port but stops at the path
        let origin_end = url[host_start..]
            .find(['/', '?', '#'])
            .map_or(url.len(), |i| host_start + i);

        Ok(Self {
            url,
            scheme_end,
            host_start,
            host_end,
            origin_end,
        })
    }

    /// Returns the URL scheme (e.g., "https").
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.url[..self.scheme_end]
    }

    /// Returns the host name portion of the URL.
    #[must_use]
    pub fn host_name(&self) -> &str {
        &self.url[self.host_start..self.host_end]
    }

    /// Returns `scheme://host[:port]` without any path prefix.
    #[must_use]
    pub fn origin(&self) -> &str {
        &self.url[..self.origin_end]
    }

    /// Joins an endpoint path (with or without a leading slash) onto the base URL.
    #[must_use]
    pub fn join(&self, path: &str) -> String {
        format!("{}/{}", self.url, path.trim_start_matches('/'))
    }

    /// Resolves a server-relative URL (such as an upload location) against the origin.
    ///
    /// Absolute URLs are returned unchanged.
    #[must_use]
    pub fn resolve(&self, location: &str) -> String {
        if location.contains("://") {
            location.to_string()
        } else {
            format!("{}/{}", self.origin(), location.trim_start_matches('/'))
        }
    }
}

impl AsRef<str> for BaseUrl {
    fn as_ref(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

/// The affiliate store a product URL belongs to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Store {
    /// Amazon, including `amzn.to` short links and regional domains.
    #[default]
    Amazon,
    /// AliExpress.
    AliExpress,
}

impl Store {
    /// Returns the wire value sent to the backend.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Amazon => "amazon",
            Self::AliExpress => "aliexpress",
        }
    }

    /// Returns the name shown to operators.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Amazon => "Amazon",
            Self::AliExpress => "AliExpress",
        }
    }

    /// Returns `true` if the URL is on this store's domain allow-list.
    ///
    /// This is a substring check only; it does not parse the URL.
    ///
    /// ```rust
    /// use showcase_client::Store;
    ///
    /// assert!(Store::Amazon.allows_url("https://amzn.to/abc"));
    /// assert!(Store::Amazon.allows_url("https://www.amazon.de/dp/B08N5WRWNW"));
    /// assert!(!Store::Amazon.allows_url("https://example.com/foo"));
    /// assert!(Store::AliExpress.allows_url("https://aliexpress.com/item/1.html"));
    /// ```
    #[must_use]
    pub fn allows_url(&self, url: &str) -> bool {
        match self {
            Self::Amazon => {
                url.contains("amazon.com") || url.contains("amzn.to") || url.contains("amazon.")
            }
            Self::AliExpress => url.contains("aliexpress.com"),
        }
    }
}

impl fmt::Display for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Store {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "amazon" => Ok(Self::Amazon),
            "aliexpress" => Ok(Self::AliExpress),
            other => Err(ConfigError::UnknownStore {
                store: other.to_string(),
            }),
        }
    }
}

impl Serialize for Store {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Store {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

/// Whether an added URL is a plain product link or an affiliate link.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LinkType {
    /// A plain product page link.
    #[default]
    Regular,
    /// A link already carrying a referral tag.
    Affiliate,
}

impl LinkType {
    /// Returns the input placeholder shown for this link type and store.
    #[must_use]
    pub const fn placeholder(&self, store: Store) -> &'static str {
        match (store, self) {
            (Store::AliExpress, Self::Affiliate) => {
                "Paste an AliExpress affiliate link (e.g. https://aliexpress.com/item/1234567890.html?aff_platform=...)"
            }
            (Store::AliExpress, Self::Regular) => {
                "Paste an AliExpress product link (e.g. https://aliexpress.com/item/1234567890.html)"
            }
            (Store::Amazon, Self::Affiliate) => {
                "Paste an Amazon affiliate link (e.g. https://amazon.com/dp/B08N5WRWNW?tag=your-tag-20)"
            }
            (Store::Amazon, Self::Regular) => {
                "Paste an Amazon product link (e.g. https://amazon.com/dp/B08N5WRWNW)"
            }
        }
    }
}

impl fmt::Display for LinkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Regular => f.write_str("regular"),
            Self::Affiliate => f.write_str("affiliate"),
        }
    }
}

impl FromStr for LinkType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "regular" => Ok(Self::Regular),
            "affiliate" => Ok(Self::Affiliate),
            other => Err(ConfigError::UnknownLinkType {
                link_type: other.to_string(),
            }),
        }
    }
}
