//! HTTP response types for the showcase client.
//!
//! This module provides [`HttpResponse`] for JSON envelopes and [`Download`]
//! for raw file bodies such as the saved-product export.

use std::collections::HashMap;

/// A parsed JSON response from the backend.
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers, lowercased, with all values for repeated headers.
    pub headers: HashMap<String, Vec<String>>,
    /// The decoded JSON body (`{}` for an empty body).
    pub body: serde_json::Value,
}

impl HttpResponse {
    /// Creates a new response.
    #[must_use]
    pub const fn new(
        code: u16,
        headers: HashMap<String, Vec<String>>,
        body: serde_json::Value,
    ) -> Self {
        Self {
            code,
            headers,
            body,
        }
    }

    /// Returns `true` for 2xx status codes.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }
}

/// A raw file body returned by a download endpoint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Download {
    /// The file contents.
    pub bytes: Vec<u8>,
    /// File name suggested by the `Content-Disposition` header.
    pub file_name: Option<String>,
    /// The `Content-Type` header, if present.
    pub content_type: Option<String>,
}

impl Download {
    /// Builds a download from its body and response headers.
    #[must_use]
    pub fn new(bytes: Vec<u8>, headers: &HashMap<String, Vec<String>>) -> Self {
        Self {
            bytes,
            file_name: first_header(headers, "content-disposition")
                .and_then(parse_content_disposition),
            content_type: first_header(headers, "content-type").map(String::from),
        }
    }
}

fn first_header<'a>(headers: &'a HashMap<String, Vec<String>>, name: &str) -> Option<&'a str> {
    headers
        .get(&name.to_lowercase())
        .and_then(|values| values.first())
        .map(String::as_str)
}

/// Extracts the file name from a `Content-Disposition` header value.
///
/// Handles both `filename="a.json"` and the RFC 5987 `filename*=UTF-8''a.json`
/// form, preferring the latter when both are present.
///
/// ```rust
/// use showcase_client::clients::parse_content_disposition;
///
/// assert_eq!(
///     parse_content_disposition(r#"attachment; filename="products_export.json""#),
///     Some("products_export.json".to_string())
/// );
/// assert_eq!(parse_content_disposition("inline"), None);
/// ```
#[must_use]
pub fn parse_content_disposition(header_value: &str) -> Option<String> {
    let mut plain = None;
    for part in header_value.split(';') {
        let part = part.trim();
        if let Some(encoded) = part.strip_prefix("filename*=") {
            let value = encoded
                .split_once("''")
                .map_or(encoded, |(_, value)| value)
                .trim_matches('"');
            if let Ok(decoded) = urlencoding::decode(value) {
                return Some(decoded.into_owned());
            }
        } else if let Some(value) = part.strip_prefix("filename=") {
            plain = Some(value.trim_matches('"').to_string());
        }
    }
    plain.filter(|name| !name.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(pairs: &[(&str, &str)]) -> HashMap<String, Vec<String>> {
        let mut map: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in pairs {
            map.entry((*name).to_string())
                .or_default()
                .push((*value).to_string());
        }
        map
    }

    #[test]
    fn test_is_ok_covers_2xx_range() {
        assert!(HttpResponse::new(200, HashMap::new(), serde_json::json!({})).is_ok());
        assert!(HttpResponse::new(204, HashMap::new(), serde_json::json!({})).is_ok());
        assert!(!HttpResponse::new(404, HashMap::new(), serde_json::json!({})).is_ok());
        assert!(!HttpResponse::new(500, HashMap::new(), serde_json::json!({})).is_ok());
    }

    #[test]
    fn test_content_disposition_variants() {
        assert_eq!(
            parse_content_disposition("attachment; filename=products_export.json"),
            Some("products_export.json".to_string())
        );
        assert_eq!(
            parse_content_disposition(
                r#"attachment; filename="fallback.json"; filename*=UTF-8''export%20v2.json"#
            ),
            Some("export v2.json".to_string())
        );
        assert_eq!(parse_content_disposition(r#"attachment; filename="""#), None);
    }

    #[test]
    fn test_download_reads_headers() {
        let download = Download::new(
            b"{}".to_vec(),
            &headers(&[
                ("content-disposition", r#"attachment; filename="x.json""#),
                ("content-type", "application/json"),
            ]),
        );
        assert_eq!(download.file_name.as_deref(), Some("x.json"));
        assert_eq!(download.content_type.as_deref(), Some("application/json"));
    }
}
