//! The `{success, error?, message?}` response envelope.

use serde::Deserialize;

/// Fallback shown when a failed envelope carries no message.
pub const UNKNOWN_ERROR: &str = "Unknown error";

/// The status fields shared by every backend response.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct Envelope {
    /// Whether the operation succeeded.
    #[serde(default)]
    pub success: bool,
    /// Failure description, if any.
    #[serde(default)]
    pub error: Option<String>,
    /// Informational or failure message.
    #[serde(default)]
    pub message: Option<String>,
}

impl Envelope {
    /// Reads the envelope fields from a response body, ignoring everything else.
    #[must_use]
    pub fn from_body(body: &serde_json::Value) -> Self {
        Self::deserialize(body).unwrap_or_default()
    }

    /// Returns the message to show for a failed operation.
    ///
    /// A non-empty `error` wins over `message`; an envelope with neither
    /// yields [`UNKNOWN_ERROR`].
    #[must_use]
    pub fn failure_message(&self) -> String {
        non_empty(self.error.as_deref())
            .or_else(|| non_empty(self.message.as_deref()))
            .unwrap_or(UNKNOWN_ERROR)
            .to_string()
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
