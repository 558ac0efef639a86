//! Body encoding and decoding.
//!
//! - [`ContentType`] - media types understood by the extractor
//! - [`Payload`] - a decoded response body, as seen by handlers
//! - [`Extract`] - how a response body becomes a [`Payload`]

use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{BodyError, Response, TransportError};

/// Media types understood by triage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentType {
    /// JSON content type (`application/json`, or any `+json` suffix).
    Json,
    /// Plain text content type (`text/plain`).
    PlainText,
    /// Binary content type (`application/octet-stream`).
    OctetStream,
}

impl ContentType {
    /// Get the canonical MIME type string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::PlainText => "text/plain",
            Self::OctetStream => "application/octet-stream",
        }
    }

    /// Classify a `Content-Type` header value.
    ///
    /// Parameters such as `charset` are ignored. Anything that is neither JSON
    /// nor `text/*` is reported as [`ContentType::OctetStream`].
    #[must_use]
    pub fn parse(header: &str) -> Self {
        let essence = header
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        if essence == "application/json" || essence.ends_with("+json") {
            Self::Json
        } else if essence.starts_with("text/") {
            Self::PlainText
        } else {
            Self::OctetStream
        }
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// Payload
// ============================================================================

/// A fully buffered, decoded response body.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Body parsed as JSON.
    Json(Value),
    /// Body read as text.
    Text(String),
}

impl Payload {
    /// The text, if this payload was read as text.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text.as_str()),
            Self::Json(_) => None,
        }
    }

    /// The JSON value, if this payload was parsed as JSON.
    #[must_use]
    pub const fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::Text(_) => None,
        }
    }

    /// Text view of the payload; JSON is re-serialized.
    #[must_use]
    pub fn into_text(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::Json(value) => value.to_string(),
        }
    }

    /// JSON view of the payload; text becomes a JSON string.
    #[must_use]
    pub fn into_json(self) -> Value {
        match self {
            Self::Json(value) => value,
            Self::Text(text) => Value::String(text),
        }
    }

    /// Deserialize the payload into a typed value.
    ///
    /// Text payloads are parsed as JSON first.
    ///
    /// # Errors
    ///
    /// Returns a path-aware [`BodyError::Json`] if the payload does not match `T`.
    pub fn deserialize<T: DeserializeOwned>(self) -> Result<T, BodyError> {
        match self {
            Self::Json(value) => serde_path_to_error::deserialize(value)
                .map_err(|e| BodyError::json(e.path().to_string(), e.inner().to_string())),
            Self::Text(text) => from_json(text.as_bytes()),
        }
    }
}

impl From<Value> for Payload {
    fn from(value: Value) -> Self {
        Self::Json(value)
    }
}

impl From<String> for Payload {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for Payload {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

// ============================================================================
// Extraction strategy
// ============================================================================

/// How a response body is turned into a [`Payload`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Extract {
    /// JSON when the response declares a JSON content type, text otherwise.
    #[default]
    ContentType,
    /// Always parse as JSON.
    Json,
    /// Always read as text.
    Text,
}

impl Extract {
    /// Read the whole body of `response` and decode it.
    ///
    /// # Errors
    ///
    /// Returns an error if the body cannot be read, is not UTF-8 (text), or is
    /// malformed JSON.
    pub async fn extract(self, response: Response) -> Result<Payload, BodyError> {
        let json = match self {
            Self::ContentType => response.content_type() == Some(ContentType::Json),
            Self::Json => true,
            Self::Text => false,
        };

        if json {
            response.json::<Value>().await.map(Payload::Json)
        } else {
            response.text().await.map(Payload::Text)
        }
    }
}

// ============================================================================
// JSON helpers
// ============================================================================

/// Serialize a value to JSON bytes.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
///
/// # Example
///
/// ```
/// use triage_core::to_json;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct User { name: String }
///
/// let user = User { name: "Alice".to_string() };
/// let bytes = to_json(&user).expect("serialize");
/// assert_eq!(bytes.as_ref(), br#"{"name":"Alice"}"#);
/// ```
pub fn to_json<T: serde::Serialize>(value: &T) -> Result<Bytes, TransportError> {
    serde_json::to_vec(value)
        .map(Bytes::from)
        .map_err(Into::into)
}

/// Deserialize JSON bytes to a value with path-aware error messages.
///
/// # Errors
///
/// Returns an error if JSON deserialization fails, with the error message
/// including the path to the problematic field (e.g., "user.address.city").
pub fn from_json<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, BodyError> {
    let mut deserializer = serde_json::Deserializer::from_slice(bytes);
    serde_path_to_error::deserialize(&mut deserializer)
        .map_err(|e| BodyError::json(e.path().to_string(), e.inner().to_string()))
}
