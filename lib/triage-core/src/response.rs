//! HTTP response as produced by a [`crate::Transport`].
//!
//! [`Response`] exposes the status code and headers up front; the [`Body`] is
//! only materialized when one of the consuming accessors ([`Response::bytes`],
//! [`Response::text`], [`Response::json`]) is awaited. A body can therefore be
//! read at most once, and a response dropped unread never pulls its body.
//!
//! # Example
//!
//! ```
//! # async fn demo() -> Result<(), triage_core::BodyError> {
//! use std::collections::HashMap;
//! use triage_core::Response;
//!
//! let response = Response::new(200, HashMap::new(), r#"{"id":1}"#);
//! let value: serde_json::Value = response.json().await?;
//! # Ok(())
//! # }
//! ```

use std::collections::HashMap;
use std::pin::Pin;

use bytes::Bytes;
use futures_core::Stream;
use futures_util::StreamExt;

use crate::{BodyError, ContentType, TransportError};

/// A streamed body: chunks of bytes arriving over time.
pub type BodyStream = Pin<Box<dyn Stream<Item = Result<Bytes, TransportError>> + Send>>;

// ============================================================================
// Body
// ============================================================================

/// Response body, either already buffered or pulled lazily from a stream.
pub struct Body {
    inner: BodyInner,
}

enum BodyInner {
    Full(Bytes),
    Streaming(BodyStream),
}

impl Body {
    /// An empty body.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            inner: BodyInner::Full(Bytes::new()),
        }
    }

    /// A body read lazily from a stream of chunks.
    pub fn from_stream<S>(stream: S) -> Self
    where
        S: Stream<Item = Result<Bytes, TransportError>> + Send + 'static,
    {
        Self {
            inner: BodyInner::Streaming(Box::pin(stream)),
        }
    }

    /// Buffer the entire body.
    ///
    /// # Errors
    ///
    /// Returns an error if reading any chunk fails.
    pub async fn collect(self) -> Result<Bytes, BodyError> {
        match self.inner {
            BodyInner::Full(bytes) => Ok(bytes),
            BodyInner::Streaming(mut stream) => {
                let mut collected = Vec::new();
                while let Some(chunk) = stream.next().await {
                    collected.extend_from_slice(&chunk?);
                }
                Ok(Bytes::from(collected))
            }
        }
    }
}

impl std::fmt::Debug for Body {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.inner {
            BodyInner::Full(bytes) => f.debug_tuple("Body").field(bytes).finish(),
            BodyInner::Streaming(_) => f.write_str("Body(<stream>)"),
        }
    }
}

impl Default for Body {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<Bytes> for Body {
    fn from(bytes: Bytes) -> Self {
        Self {
            inner: BodyInner::Full(bytes),
        }
    }
}

impl From<Vec<u8>> for Body {
    fn from(bytes: Vec<u8>) -> Self {
        Bytes::from(bytes).into()
    }
}

impl From<String> for Body {
    fn from(text: String) -> Self {
        Bytes::from(text).into()
    }
}

impl From<&'static str> for Body {
    fn from(text: &'static str) -> Self {
        Bytes::from_static(text.as_bytes()).into()
    }
}

// ============================================================================
// Response
// ============================================================================

/// HTTP response with status, headers, and a body readable once.
#[derive(Debug)]
pub struct Response {
    status: u16,
    headers: HashMap<String, String>,
    body: Body,
}

impl Response {
    /// Creates a new response.
    ///
    /// Header names are stored lowercased so lookups are case-insensitive.
    #[must_use]
    pub fn new(status: u16, headers: HashMap<String, String>, body: impl Into<Body>) -> Self {
        let headers = headers
            .into_iter()
            .map(|(name, value)| (name.to_ascii_lowercase(), value))
            .collect();

        Self {
            status,
            headers,
            body: body.into(),
        }
    }

    /// HTTP status code.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Response headers, with lowercased names.
    #[must_use]
    pub const fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Single header value by name (case-insensitive).
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// The declared content type, if any.
    #[must_use]
    pub fn content_type(&self) -> Option<ContentType> {
        self.header("content-type").map(ContentType::parse)
    }

    /// Status is 2xx.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Status is 4xx.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        self.status >= 400 && self.status < 500
    }

    /// Status is 5xx.
    #[must_use]
    pub const fn is_server_error(&self) -> bool {
        self.status >= 500 && self.status < 600
    }

    /// Consume into (status, headers, body).
    #[must_use]
    pub fn into_parts(self) -> (u16, HashMap<String, String>, Body) {
        (self.status, self.headers, self.body)
    }

    /// Read the whole body.
    ///
    /// # Errors
    ///
    /// Returns an error if the body stream fails.
    pub async fn bytes(self) -> Result<Bytes, BodyError> {
        self.body.collect().await
    }

    /// Read the whole body as UTF-8 text.
    ///
    /// # Errors
    ///
    /// Returns an error if the body stream fails or is not valid UTF-8.
    pub async fn text(self) -> Result<String, BodyError> {
        let bytes = self.bytes().await?;
        Ok(String::from_utf8(bytes.to_vec())?)
    }

    /// Read the whole body and deserialize it as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the body stream fails or deserialization fails.
    pub async fn json<T: serde::de::DeserializeOwned>(self) -> Result<T, BodyError> {
        let bytes = self.bytes().await?;
        crate::from_json(&bytes)
    }
}

#[cfg(test)]
mod tests {
    use futures_util::stream;

    use super::*;

    #[test]
    fn response_basic() {
        let mut headers = HashMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());

        let response = Response::new(200, headers, r#"{"id":1}"#);

        assert_eq!(response.status(), 200);
        assert_eq!(response.header("content-type"), Some("application/json"));
        assert_eq!(response.header("CONTENT-TYPE"), Some("application/json"));
        assert_eq!(response.content_type(), Some(ContentType::Json));
        assert!(response.is_success());
        assert!(!response.is_client_error());
        assert!(!response.is_server_error());
    }

    #[test]
    fn response_status_checks() {
        let response = Response::new(404, HashMap::new(), Body::empty());
        assert!(response.is_client_error());
        assert!(response.content_type().is_none());

        let response = Response::new(500, HashMap::new(), Body::empty());
        assert!(response.is_server_error());
    }

    #[tokio::test]
    async fn response_json() {
        #[derive(Debug, PartialEq, serde::Deserialize)]
        struct User {
            id: u64,
            name: String,
        }

        let response = Response::new(200, HashMap::new(), r#"{"id":1,"name":"test"}"#);
        let user: User = response.json().await.expect("deserialize");
        assert_eq!(
            user,
            User {
                id: 1,
                name: "test".to_string()
            }
        );
    }

    #[tokio::test]
    async fn response_text_rejects_invalid_utf8() {
        let response = Response::new(200, HashMap::new(), vec![0xff, 0xfe]);
        let err = response.text().await.expect_err("should fail");
        assert!(matches!(err, BodyError::Utf8(_)));
    }

    #[tokio::test]
    async fn streaming_body_is_collected() {
        let chunks = stream::iter(vec![
            Ok(Bytes::from_static(b"Hello, ")),
            Ok(Bytes::from_static(b"World!")),
        ]);
        let response = Response::new(200, HashMap::new(), Body::from_stream(chunks));

        assert_eq!(response.text().await.expect("text"), "Hello, World!");
    }

    #[tokio::test]
    async fn streaming_body_error_is_a_read_error() {
        let chunks = stream::iter(vec![
            Ok(Bytes::from_static(b"partial")),
            Err(TransportError::connection("reset by peer")),
        ]);
        let response = Response::new(200, HashMap::new(), Body::from_stream(chunks));

        let err = response.bytes().await.expect_err("should fail");
        assert!(matches!(err, BodyError::Read(TransportError::Connection(_))));
    }
}
