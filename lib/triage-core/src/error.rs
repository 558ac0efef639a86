//! Error types for triage.
//!
//! Errors are layered the same way a dispatch is:
//!
//! - [`TransportError`] - the transport could not produce a response
//! - [`BodyError`] - a response arrived but its body could not be read or decoded
//! - [`Error`] - everything a dispatch (or the builder configuring it) can fail with
//!
//! Validation mismatches are deliberately absent: they are diagnostics carried by
//! [`crate::Validated`], never errors.

use derive_more::{Display, Error, From};

/// Boxed error used to carry failures raised by caller-supplied handlers.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

// ============================================================================
// Transport Error
// ============================================================================

/// Failure of the transport itself: no response was produced.
#[derive(Debug, Display, Error, From)]
pub enum TransportError {
    /// Network/connection errors.
    #[display("connection error: {_0}")]
    #[from(skip)]
    Connection(#[error(not(source))] String),

    /// TLS/SSL errors.
    #[display("TLS error: {_0}")]
    #[from(skip)]
    Tls(#[error(not(source))] String),

    /// Request timeout.
    #[display("request timeout")]
    #[from(skip)]
    Timeout,

    /// The request descriptor could not be turned into a wire request.
    #[display("invalid request: {_0}")]
    #[from(skip)]
    InvalidRequest(#[error(not(source))] String),

    /// URL parsing error.
    #[display("invalid URL: {_0}")]
    #[from]
    InvalidUrl(url::ParseError),

    /// Request body serialization error.
    #[display("request serialization error: {_0}")]
    #[from]
    Serialization(serde_json::Error),
}

impl TransportError {
    /// Create a connection error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }

    /// Create a TLS error.
    #[must_use]
    pub fn tls(message: impl Into<String>) -> Self {
        Self::Tls(message.into())
    }

    /// Create an invalid request error.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// Returns `true` if this is a timeout error.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout)
    }

    /// Returns `true` if this is a connection error.
    #[must_use]
    pub const fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_))
    }
}

// ============================================================================
// Body Error
// ============================================================================

/// Failure to read or decode a response body.
#[derive(Debug, Display, Error, From)]
pub enum BodyError {
    /// The body stream failed while being read.
    #[display("failed to read body: {_0}")]
    #[from]
    Read(TransportError),

    /// The body is not valid UTF-8.
    #[display("body is not valid UTF-8: {_0}")]
    #[from]
    Utf8(std::string::FromUtf8Error),

    /// JSON deserialization error with path context.
    #[display("JSON deserialization error at '{path}': {message}")]
    #[from(skip)]
    Json {
        /// JSON path to the error (e.g., "user.address.city").
        path: String,
        /// Error message.
        message: String,
    },
}

impl BodyError {
    /// Create a JSON deserialization error with path context.
    #[must_use]
    pub fn json(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Json {
            path: path.into(),
            message: message.into(),
        }
    }
}

// ============================================================================
// Error Type
// ============================================================================

/// Main error type for triage operations.
///
/// The first four variants abort a dispatch; the remaining ones report a
/// misconfigured [`crate::Triage`] and are raised while registering handlers
/// or right before the first transport call.
#[derive(Debug, Display, From)]
pub enum Error {
    /// The transport failed; surfaced verbatim.
    #[display("transport failure: {_0}")]
    #[from]
    Transport(TransportError),

    /// The response body could not be read or decoded.
    #[display("body deserialization failure: {_0}")]
    #[from]
    BodyDeserialization(BodyError),

    /// A registered handler failed while transforming the payload.
    #[display("handler for status {status} failed: {cause}")]
    #[from(skip)]
    HandlerExecution {
        /// Status code the handler was registered for.
        status: u16,
        /// The failure raised by the handler.
        cause: BoxError,
    },

    /// No handler and no fallback for the observed status code.
    #[display("no handler set for status {status}")]
    #[from(skip)]
    HandlerNotSet {
        /// The unresolved status code.
        status: u16,
    },

    /// A handler is already registered for this status code.
    #[display("a handler is already registered for status {status}")]
    #[from(skip)]
    DuplicateHandler {
        /// The status code registered twice.
        status: u16,
    },

    /// A handler was registered for a status code outside the declared outcomes.
    #[display("status {status} is not a declared outcome")]
    #[from(skip)]
    UndeclaredStatus {
        /// The undeclared status code.
        status: u16,
    },

    /// Declared status codes have neither a handler nor a fallback.
    #[display("declared statuses without a handler: {missing:?}")]
    #[from(skip)]
    NonExhaustive {
        /// The uncovered status codes, in ascending order.
        missing: Vec<u16>,
    },
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Transport(err) => Some(err),
            Self::BodyDeserialization(err) => Some(err),
            Self::HandlerExecution { cause, .. } => Some(&**cause),
            _ => None,
        }
    }
}

/// Result type alias using [`crate::Error`].
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a handler execution error.
    #[must_use]
    pub fn handler(status: u16, cause: impl Into<BoxError>) -> Self {
        Self::HandlerExecution {
            status,
            cause: cause.into(),
        }
    }

    /// Returns the status code this error is about, if any.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::HandlerExecution { status, .. }
            | Self::HandlerNotSet { status }
            | Self::DuplicateHandler { status }
            | Self::UndeclaredStatus { status } => Some(*status),
            _ => None,
        }
    }

    /// Returns `true` if the transport failed.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Returns `true` if the response body could not be decoded.
    #[must_use]
    pub const fn is_body_deserialization(&self) -> bool {
        matches!(self, Self::BodyDeserialization(_))
    }

    /// Returns `true` if a registered handler failed.
    #[must_use]
    pub const fn is_handler_execution(&self) -> bool {
        matches!(self, Self::HandlerExecution { .. })
    }

    /// Returns `true` if no handler matched the observed status code.
    #[must_use]
    pub const fn is_handler_not_set(&self) -> bool {
        matches!(self, Self::HandlerNotSet { .. })
    }

    /// Returns `true` if this error reports a misconfigured builder.
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::DuplicateHandler { .. } | Self::UndeclaredStatus { .. } | Self::NonExhaustive { .. }
        )
    }
}
