//! Tower middleware layers for the triage HTTP transport.
//!
//! Layers wrap the transport's type-erased service and see every
//! [`Request`](crate::Request) before it goes on the wire, and every
//! [`Response`](crate::Response) before the dispatcher resolves a handler.
//!
//! # Available Layers
//!
//! - [`LoggingLayer`] - Logs requests/responses using `tracing`
//!
//! Any `tower` layer whose service speaks `Request`/`Response`/`TransportError`
//! composes through [`HyperTransportBuilder::layer`](crate::HyperTransportBuilder::layer).
//!
//! # Example
//!
//! ```ignore
//! use triage::HyperTransport;
//! use triage::middleware::LoggingLayer;
//!
//! // Helper method
//! let transport = HyperTransport::builder().with_logging().build();
//!
//! // Raw layer access
//! let transport = HyperTransport::builder()
//!     .layer(LoggingLayer::debug())
//!     .build();
//! ```

mod logging;

pub use logging::{LogLevel, Logging, LoggingLayer};

// Re-export tower types for convenience
pub use tower::{Layer, ServiceBuilder};
