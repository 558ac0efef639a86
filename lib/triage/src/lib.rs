//! Status-driven HTTP response handling for Rust.
//!
//! Register one handler per status code, validate what they produce, and get
//! a single typed result back from every request.
//!
//! # Example
//!
//! ```ignore
//! use triage::prelude::*;
//!
//! #[derive(Debug, Deserialize)]
//! pub struct User {
//!     id: u64,
//!     name: String,
//! }
//!
//! #[derive(Debug, StatusOutcomes)]
//! pub enum GetUser {
//!     #[status(200)]
//!     Found(User),
//!     #[status(404)]
//!     Missing,
//! }
//!
//! let triage = Triage::for_outcomes::<GetUser>()
//!     .handle_json(200, GetUser::Found)?
//!     .handle(404, |_| GetUser::Missing)?;
//!
//! let transport = HyperTransport::new();
//! let request = Request::get("https://api.example.com/users/42")?;
//! let user = triage.run(&transport, request).await?.into_value();
//! ```
//!
//! See the [tutorial][_tutorial] for a complete guide.

pub mod _tutorial;
mod config;
mod connector;
pub mod middleware;
pub mod prelude;
mod transport;

// Re-export transport types
pub use config::{DEFAULT_USER_AGENT, TransportConfig, TransportConfigBuilder};
pub use transport::{BoxedService, HyperTransport, HyperTransportBuilder, ServiceFuture};

// Re-export tower for middleware composition
pub use tower;

// Re-export core types
pub use triage_core::{
    Body, BodyError, BodyStream, BoxError, ContentType, Error, Extract, Fallback, Handler,
    HandlerEntry, Payload, Pending, Registry, Request, RequestBuilder, Response, Result, Schema,
    StatusOutcomes, Transport, TransportError, Triage, TypedSchema, Validated, ValidationError,
    ValidationErrors, from_json, to_json, typed,
};

// Re-export http types for methods, status codes and headers
pub use triage_core::{Method, StatusCode, header};

// Re-export crates used in public signatures
pub use url;

// Re-export macros
pub use triage_macro::StatusOutcomes;
