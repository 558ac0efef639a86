//! Core types and dispatcher for triage.
//!
//! triage routes an HTTP response to the handler registered for its status
//! code:
//! - [`Triage`] - builder registering handlers, a fallback and output maps
//! - [`Handler`] and [`Registry`] - status-keyed transforms
//! - [`Schema`] and [`Validated`] - non-fatal validation of handler outputs
//! - [`Transport`] - the seam to the HTTP stack
//! - [`Request`] and [`Response`] - HTTP exchange types
//! - [`Error`] and [`Result`] - error handling
//! - [`StatusOutcomes`] - declared status sets, derived by `#[derive(StatusOutcomes)]`
//! - [`StatusCode`] - HTTP status codes (re-exported from `http` crate)
//! - [`header`] - HTTP header names (re-exported from `http` crate)

mod body;
mod builder;
mod dispatch;
mod error;
pub mod prelude;
mod registry;
mod request;
mod response;
mod transport;
mod validation;

pub use body::{ContentType, Extract, Payload, from_json, to_json};
pub use builder::Triage;
pub use dispatch::Pending;
pub use error::{BodyError, BoxError, Error, Result, TransportError};
pub use registry::{Fallback, Handler, HandlerEntry, Registry};
pub use request::{Request, RequestBuilder};
pub use response::{Body, BodyStream, Response};
pub use transport::Transport;
pub use validation::{
    Schema, TypedSchema, Validated, ValidationError, ValidationErrors, typed,
};

// Re-export http crate types for methods, status codes and headers
pub use http::{Method, StatusCode, header};

/// A closed set of outcomes, one per status code.
///
/// This is automatically implemented by the `#[derive(StatusOutcomes)]` macro.
/// Pass the type to [`Triage::for_outcomes`] to get handler coverage checked.
///
/// # Example
///
/// ```ignore
/// use triage::StatusOutcomes;
///
/// #[derive(StatusOutcomes)]
/// enum GetUser {
///     #[status(200)]
///     Found(User),
///     #[status(404)]
///     Missing,
/// }
/// ```
pub trait StatusOutcomes {
    /// Every declared status, in declaration order.
    const STATUSES: &'static [u16];

    /// The status this outcome corresponds to.
    fn status(&self) -> u16;
}
