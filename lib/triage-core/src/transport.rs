//! Transport trait.
//!
//! A [`Transport`] turns a [`Request`] into a [`Response`]. The dispatcher never
//! looks behind it: retries, pooling, TLS and timeouts are the transport's
//! business. Implement it directly to plug in another HTTP stack or to stub the
//! network in tests.

use std::future::Future;
use std::sync::Arc;

use crate::{Request, Response, TransportError};

/// Asynchronous request executor.
///
/// # Example
///
/// ```
/// use std::collections::HashMap;
/// use triage_core::{Request, Response, Transport, TransportError};
///
/// struct Teapot;
///
/// impl Transport for Teapot {
///     async fn send(&self, _request: Request) -> Result<Response, TransportError> {
///         Ok(Response::new(418, HashMap::new(), "I'm a teapot"))
///     }
/// }
/// ```
pub trait Transport: Send + Sync {
    /// Execute a request and return the response.
    ///
    /// The response body may still be unread when this resolves.
    ///
    /// # Errors
    ///
    /// Returns an error if no response could be obtained:
    /// - Network errors
    /// - TLS errors
    /// - Timeouts
    /// - Invalid request
    fn send(&self, request: Request)
    -> impl Future<Output = Result<Response, TransportError>> + Send;
}

impl<T: Transport> Transport for &T {
    fn send(
        &self,
        request: Request,
    ) -> impl Future<Output = Result<Response, TransportError>> + Send {
        (**self).send(request)
    }
}

impl<T: Transport> Transport for Arc<T> {
    fn send(
        &self,
        request: Request,
    ) -> impl Future<Output = Result<Response, TransportError>> + Send {
        (**self).send(request)
    }
}
