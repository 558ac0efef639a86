//! Dispatch of one response through a [`Registry`].
//!
//! [`dispatch`] resolves the handler for the response status and runs the body
//! through it. [`Pending`] is the in-flight result of a full request/response
//! cycle, mappable before it resolves.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures_util::future::BoxFuture;
use futures_util::{FutureExt, TryFutureExt};
use tracing::{debug, warn};

use crate::{Error, Extract, Registry, Response, Result, Validated};

/// Run `response` through the handler registered for its status.
///
/// Exactly one of the fallback path and the handler path runs. On the fallback
/// path the body is dropped unread.
pub(crate) async fn dispatch<O: 'static>(
    registry: &Registry<O>,
    extract: Extract,
    response: Response,
) -> Result<Validated<O>> {
    let status = response.status();

    let Some(entry) = registry.resolve(status) else {
        let Some(fallback) = registry.fallback() else {
            warn!(status, "no handler set for status");
            return Err(Error::HandlerNotSet { status });
        };
        debug!(status, "no handler registered, using fallback");
        return Ok(Validated::valid(fallback()));
    };

    debug!(status, validated = entry.has_schema(), "handler resolved");
    let payload = extract.extract(response).await?;
    let validated = entry.apply(payload)?;

    if let Some(errors) = validated.errors() {
        warn!(status, %errors, "handler output failed validation");
    }

    Ok(validated)
}

// ============================================================================
// Pending
// ============================================================================

/// A dispatch in flight.
///
/// Resolves to the handled value, or to the first fatal error. [`Pending::map`]
/// composes onto the success branch only.
#[must_use = "a pending dispatch does nothing unless awaited"]
pub struct Pending<'a, O> {
    inner: BoxFuture<'a, Result<Validated<O>>>,
}

impl<'a, O: Send + 'a> Pending<'a, O> {
    /// Wrap a dispatch future.
    pub fn new<F>(future: F) -> Self
    where
        F: Future<Output = Result<Validated<O>>> + Send + 'a,
    {
        Self {
            inner: future.boxed(),
        }
    }

    /// Transform the value once the dispatch succeeds.
    ///
    /// Errors and validation diagnostics pass through untouched.
    pub fn map<P, F>(self, f: F) -> Pending<'a, P>
    where
        P: Send + 'a,
        F: FnOnce(O) -> P + Send + 'a,
    {
        Pending {
            inner: self
                .inner
                .map_ok(move |validated| validated.map(f))
                .boxed(),
        }
    }
}

impl<O> Future for Pending<'_, O> {
    type Output = Result<Validated<O>>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        self.inner.poll_unpin(cx)
    }
}

impl<O> fmt::Debug for Pending<'_, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pending").finish_non_exhaustive()
    }
}
