//! The [`Triage`] builder.
//!
//! Register one handler per status code, optionally a fallback, then run
//! requests through it:
//!
//! ```
//! # async fn demo(transport: impl triage_core::Transport) -> triage_core::Result<()> {
//! use triage_core::{Request, Triage};
//!
//! let triage = Triage::new()
//!     .handle(200, |payload| payload.into_text())?
//!     .fallback(|| "unexpected status".to_string());
//!
//! let request = Request::get("https://example.com/greeting")?;
//! let greeting = triage.run(&transport, request).await?.into_value();
//! # Ok(())
//! # }
//! ```
//!
//! # Sharing
//!
//! [`Triage::run`] borrows the builder immutably: registration is over once
//! requests start, and one builder can serve concurrent dispatches.

use std::collections::BTreeSet;
use std::fmt;

use serde::de::DeserializeOwned;
use tracing::{Instrument, debug, info_span};

use crate::dispatch::{Pending, dispatch};
use crate::{
    Error, Extract, Handler, Payload, Registry, Request, Response, Result, StatusOutcomes,
    Transport, Validated,
};

/// Status-driven response handling for one endpoint.
pub struct Triage<O> {
    registry: Registry<O>,
    declared: Option<BTreeSet<u16>>,
    extract: Extract,
}

impl<O: Send + 'static> Triage<O> {
    /// An empty builder: no handlers, no fallback, content-type driven extraction.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            registry: Registry::new(),
            declared: None,
            extract: Extract::ContentType,
        }
    }

    /// A builder whose declared statuses are those of the outcome type `D`.
    #[must_use]
    pub fn for_outcomes<D: StatusOutcomes>() -> Self {
        Self::new().declare(D::STATUSES.iter().copied())
    }

    /// Declare the statuses this endpoint may answer with.
    ///
    /// Once statuses are declared, handlers for other statuses are rejected and
    /// [`Triage::run`] checks coverage with [`Triage::ensure_exhaustive`] before
    /// sending anything.
    #[must_use]
    pub fn declare(mut self, statuses: impl IntoIterator<Item = u16>) -> Self {
        self.declared
            .get_or_insert_with(BTreeSet::new)
            .extend(statuses);
        self
    }

    /// Choose how response bodies are decoded.
    #[must_use]
    pub const fn extract(mut self, extract: Extract) -> Self {
        self.extract = extract;
        self
    }

    /// Register an infallible transform for `status`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateHandler`] if `status` already has a handler, or
    /// [`Error::UndeclaredStatus`] if statuses were declared and `status` is not
    /// one of them.
    pub fn handle<F>(self, status: u16, transform: F) -> Result<Self>
    where
        F: Fn(Payload) -> O + Send + Sync + 'static,
    {
        self.handle_with(status, Handler::new(transform))
    }

    /// Register a transform receiving the body deserialized as `T`.
    ///
    /// # Errors
    ///
    /// Same as [`Triage::handle`].
    pub fn handle_json<T, F>(self, status: u16, transform: F) -> Result<Self>
    where
        T: DeserializeOwned,
        F: Fn(T) -> O + Send + Sync + 'static,
    {
        self.handle_with(status, Handler::json(transform))
    }

    /// Register a fully configured [`Handler`] for `status`.
    ///
    /// # Errors
    ///
    /// Same as [`Triage::handle`].
    pub fn handle_with(mut self, status: u16, handler: Handler<O>) -> Result<Self> {
        if let Some(declared) = &self.declared
            && !declared.contains(&status)
        {
            return Err(Error::UndeclaredStatus { status });
        }
        self.registry.register(status, handler)?;
        Ok(self)
    }

    /// Handle every status without a dedicated handler with `fallback`.
    ///
    /// Replaces any previous fallback. Handlers registered afterwards keep
    /// precedence for their own status; the fallback stays active for the rest.
    #[must_use]
    pub fn fallback<F>(mut self, fallback: F) -> Self
    where
        F: Fn() -> O + Send + Sync + 'static,
    {
        self.registry.set_fallback(fallback);
        self
    }

    /// Transform the output of every handler, and of the fallback, with `f`.
    ///
    /// `map(f).map(g)` behaves as `map(|x| g(f(x)))`.
    #[must_use]
    pub fn map<P, F>(self, f: F) -> Triage<P>
    where
        P: Send + 'static,
        F: Fn(O) -> P + Send + Sync + 'static,
    {
        Triage {
            registry: self.registry.map_outputs(f),
            declared: self.declared,
            extract: self.extract,
        }
    }

    /// The registered handlers.
    #[must_use]
    pub const fn registry(&self) -> &Registry<O> {
        &self.registry
    }

    /// Check that every declared status has a handler, or that a fallback exists.
    ///
    /// Always succeeds when no statuses were declared.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UndeclaredStatus`] if a handler covers an undeclared
    /// status, or [`Error::NonExhaustive`] listing the uncovered statuses.
    pub fn ensure_exhaustive(&self) -> Result<()> {
        let Some(declared) = &self.declared else {
            return Ok(());
        };

        if let Some(status) = self
            .registry
            .statuses()
            .find(|status| !declared.contains(status))
        {
            return Err(Error::UndeclaredStatus { status });
        }

        if self.registry.has_fallback() {
            return Ok(());
        }

        let missing: Vec<u16> = declared
            .iter()
            .copied()
            .filter(|status| self.registry.resolve(*status).is_none())
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(Error::NonExhaustive { missing })
        }
    }

    /// Handle an already received response.
    ///
    /// # Errors
    ///
    /// Returns [`Error::HandlerNotSet`], [`Error::BodyDeserialization`] or
    /// [`Error::HandlerExecution`].
    pub async fn dispatch(&self, response: Response) -> Result<Validated<O>> {
        dispatch(&self.registry, self.extract, response).await
    }

    /// Send `request` through `transport` and handle the response.
    ///
    /// The transport is called once; its failure aborts the dispatch.
    pub fn run<'a, T>(&'a self, transport: &'a T, request: Request) -> Pending<'a, O>
    where
        T: Transport,
    {
        let span = info_span!("dispatch", method = %request.method(), url = %request.url());

        Pending::new(
            async move {
                if self.declared.is_some() {
                    self.ensure_exhaustive()?;
                }

                let response = transport.send(request).await.map_err(|err| {
                    debug!(error = %err, "transport failed");
                    Error::Transport(err)
                })?;

                dispatch(&self.registry, self.extract, response).await
            }
            .instrument(span),
        )
    }
}

impl<O: Send + 'static> Default for Triage<O> {
    fn default() -> Self {
        Self::new()
    }
}

impl<O> fmt::Debug for Triage<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Triage")
            .field("registry", &self.registry)
            .field("declared", &self.declared)
            .field("extract", &self.extract)
            .finish()
    }
}
