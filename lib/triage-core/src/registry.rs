//! Handler registration.
//!
//! A [`Handler`] pairs a transform with an optional [`Schema`]. Once registered
//! under a status code it becomes a sealed [`HandlerEntry`] inside a
//! [`Registry`]. Entries are immutable: mapping the output type consumes the
//! registry and produces a new one.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::{BodyError, BoxError, Error, Payload, Result, Schema, Validated};

/// Why a transform did not produce a value.
#[derive(Debug)]
enum Failure {
    /// The payload did not have the shape the handler expects.
    Body(BodyError),
    /// The handler itself failed.
    Handler(BoxError),
}

type Transform<O> = Arc<dyn Fn(Payload) -> std::result::Result<O, Failure> + Send + Sync>;
type Pipeline<O> = Arc<dyn Fn(Payload) -> Result<Validated<O>> + Send + Sync>;

/// Fallback producing the output for unregistered status codes.
pub type Fallback<O> = Arc<dyn Fn() -> O + Send + Sync>;

// ============================================================================
// Handler
// ============================================================================

/// A transform from a decoded body to `O`, with an optional schema.
///
/// # Example
///
/// ```
/// use triage_core::{Handler, typed};
///
/// #[derive(serde::Serialize, serde::Deserialize)]
/// struct User { id: u64 }
///
/// let handler = Handler::new(|payload| payload.into_json()).schema(typed::<User>());
/// assert!(handler.has_schema());
/// ```
pub struct Handler<O> {
    transform: Transform<O>,
    schema: Option<Arc<dyn Schema<O>>>,
}

impl<O: 'static> Handler<O> {
    /// Handler from an infallible transform.
    ///
    /// A panic in `transform` is not caught; use [`Handler::try_new`] for
    /// transforms that can fail.
    pub fn new<F>(transform: F) -> Self
    where
        F: Fn(Payload) -> O + Send + Sync + 'static,
    {
        Self::from_transform(move |payload| Ok(transform(payload)))
    }

    /// Handler from a fallible transform.
    ///
    /// An `Err` is reported as [`Error::HandlerExecution`].
    pub fn try_new<F, E>(transform: F) -> Self
    where
        F: Fn(Payload) -> std::result::Result<O, E> + Send + Sync + 'static,
        E: Into<BoxError>,
    {
        Self::from_transform(move |payload| {
            transform(payload).map_err(|e| Failure::Handler(e.into()))
        })
    }

    /// Handler receiving the payload deserialized as `T`.
    ///
    /// A payload that does not deserialize into `T` is reported as
    /// [`Error::BodyDeserialization`].
    pub fn json<T, F>(transform: F) -> Self
    where
        T: DeserializeOwned,
        F: Fn(T) -> O + Send + Sync + 'static,
    {
        Self::from_transform(move |payload| {
            let input = payload.deserialize::<T>().map_err(Failure::Body)?;
            Ok(transform(input))
        })
    }

    /// Handler receiving the payload deserialized as `T`, with a fallible transform.
    pub fn try_json<T, F, E>(transform: F) -> Self
    where
        T: DeserializeOwned,
        F: Fn(T) -> std::result::Result<O, E> + Send + Sync + 'static,
        E: Into<BoxError>,
    {
        Self::from_transform(move |payload| {
            let input = payload.deserialize::<T>().map_err(Failure::Body)?;
            transform(input).map_err(|e| Failure::Handler(e.into()))
        })
    }

    fn from_transform<F>(transform: F) -> Self
    where
        F: Fn(Payload) -> std::result::Result<O, Failure> + Send + Sync + 'static,
    {
        Self {
            transform: Arc::new(transform),
            schema: None,
        }
    }

    /// Validate this handler's output with `schema`.
    #[must_use]
    pub fn schema<S>(mut self, schema: S) -> Self
    where
        S: Schema<O> + 'static,
    {
        self.schema = Some(Arc::new(schema));
        self
    }

    /// Returns `true` if a schema is attached.
    #[must_use]
    pub const fn has_schema(&self) -> bool {
        self.schema.is_some()
    }

    /// Seal the handler for `status`.
    ///
    /// The schema is bound to `O` here, so later output maps compose after
    /// validation and never change what the schema sees.
    fn into_entry(self, status: u16) -> HandlerEntry<O> {
        let Self { transform, schema } = self;
        let validated = schema.is_some();

        let pipeline: Pipeline<O> = Arc::new(move |payload: Payload| -> Result<Validated<O>> {
            let output = transform(payload).map_err(|failure| match failure {
                Failure::Body(err) => Error::BodyDeserialization(err),
                Failure::Handler(cause) => Error::HandlerExecution { status, cause },
            })?;

            let Some(schema) = &schema else {
                return Ok(Validated::valid(output));
            };
            Ok(match schema.decode(&output) {
                Ok(value) => Validated::valid(value),
                Err(errors) => Validated::invalid(output, errors),
            })
        });

        HandlerEntry {
            pipeline,
            validated,
        }
    }
}

impl<O> fmt::Debug for Handler<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handler")
            .field("schema", &self.schema.is_some())
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Handler Entry
// ============================================================================

/// A handler sealed into a [`Registry`].
pub struct HandlerEntry<O> {
    pipeline: Pipeline<O>,
    validated: bool,
}

impl<O: 'static> HandlerEntry<O> {
    /// Run transform and validation on a decoded body.
    ///
    /// # Errors
    ///
    /// Returns [`Error::HandlerExecution`] if the transform fails, or
    /// [`Error::BodyDeserialization`] if a typed handler cannot decode the payload.
    pub fn apply(&self, payload: Payload) -> Result<Validated<O>> {
        (self.pipeline)(payload)
    }

    /// Returns `true` if the handler validates its output.
    #[must_use]
    pub const fn has_schema(&self) -> bool {
        self.validated
    }

    fn map<P, F>(self, f: Arc<F>) -> HandlerEntry<P>
    where
        P: 'static,
        F: Fn(O) -> P + Send + Sync + 'static,
    {
        let pipeline = self.pipeline;
        HandlerEntry {
            pipeline: Arc::new(move |payload: Payload| -> Result<Validated<P>> {
                pipeline(payload).map(|validated| validated.map(|value| f(value)))
            }),
            validated: self.validated,
        }
    }
}

impl<O> fmt::Debug for HandlerEntry<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerEntry")
            .field("validated", &self.validated)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Registry
// ============================================================================

/// Status code to handler mapping, plus an optional fallback.
///
/// Each status code is claimed at most once.
pub struct Registry<O> {
    entries: BTreeMap<u16, HandlerEntry<O>>,
    fallback: Option<Fallback<O>>,
}

impl<O: 'static> Registry<O> {
    /// An empty registry.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            fallback: None,
        }
    }

    /// Register `handler` for `status`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateHandler`] if `status` is already claimed.
    pub fn register(&mut self, status: u16, handler: Handler<O>) -> Result<()> {
        if self.entries.contains_key(&status) {
            return Err(Error::DuplicateHandler { status });
        }
        self.entries.insert(status, handler.into_entry(status));
        Ok(())
    }

    /// Set the fallback, replacing any previous one.
    pub fn set_fallback<F>(&mut self, fallback: F)
    where
        F: Fn() -> O + Send + Sync + 'static,
    {
        self.fallback = Some(Arc::new(fallback));
    }

    /// The entry registered for `status`.
    #[must_use]
    pub fn resolve(&self, status: u16) -> Option<&HandlerEntry<O>> {
        self.entries.get(&status)
    }

    /// The fallback, if set.
    #[must_use]
    pub fn fallback(&self) -> Option<&Fallback<O>> {
        self.fallback.as_ref()
    }

    /// Returns `true` if a fallback is set.
    #[must_use]
    pub const fn has_fallback(&self) -> bool {
        self.fallback.is_some()
    }

    /// Registered status codes, in ascending order.
    pub fn statuses(&self) -> impl Iterator<Item = u16> + '_ {
        self.entries.keys().copied()
    }

    /// Number of registered handlers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no handler is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Compose `f` after every entry and after the fallback.
    #[must_use]
    pub fn map_outputs<P, F>(self, f: F) -> Registry<P>
    where
        P: 'static,
        F: Fn(O) -> P + Send + Sync + 'static,
    {
        let f = Arc::new(f);

        let entries = self
            .entries
            .into_iter()
            .map(|(status, entry)| (status, entry.map(Arc::clone(&f))))
            .collect();

        let fallback = self.fallback.map(|fallback| {
            let f = Arc::clone(&f);
            Arc::new(move || f(fallback())) as Fallback<P>
        });

        Registry { entries, fallback }
    }
}

impl<O: 'static> Default for Registry<O> {
    fn default() -> Self {
        Self::new()
    }
}

impl<O> fmt::Debug for Registry<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("statuses", &self.entries.keys().collect::<Vec<_>>())
            .field("fallback", &self.fallback.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::{ValidationError, ValidationErrors};

    #[test]
    fn register_and_resolve() {
        let mut registry = Registry::new();
        registry
            .register(200, Handler::new(Payload::into_text))
            .expect("register");

        let entry = registry.resolve(200).expect("entry for 200");
        let validated = entry.apply(Payload::from("foo")).expect("apply");
        assert_eq!(validated, Validated::valid("foo".to_string()));

        assert!(registry.resolve(404).is_none());
        assert_eq!(registry.statuses().collect::<Vec<_>>(), vec![200]);
    }

    #[test]
    fn duplicate_registration_is_rejected() {
        let mut registry = Registry::new();
        registry
            .register(200, Handler::new(|_| 1))
            .expect("first registration");

        let err = registry
            .register(200, Handler::new(|_| 2))
            .expect_err("second registration");
        assert!(matches!(err, Error::DuplicateHandler { status: 200 }));

        let entry = registry.resolve(200).expect("entry");
        assert_eq!(entry.apply(Payload::from("")).expect("apply").into_value(), 1);
    }

    #[test]
    fn fallback_is_replaced() {
        let mut registry = Registry::<u8>::new();
        registry.set_fallback(|| 1);
        registry.set_fallback(|| 2);

        let fallback = registry.fallback().expect("fallback");
        assert_eq!(fallback(), 2);
    }

    #[test]
    fn failing_transform_is_a_handler_error() {
        let mut registry = Registry::<u32>::new();
        registry
            .register(
                201,
                Handler::try_new(|payload: Payload| payload.into_text().parse::<u32>()),
            )
            .expect("register");

        let err = registry
            .resolve(201)
            .expect("entry")
            .apply(Payload::from("not a number"))
            .expect_err("should fail");
        assert!(matches!(err, Error::HandlerExecution { status: 201, .. }));
    }

    #[test]
    fn typed_handler_shape_mismatch_is_a_body_error() {
        #[derive(Debug, serde::Deserialize)]
        struct User {
            id: u64,
        }

        let mut registry = Registry::new();
        registry
            .register(200, Handler::json(|user: User| user.id))
            .expect("register");
        let entry = registry.resolve(200).expect("entry");

        assert_eq!(
            entry
                .apply(Payload::from(json!({"id": 7})))
                .expect("apply")
                .into_value(),
            7
        );

        let err = entry
            .apply(Payload::from(json!({"id": "seven"})))
            .expect_err("should fail");
        assert!(err.is_body_deserialization());
    }

    #[test]
    fn try_json_reports_both_failure_kinds() {
        #[derive(Debug, serde::Deserialize)]
        struct User {
            id: u64,
        }

        let mut registry = Registry::new();
        registry
            .register(
                200,
                Handler::try_json(|user: User| {
                    if user.id == 0 {
                        Err("zero id")
                    } else {
                        Ok(user.id)
                    }
                }),
            )
            .expect("register");
        let entry = registry.resolve(200).expect("entry");

        assert_eq!(
            entry
                .apply(Payload::from(json!({"id": 7})))
                .expect("apply")
                .into_value(),
            7
        );

        let err = entry
            .apply(Payload::from(json!({"name": "no id"})))
            .expect_err("wrong shape");
        assert!(err.is_body_deserialization());

        let err = entry
            .apply(Payload::from(json!({"id": 0})))
            .expect_err("rejected by transform");
        assert!(matches!(err, Error::HandlerExecution { status: 200, .. }));
    }

    #[test]
    fn schema_failure_keeps_raw_output() {
        let reject = |_: &String| -> std::result::Result<String, ValidationErrors> {
            Err(ValidationError::new(".", "rejected").into())
        };
        let coerce = |s: &String| -> std::result::Result<String, ValidationErrors> {
            Ok(s.to_uppercase())
        };

        let mut registry = Registry::new();
        registry
            .register(200, Handler::new(Payload::into_text).schema(reject))
            .expect("register 200");
        registry
            .register(201, Handler::new(Payload::into_text).schema(coerce))
            .expect("register 201");

        let rejected = registry
            .resolve(200)
            .expect("entry")
            .apply(Payload::from("raw"))
            .expect("apply");
        assert_eq!(rejected.value(), "raw");
        assert_eq!(rejected.errors().map(ValidationErrors::len), Some(1));

        let coerced = registry
            .resolve(201)
            .expect("entry")
            .apply(Payload::from("raw"))
            .expect("apply");
        assert_eq!(coerced, Validated::valid("RAW".to_string()));
    }

    #[test]
    fn map_outputs_composes_entries_and_fallback() {
        let mut registry = Registry::new();
        registry
            .register(200, Handler::new(Payload::into_text))
            .expect("register");
        registry.set_fallback(|| "fallback".to_string());

        let registry = registry.map_outputs(|s: String| s.len());

        let entry = registry.resolve(200).expect("entry");
        assert_eq!(
            entry.apply(Payload::from("four")).expect("apply").into_value(),
            4
        );
        assert_eq!(registry.fallback().map(|fallback| fallback()), Some(8));
    }
}
