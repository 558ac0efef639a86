//! # Chapter 1: Validation
//!
//! Attach a schema to a handler to check its output at runtime.
//!
//! ## Typed Schemas
//!
//! [`typed`](crate::typed) validates a JSON value against any serde type:
//!
//! ```ignore
//! #[derive(Serialize, Deserialize)]
//! struct FooBaz {
//!     foo: String,
//!     baz: f64,
//! }
//!
//! let triage = Triage::new()
//!     .handle_with(200, Handler::new(Payload::into_json).schema(typed::<FooBaz>()))?;
//! ```
//!
//! ## Failures Are Diagnostics
//!
//! A failed validation does not abort the dispatch. The result carries the
//! handler's unvalidated output next to the errors:
//!
//! ```ignore
//! // body: {"foo": "bar", "baz": "42"}
//! let validated = triage.run(&transport, request).await?;
//!
//! assert!(!validated.is_valid());
//! for error in validated.errors().into_iter().flat_map(ValidationErrors::iter) {
//!     println!("{}: {}", error.path(), error.message()); // baz: invalid type ...
//! }
//! let raw = validated.into_value(); // still {"foo": "bar", "baz": "42"}
//! ```
//!
//! On success the value is the schema's output, so serde defaults and
//! renames show up in it.
//!
//! ## Custom Schemas
//!
//! Any `Fn(&T) -> Result<T, ValidationErrors>` is a schema:
//!
//! ```ignore
//! let positive = |n: &i64| {
//!     if *n > 0 {
//!         Ok(*n)
//!     } else {
//!         Err(ValidationErrors::new(ValidationError::new(".", "must be positive")))
//!     }
//! };
//!
//! let triage = Triage::new()
//!     .handle_with(200, Handler::json(|count: i64| count).schema(positive))?;
//! ```
//!
//! ## Next Steps
//!
//! - [Chapter 2: Mapping & Errors][super::chapter_2] - Transform results, handle failures
