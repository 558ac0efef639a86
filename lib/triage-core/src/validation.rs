//! Runtime validation of handler outputs.
//!
//! A [`Schema`] checks a value and either returns the validated (possibly
//! coerced) value or a non-empty list of [`ValidationError`]s. Validation never
//! aborts a dispatch: failures are reported next to the unvalidated value in a
//! [`Validated`].

use std::fmt;
use std::marker::PhantomData;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// A single validation failure: where, and what.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    path: String,
    message: String,
}

impl ValidationError {
    /// Create a validation error for the value at `path`.
    #[must_use]
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Path of the offending value (e.g. `user.address.city`, `.` for the root).
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Human readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            f.write_str(&self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

impl std::error::Error for ValidationError {}

/// A non-empty list of [`ValidationError`]s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors {
    first: ValidationError,
    rest: Vec<ValidationError>,
}

impl ValidationErrors {
    /// A list holding a single error.
    #[must_use]
    pub const fn new(first: ValidationError) -> Self {
        Self {
            first,
            rest: Vec::new(),
        }
    }

    /// Build a list from a vector, or `None` if the vector is empty.
    #[must_use]
    pub fn from_vec(errors: Vec<ValidationError>) -> Option<Self> {
        let mut errors = errors.into_iter();
        let first = errors.next()?;
        Some(Self {
            first,
            rest: errors.collect(),
        })
    }

    /// Append an error.
    pub fn push(&mut self, error: ValidationError) {
        self.rest.push(error);
    }

    /// The first error.
    #[must_use]
    pub const fn first(&self) -> &ValidationError {
        &self.first
    }

    /// Number of errors, always at least one.
    #[must_use]
    pub fn len(&self) -> usize {
        1 + self.rest.len()
    }

    /// Always `false`.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Iterate over the errors in order.
    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        std::iter::once(&self.first).chain(&self.rest)
    }

    /// Consume into a vector.
    #[must_use]
    pub fn into_vec(self) -> Vec<ValidationError> {
        let mut errors = Vec::with_capacity(self.len());
        errors.push(self.first);
        errors.extend(self.rest);
        errors
    }
}

impl From<ValidationError> for ValidationErrors {
    fn from(error: ValidationError) -> Self {
        Self::new(error)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, error) in self.iter().enumerate() {
            if index > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

// ============================================================================
// Schema
// ============================================================================

/// Runtime validator for values of type `T`.
///
/// Any `Fn(&T) -> Result<T, ValidationErrors>` is a schema.
///
/// # Example
///
/// ```
/// use triage_core::{Schema, ValidationError, ValidationErrors};
///
/// let positive = |n: &i64| {
///     if *n > 0 {
///         Ok(*n)
///     } else {
///         Err(ValidationErrors::new(ValidationError::new(".", "must be positive")))
///     }
/// };
///
/// assert_eq!(positive.decode(&3), Ok(3));
/// assert!(positive.decode(&-1).is_err());
/// ```
pub trait Schema<T>: Send + Sync {
    /// Validate `value`, returning the validated value or the list of failures.
    fn decode(&self, value: &T) -> Result<T, ValidationErrors>;
}

impl<T, F> Schema<T> for F
where
    F: Fn(&T) -> Result<T, ValidationErrors> + Send + Sync,
{
    fn decode(&self, value: &T) -> Result<T, ValidationErrors> {
        self(value)
    }
}

/// Schema checking that a JSON value has the shape of the serde type `S`.
///
/// On success the value is returned as `S` serializes it, so defaults and
/// renames applied by `S` show up in the validated value.
pub struct TypedSchema<S> {
    _shape: PhantomData<fn() -> S>,
}

impl<S> TypedSchema<S> {
    /// Create a schema for the shape `S`.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _shape: PhantomData,
        }
    }
}

impl<S> Default for TypedSchema<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> fmt::Debug for TypedSchema<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TypedSchema")
            .field(&std::any::type_name::<S>())
            .finish()
    }
}

impl<S> Schema<Value> for TypedSchema<S>
where
    S: DeserializeOwned + Serialize,
{
    fn decode(&self, value: &Value) -> Result<Value, ValidationErrors> {
        let shaped: S = serde_path_to_error::deserialize(value).map_err(|e| {
            ValidationErrors::new(ValidationError::new(
                e.path().to_string(),
                e.inner().to_string(),
            ))
        })?;

        serde_json::to_value(&shaped)
            .map_err(|e| ValidationErrors::new(ValidationError::new(".", e.to_string())))
    }
}

/// Shorthand for [`TypedSchema::new`].
#[must_use]
pub const fn typed<S>() -> TypedSchema<S> {
    TypedSchema::new()
}

// ============================================================================
// Validated
// ============================================================================

/// The result of a successful dispatch: a value plus optional diagnostics.
///
/// `errors` is `None` when no schema was attached to the handler, or when the
/// schema accepted the value. When validation fails, `value` is the handler's
/// unvalidated output.
#[derive(Debug, Clone, PartialEq)]
pub struct Validated<O> {
    value: O,
    errors: Option<ValidationErrors>,
}

impl<O> Validated<O> {
    /// A value without validation errors.
    #[must_use]
    pub const fn valid(value: O) -> Self {
        Self {
            value,
            errors: None,
        }
    }

    /// A value that failed validation.
    #[must_use]
    pub const fn invalid(value: O, errors: ValidationErrors) -> Self {
        Self {
            value,
            errors: Some(errors),
        }
    }

    /// The value.
    #[must_use]
    pub const fn value(&self) -> &O {
        &self.value
    }

    /// The validation errors, if validation failed.
    #[must_use]
    pub const fn errors(&self) -> Option<&ValidationErrors> {
        self.errors.as_ref()
    }

    /// Returns `true` if there are no validation errors.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.errors.is_none()
    }

    /// Consume into the value, dropping any diagnostics.
    #[must_use]
    pub fn into_value(self) -> O {
        self.value
    }

    /// Consume into (value, errors).
    #[must_use]
    pub fn into_parts(self) -> (O, Option<ValidationErrors>) {
        (self.value, self.errors)
    }

    /// Transform the value, keeping the diagnostics.
    pub fn map<P, F>(self, f: F) -> Validated<P>
    where
        F: FnOnce(O) -> P,
    {
        Validated {
            value: f(self.value),
            errors: self.errors,
        }
    }
}
