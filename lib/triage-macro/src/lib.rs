//! Procedural macros for triage.
//!
//! This crate provides:
//! - `#[derive(StatusOutcomes)]` - Declare the status codes an endpoint answers with
//!
//! # Example
//!
//! ```ignore
//! use triage::prelude::*;
//!
//! #[derive(StatusOutcomes)]
//! enum GetUser {
//!     #[status(200)]
//!     Found(User),
//!     #[status(404)]
//!     Missing,
//! }
//!
//! let triage = Triage::for_outcomes::<GetUser>()
//!     .handle_json(200, GetUser::Found)?
//!     .handle(404, |_| GetUser::Missing)?;
//! ```

mod status_derive;

use proc_macro::TokenStream;

/// Derive `StatusOutcomes` for an enum.
///
/// Every variant carries exactly one `#[status(N)]` attribute with `N` in
/// `100..=599`, and no two variants share a status. The generated impl lists
/// the statuses in declaration order and maps each variant back to its status.
///
/// # Errors
///
/// Compilation fails when:
/// - the input is not an enum, or has no variants
/// - a variant has no `#[status(..)]` attribute, or more than one
/// - a status code is out of range
/// - two variants use the same status code
///
/// # Example
///
/// ```ignore
/// use triage::StatusOutcomes;
///
/// #[derive(StatusOutcomes)]
/// enum CreateUser {
///     #[status(201)]
///     Created { id: u64 },
///     #[status(409)]
///     Conflict(String),
///     #[status(422)]
///     Invalid,
/// }
///
/// assert_eq!(CreateUser::STATUSES, &[201, 409, 422]);
/// assert_eq!(CreateUser::Invalid.status(), 422);
/// ```
#[proc_macro_derive(StatusOutcomes, attributes(status))]
pub fn derive_status_outcomes(input: TokenStream) -> TokenStream {
    status_derive::expand_status_derive(input.into())
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
