//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and functions
//! for easy glob importing:
//!
//! ```ignore
//! use triage_core::prelude::*;
//! ```

pub use crate::{
    ContentType, Error, Extract, Handler, Payload, Request, RequestBuilder, Response, Result,
    Schema, StatusOutcomes, Transport, Triage, Validated, ValidationError, ValidationErrors,
    typed,
};
