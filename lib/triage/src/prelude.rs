//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types, functions, and macros
//! for easy glob importing:
//!
//! ```ignore
//! use triage::prelude::*;
//! ```

pub use crate::{
    ContentType, Error, Extract, Handler, HyperTransport, Method, Payload, Request,
    RequestBuilder, Response, Result, Schema, StatusCode, StatusOutcomes, Transport,
    TransportConfig, TransportError, Triage, Validated, ValidationError, ValidationErrors,
    header, typed,
};
pub use serde::{Deserialize, Serialize};
