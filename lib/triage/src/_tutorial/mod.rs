//! # Tutorial: Handling HTTP Responses with triage
//!
//! Learn to route responses by status code step by step.
//!
//! ## Chapters
//!
//! 1. [Getting Started][chapter_0] - Your first handler
//! 2. [Validation][chapter_1] - Schemas and diagnostics
//! 3. [Mapping & Errors][chapter_2] - `map` and the error taxonomy
//! 4. [Declared Outcomes & Transports][chapter_3] - `StatusOutcomes`, middleware
//!
//! Ready? Start with [Chapter 0: Getting Started][chapter_0].

pub mod chapter_0;
pub mod chapter_1;
pub mod chapter_2;
pub mod chapter_3;
