//! # Chapter 0: Getting Started
//!
//! Your first status-driven response handler in 5 minutes.
//!
//! ## What You'll Learn
//!
//! - Register one handler per status code
//! - Add a fallback for everything else
//! - Send a request through [`HyperTransport`](crate::HyperTransport)
//!
//! ## Prerequisites
//!
//! Add to `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! triage = "0.1"
//! serde = { version = "1.0", features = ["derive"] }
//! tokio = { version = "1", features = ["full"] }
//! ```
//!
//! ## Your First Handler
//!
//! ```ignore
//! use triage::prelude::*;
//!
//! #[derive(Debug, Deserialize)]
//! pub struct User {
//!     pub id: u64,
//!     pub name: String,
//! }
//!
//! #[derive(Debug)]
//! pub enum Lookup {
//!     Found(User),
//!     Missing,
//!     Other,
//! }
//!
//! #[tokio::main]
//! async fn main() -> triage::Result<()> {
//!     let triage = Triage::new()
//!         .handle_json(200, Lookup::Found)?
//!         .handle(404, |_| Lookup::Missing)?
//!         .fallback(|| Lookup::Other);
//!
//!     let transport = HyperTransport::new();
//!     let request = Request::get("https://api.example.com/users/42")?;
//!
//!     let lookup = triage.run(&transport, request).await?.into_value();
//!     println!("{lookup:?}");
//!     Ok(())
//! }
//! ```
//!
//! ## What Happens
//!
//! ```text
//! run(transport, request)
//!   → transport.send        (one call, failure = Error::Transport)
//!   → status 200 / 404      → decode body → your handler
//!   → any other status      → fallback (body never read)
//!   → no fallback           → Error::HandlerNotSet
//! ```
//!
//! - Each status has at most one handler; registering twice fails with
//!   `Error::DuplicateHandler`
//! - The fallback runs only for statuses without a handler
//! - Bodies are decoded by `Content-Type`: JSON for `application/json` and
//!   `*+json`, text otherwise
//!
//! ## Next Steps
//!
//! - [Chapter 1: Validation][super::chapter_1] - Check handler outputs at runtime
