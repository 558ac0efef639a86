//! # Chapter 3: Declared Outcomes & Transports
//!
//! ## Declaring Outcomes
//!
//! Derive [`StatusOutcomes`](crate::StatusOutcomes) on the enum describing
//! what an endpoint can answer. Duplicate status codes fail to compile:
//!
//! ```ignore
//! #[derive(Debug, StatusOutcomes)]
//! enum GetRepo {
//!     #[status(200)]
//!     Found(Repo),
//!     #[status(404)]
//!     Missing,
//! }
//!
//! let triage = Triage::for_outcomes::<GetRepo>()
//!     .handle_json(200, GetRepo::Found)?
//!     .handle(404, |_| GetRepo::Missing)?;
//! ```
//!
//! With declared outcomes:
//! - `handle` for a status outside the declaration fails with
//!   `Error::UndeclaredStatus`
//! - `run` refuses to send anything while a declared status has no handler
//!   and there is no fallback (`Error::NonExhaustive`)
//!
//! [`Triage::declare`](crate::Triage::declare) does the same from a plain list.
//!
//! ## Configuring the Transport
//!
//! ```ignore
//! use std::time::Duration;
//!
//! let transport = HyperTransport::builder()
//!     .timeout(Duration::from_secs(10))
//!     .connect_timeout(Duration::from_secs(2))
//!     .user_agent("my-app/1.0")
//!     .with_logging()
//!     .build();
//! ```
//!
//! A per-request timeout wins over the transport's:
//!
//! ```ignore
//! let request = Request::builder(Method::GET, url)
//!     .timeout(Duration::from_millis(500))
//!     .build();
//! ```
//!
//! ## Bring Your Own Transport
//!
//! Anything implementing [`Transport`](crate::Transport) works, which makes
//! tests independent of the network:
//!
//! ```ignore
//! struct Canned(u16, &'static str);
//!
//! impl Transport for Canned {
//!     async fn send(&self, _request: Request) -> Result<Response, TransportError> {
//!         Ok(Response::new(self.0, HashMap::new(), self.1))
//!     }
//! }
//! ```
