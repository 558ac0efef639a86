//! # Chapter 2: Mapping & Errors
//!
//! ## Mapping Every Outcome
//!
//! [`Triage::map`](crate::Triage::map) composes a function onto every handler
//! and onto the fallback:
//!
//! ```ignore
//! let titles = Triage::new()
//!     .handle_json(200, |repo: Repo| repo.full_name)?
//!     .fallback(|| "unknown".to_string())
//!     .map(|name| name.to_uppercase());
//! ```
//!
//! Maps compose: `map(f).map(g)` behaves as `map(|x| g(f(x)))`, and mapping
//! the identity changes nothing. A schema keeps validating the output it was
//! written for; later maps run after it, and diagnostics are kept.
//!
//! The pending result of [`Triage::run`](crate::Triage::run) can be mapped
//! too, before awaiting it:
//!
//! ```ignore
//! let len = triage.run(&transport, request).map(|name| name.len()).await?;
//! ```
//!
//! ## Error Handling
//!
//! Every dispatch returns one `Validated<O>` or one [`Error`](crate::Error):
//!
//! ```ignore
//! match triage.run(&transport, request).await {
//!     Ok(validated) => println!("{:?}", validated.value()),
//!     Err(Error::Transport(e)) => println!("network: {e}"),
//!     Err(Error::BodyDeserialization(e)) => println!("bad body: {e}"),
//!     Err(Error::HandlerExecution { status, cause }) => println!("handler for {status}: {cause}"),
//!     Err(Error::HandlerNotSet { status }) => println!("nothing handles {status}"),
//!     Err(e) => println!("configuration: {e}"),
//! }
//! ```
//!
//! Fallible handlers use `Handler::try_new` or `Handler::try_json`; their
//! errors become `Error::HandlerExecution` with the status attached:
//!
//! ```ignore
//! let triage = Triage::new()
//!     .handle_with(200, Handler::try_new(|p: Payload| p.into_text().parse::<u64>()))?;
//! ```
//!
//! ## Next Steps
//!
//! - [Chapter 3: Declared Outcomes & Transports][super::chapter_3]
