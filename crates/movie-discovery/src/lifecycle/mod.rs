//! # System Lifecycle
//!
//! Starts the query controller, wires its context, and stops it again.
//!
//! ## Wiring
//!
//! The controller's context holds a clone of its own client, so the client has to exist
//! before the context does. Construction therefore happens in two steps:
//!
//! 1. **Create** - `query_actor::new()` returns the actor and its client, no dependencies yet.
//! 2. **Run** - the context (gateway + mailbox clone) is injected with `actor.run(context)`.
//!
//! ## Shutdown
//!
//! Dropping the clients is not enough here: the context's mailbox clone keeps the channel
//! open for as long as the loop runs. [`DiscoverySystem::shutdown`] sends an explicit
//! `Shutdown` request, which cancels the pending debounce timer and ends the loop, then
//! awaits the actor task. Fetches already in flight finish on their own and their results
//! are dropped.
//!
//! ## Observability
//!
//! Logging is initialized once by the binary with
//! [`view_actor::tracing::setup_tracing`]; `RUST_LOG` picks the level.

pub mod discovery_system;

pub use discovery_system::*;
