//! # View Actor
//!
//! A small runtime for event-driven view state built on the **Actor Model**.
//!
//! A view (a search box with results, a paginated list, ...) receives a stream of discrete
//! events: keystrokes, timer expiries, button presses, navigation. This crate funnels all of
//! them through one mailbox into one owner of the state, so every mutation happens on a single
//! logical event loop and the state needs no locks.
//!
//! ## Architecture Overview
//!
//! 1. **Model Layer** ([`ViewModel`]) - your state and how each intent changes it
//! 2. **Runtime Layer** ([`ViewActor`]) - the sequential message loop, snapshot publishing
//! 3. **Interface Layer** ([`ViewClient`]) - typed dispatch, notify, snapshot, subscribe
//!
//! Timers and background work never touch the model directly: they capture a clone of the
//! client and report back with [`ViewClient::notify`]. The [`Debouncer`] primitive packages the
//! cancel-and-reschedule timer that keystroke handling needs.
//!
//! ## Context Injection
//!
//! Dependencies are injected when the loop starts (`actor.run(context)`), not when the actor is
//! built. This lets the context hold a clone of the actor's own client, which is how a model
//! schedules work that reports back to itself. Since such a context keeps the mailbox open,
//! stop the loop with [`ViewClient::shutdown`].
//!
//! ## Testing
//!
//! See the [`mock`] module for a `MockClient` that records intents and replays scripted
//! replies, and the `start_paused` tests in [`debounce`] for driving timers deterministically.

pub mod actor;
pub mod client;
pub mod debounce;
pub mod error;
pub mod message;
pub mod mock;
pub mod model;
pub mod tracing;

// Re-export core types for convenience
pub use actor::ViewActor;
pub use client::ViewClient;
pub use debounce::Debouncer;
pub use error::FrameworkError;
pub use message::{Response, ViewRequest};
pub use model::ViewModel;
