//! # ViewModel Trait
//!
//! The `ViewModel` trait is the contract a piece of view state implements to be driven by
//! the generic [`ViewActor`](crate::ViewActor). It names the intents the model accepts, the
//! snapshot it publishes, the context injected at `run()` time and its error type.
//!
//! # Architecture Note
//! A view model is a single owner of mutable state. Every keystroke, timer expiry, button
//! press or navigation event is turned into an `Intent` and delivered through one mailbox, so
//! the model never needs a lock: the actor loop hands it `&mut self` for one intent at a time.
//!
//! # Provided Methods (Hooks)
//! - [`ViewModel::on_start`] runs once before the first intent (initial load).
//! - [`ViewModel::on_stop`] runs once after the loop ends.
//!
//! Both default to doing nothing.

use async_trait::async_trait;
use std::fmt::Debug;

/// State that is owned by a [`ViewActor`](crate::ViewActor) and mutated only through intents.
///
/// # Async & Context
/// The trait is `#[async_trait]` so handlers can await I/O set-up (spawning fetches,
/// scheduling timers). The `Context` associated type is injected into every hook, which lets
/// the model hold a clone of its own client for timers that report back into the mailbox
/// ("late binding": the client exists before the context is built).
#[async_trait]
pub trait ViewModel: Send + Sync + 'static {
    /// Discrete events the model reacts to.
    type Intent: Send + Sync + Debug;

    /// Read-only projection published after every handled request.
    type Snapshot: Clone + Debug + Default + Send + Sync + 'static;

    /// The runtime context (dependencies) injected into the actor.
    /// Use `()` if no dependencies are needed.
    type Context: Send + Sync;

    /// The error type returned by intent handlers.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Called once when the actor loop starts, before any intent is processed.
    async fn on_start(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Apply one intent to the model.
    async fn handle_intent(
        &mut self,
        intent: Self::Intent,
        ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Called once after the actor loop ends (explicit shutdown or closed mailbox).
    async fn on_stop(&mut self, _ctx: &Self::Context) {}

    /// Project the current state.
    fn snapshot(&self) -> Self::Snapshot;
}
