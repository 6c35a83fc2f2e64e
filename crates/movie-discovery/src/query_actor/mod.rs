//! # Query Actor
//!
//! The query state controller: the single owner of search text, debounced query, page number
//! and the in-memory URL history, driven by a [`ViewActor`].
//!
//! ## Structure
//!
//! - [`controller`] - [`QueryController`], the [`ViewModel`](view_actor::ViewModel) implementation
//! - [`intent`] - [`QueryIntent`], every event the controller reacts to
//! - [`history`] - [`MemoryHistory`], push/replace writes and browser navigation
//! - [`error`] - [`QueryError`]
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Transitions
//!
//! | Intent | State | URL | Fetch |
//! |--------|-------|-----|-------|
//! | `Input(text)` | search box only, debounce restarted | - | - |
//! | debounce settles | query = text, page = 1 | replace | one |
//! | `ChangePage(delta)` | page = max(1, page + delta) | push | one |
//! | `Back` / `Forward` / `Open` / `UrlChanged` | adopt URL's query and page | - | one |
//!
//! Transitions that would leave `(query, page)` where it is skip the URL write and the fetch.
//! A navigation still resets the search box and drops pending typing unless the URL already
//! matches what is in the box.
//!
//! ## Usage
//!
//! The controller's context needs a clone of its own client, so it is built after `new()`:
//!
//! ```rust,ignore
//! let (actor, client) = query_actor::new(&config.controller, UrlParams::parse(url));
//! let context = ControllerContext { gateway: Arc::new(gateway), mailbox: client.clone() };
//! tokio::spawn(actor.run(context));
//! ```

pub mod controller;
pub mod error;
pub mod history;
pub mod intent;

pub use controller::*;
pub use error::*;
pub use history::*;
pub use intent::*;

use crate::config::ControllerConfig;
use crate::model::UrlParams;
use view_actor::{ViewActor, ViewClient};

/// Creates a query controller actor seeded from `initial`, and its client.
pub fn new(
    config: &ControllerConfig,
    initial: UrlParams,
) -> (ViewActor<QueryController>, ViewClient<QueryController>) {
    ViewActor::new(
        QueryController::new(initial, config.debounce),
        config.mailbox_capacity,
    )
}
