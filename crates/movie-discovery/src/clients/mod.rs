//! Type-safe wrappers around [`ViewClient`](view_actor::ViewClient).

pub mod actor_client;
pub mod discovery_client;

pub use actor_client::*;
pub use discovery_client::*;
