//! # Mailbox Messages
//!
//! The message types exchanged between a [`ViewClient`](crate::ViewClient) and a
//! [`ViewActor`](crate::ViewActor).

use crate::error::FrameworkError;
use crate::model::ViewModel;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Internal message type sent to the actor.
///
/// - **Dispatch**: apply an intent and report the handler's outcome to the caller.
/// - **Notify**: apply an intent with nobody waiting. Timers and background fetches use
///   this to feed their completions back into the loop; a failed handler is only logged.
/// - **Snapshot**: read the current projection.
/// - **Shutdown**: leave the loop even though clones of the client are still alive
///   (the model's context usually holds one).
#[derive(Debug)]
pub enum ViewRequest<T: ViewModel> {
    Dispatch {
        intent: T::Intent,
        respond_to: Response<()>,
    },
    Notify {
        intent: T::Intent,
    },
    Snapshot {
        respond_to: Response<T::Snapshot>,
    },
    Shutdown {
        respond_to: Response<()>,
    },
}
