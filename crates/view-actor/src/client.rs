//! # Generic Client
//!
//! The handle used to talk to a running [`ViewActor`](crate::ViewActor).

use crate::error::FrameworkError;
use crate::message::ViewRequest;
use crate::model::ViewModel;
use tokio::sync::{mpsc, oneshot, watch};

/// ## ViewClient
///
/// A type-safe, async handle for a `ViewActor<T>`. It forwards intents over a Tokio mpsc
/// channel and receives replies on oneshot channels. It also carries a `watch` receiver so
/// renderers can follow published snapshots without polling the actor.
///
/// * **Cloneable** – holds a sender and a watch receiver, both cheap to clone.
/// * **Ordered** – intents are applied in the order they reach the mailbox.
pub struct ViewClient<T: ViewModel> {
    sender: mpsc::Sender<ViewRequest<T>>,
    snapshots: watch::Receiver<T::Snapshot>,
}

impl<T: ViewModel> Clone for ViewClient<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
            snapshots: self.snapshots.clone(),
        }
    }
}

impl<T: ViewModel> ViewClient<T> {
    pub fn new(
        sender: mpsc::Sender<ViewRequest<T>>,
        snapshots: watch::Receiver<T::Snapshot>,
    ) -> Self {
        Self { sender, snapshots }
    }

    /// Apply an intent and wait for the handler's result.
    pub async fn dispatch(&self, intent: T::Intent) -> Result<(), FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ViewRequest::Dispatch { intent, respond_to })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    /// Queue an intent without waiting for it to be handled.
    pub async fn notify(&self, intent: T::Intent) -> Result<(), FrameworkError> {
        self.sender
            .send(ViewRequest::Notify { intent })
            .await
            .map_err(|_| FrameworkError::ActorClosed)
    }

    /// Read the model's current snapshot through the mailbox.
    ///
    /// The answer reflects every intent queued before this call.
    pub async fn snapshot(&self) -> Result<T::Snapshot, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ViewRequest::Snapshot { respond_to })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    /// Subscribe to published snapshots.
    pub fn subscribe(&self) -> watch::Receiver<T::Snapshot> {
        self.snapshots.clone()
    }

    /// Stop the actor loop.
    pub async fn shutdown(&self) -> Result<(), FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ViewRequest::Shutdown { respond_to })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }
}
