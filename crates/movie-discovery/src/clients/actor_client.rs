use async_trait::async_trait;
use tokio::sync::watch;
use view_actor::{FrameworkError, ViewClient, ViewModel};

/// Trait for view-specific clients to inherit the operations every view supports.
///
/// Implementors supply the inner [`ViewClient`] and an error mapping; reading snapshots,
/// subscribing and stopping the actor come for free.
#[async_trait]
pub trait ActorClient<T: ViewModel>: Send + Sync {
    /// The view-specific error type.
    type Error: From<String> + Send + Sync;

    /// Access the inner generic ViewClient.
    fn inner(&self) -> &ViewClient<T>;

    /// Map framework errors to the view-specific error type.
    fn map_error(e: FrameworkError) -> Self::Error;

    /// Read the current snapshot through the mailbox.
    #[tracing::instrument(skip(self))]
    async fn snapshot(&self) -> Result<T::Snapshot, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().snapshot().await.map_err(Self::map_error)
    }

    /// Follow published snapshots.
    fn subscribe(&self) -> watch::Receiver<T::Snapshot> {
        self.inner().subscribe()
    }

    /// Stop the actor loop.
    #[tracing::instrument(skip(self))]
    async fn shutdown(&self) -> Result<(), Self::Error> {
        tracing::debug!("Sending request");
        self.inner().shutdown().await.map_err(Self::map_error)
    }
}
