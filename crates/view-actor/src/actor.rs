//! # Generic Actor Server
//!
//! This module defines the `ViewActor`, the task that owns a [`ViewModel`] and applies its
//! intents one at a time. It is the "Server" side of the actor: the only place the model is
//! ever mutated.

use crate::client::ViewClient;
use crate::error::FrameworkError;
use crate::message::ViewRequest;
use crate::model::ViewModel;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

/// The generic actor that drives one view model.
///
/// # Architecture Note
/// The actor owns the model and the receiver end of the mailbox. Because it processes one
/// request at a time, the model needs neither `Mutex` nor `RwLock`. After every request the
/// actor publishes `model.snapshot()` on a `watch` channel so observers always see the state
/// that followed the last applied intent.
///
/// # Usage Pattern
///
/// 1. **Create**: `ViewActor::new(model, capacity)` returns the actor and its client.
/// 2. **Wire**: build the context (often containing `client.clone()`).
/// 3. **Run**: spawn `actor.run(context)`.
///
/// ```rust
/// use async_trait::async_trait;
/// use view_actor::{ViewActor, ViewModel};
///
/// #[derive(Default)]
/// struct Counter { value: i64 }
///
/// #[derive(Debug)]
/// enum CounterIntent { Add(i64) }
///
/// #[derive(Debug, thiserror::Error)]
/// #[error("counter error")]
/// struct CounterError;
///
/// #[async_trait]
/// impl ViewModel for Counter {
///     type Intent = CounterIntent;
///     type Snapshot = i64;
///     type Context = ();
///     type Error = CounterError;
///
///     async fn handle_intent(&mut self, intent: CounterIntent, _: &()) -> Result<(), CounterError> {
///         match intent { CounterIntent::Add(n) => self.value += n }
///         Ok(())
///     }
///
///     fn snapshot(&self) -> i64 { self.value }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let (actor, client) = ViewActor::new(Counter::default(), 8);
///     let handle = tokio::spawn(actor.run(()));
///
///     client.dispatch(CounterIntent::Add(2)).await.unwrap();
///     assert_eq!(client.snapshot().await.unwrap(), 2);
///
///     client.shutdown().await.unwrap();
///     handle.await.unwrap();
/// }
/// ```
pub struct ViewActor<T: ViewModel> {
    receiver: mpsc::Receiver<ViewRequest<T>>,
    model: T,
    publisher: watch::Sender<T::Snapshot>,
}

impl<T: ViewModel> ViewActor<T> {
    /// Creates a new `ViewActor` and its associated `ViewClient`.
    ///
    /// # Arguments
    ///
    /// * `model` - The initial state. Its snapshot is published immediately.
    /// * `buffer_size` - Capacity of the mailbox. When full, senders wait.
    pub fn new(model: T, buffer_size: usize) -> (Self, ViewClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let (publisher, snapshots) = watch::channel(model.snapshot());
        let actor = Self {
            receiver,
            model,
            publisher,
        };
        let client = ViewClient::new(sender, snapshots);
        (actor, client)
    }

    /// Runs the actor's event loop until a `Shutdown` request arrives or every client
    /// has been dropped.
    ///
    /// # Context Injection
    /// The `context` argument is handed to every hook. It is built after `new()`, so it
    /// may contain clones of this actor's own client.
    pub async fn run(mut self, context: T::Context) {
        let model_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(model_type, "Actor started");

        if let Err(e) = self.model.on_start(&context).await {
            warn!(model_type, error = %e, "on_start failed");
        }
        self.publish();

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ViewRequest::Dispatch { intent, respond_to } => {
                    debug!(model_type, ?intent, "Dispatch");
                    let result = self
                        .model
                        .handle_intent(intent, &context)
                        .await
                        .map_err(|e| {
                            warn!(model_type, error = %e, "Intent failed");
                            FrameworkError::ModelError(Box::new(e))
                        });
                    self.publish();
                    let _ = respond_to.send(result);
                }
                ViewRequest::Notify { intent } => {
                    debug!(model_type, ?intent, "Notify");
                    if let Err(e) = self.model.handle_intent(intent, &context).await {
                        warn!(model_type, error = %e, "Notified intent failed");
                    }
                    self.publish();
                }
                ViewRequest::Snapshot { respond_to } => {
                    let _ = respond_to.send(Ok(self.model.snapshot()));
                }
                ViewRequest::Shutdown { respond_to } => {
                    info!(model_type, "Shutdown requested");
                    self.model.on_stop(&context).await;
                    let _ = respond_to.send(Ok(()));
                    return;
                }
            }
        }

        self.model.on_stop(&context).await;
        info!(model_type, "Shutdown");
    }

    fn publish(&self) {
        // send_replace never fails, even with no subscribers left
        self.publisher.send_replace(self.model.snapshot());
    }
}
