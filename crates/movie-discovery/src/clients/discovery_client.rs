//! # Discovery Client
//!
//! Provides a high-level API for driving the query controller.
//! It wraps a `ViewClient<QueryController>` and exposes one method per user action.
use crate::clients::actor_client::ActorClient;
use crate::model::UrlParams;
use crate::query_actor::{QueryController, QueryError, QueryIntent};
use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, instrument};
use view_actor::{FrameworkError, ViewClient};

/// Errors surfaced to callers of [`DiscoveryClient`].
#[derive(Debug, Clone, Error, PartialEq)]
pub enum DiscoveryError {
    /// The controller rejected a navigation step.
    #[error("Navigation failed: {0}")]
    Navigation(QueryError),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for DiscoveryError {
    fn from(msg: String) -> Self {
        DiscoveryError::ActorCommunicationError(msg)
    }
}

/// Client for interacting with the query controller.
#[derive(Clone)]
pub struct DiscoveryClient {
    inner: ViewClient<QueryController>,
}

impl DiscoveryClient {
    pub fn new(inner: ViewClient<QueryController>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<QueryController> for DiscoveryClient {
    type Error = DiscoveryError;

    fn inner(&self) -> &ViewClient<QueryController> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.downcast_model::<QueryError>() {
            Some(query_error) => DiscoveryError::Navigation(query_error.clone()),
            None => DiscoveryError::ActorCommunicationError(e.to_string()),
        }
    }
}

impl DiscoveryClient {
    /// Replace the search box contents. The search runs once typing pauses.
    #[instrument(skip(self))]
    pub async fn input(&self, text: &str) -> Result<(), DiscoveryError> {
        self.send(QueryIntent::Input(text.to_string())).await
    }

    #[instrument(skip(self))]
    pub async fn next_page(&self) -> Result<(), DiscoveryError> {
        self.change_page(1).await
    }

    /// Go back one page. Does nothing on the first page.
    #[instrument(skip(self))]
    pub async fn previous_page(&self) -> Result<(), DiscoveryError> {
        self.change_page(-1).await
    }

    #[instrument(skip(self))]
    pub async fn change_page(&self, delta: i64) -> Result<(), DiscoveryError> {
        self.send(QueryIntent::ChangePage(delta)).await
    }

    /// Fails with [`QueryError::NoHistoryEntry`] on the first entry.
    #[instrument(skip(self))]
    pub async fn back(&self) -> Result<(), DiscoveryError> {
        self.send(QueryIntent::Back).await
    }

    #[instrument(skip(self))]
    pub async fn forward(&self) -> Result<(), DiscoveryError> {
        self.send(QueryIntent::Forward).await
    }

    /// Navigate to a URL (full URL or query string), adding a history entry.
    #[instrument(skip(self))]
    pub async fn open(&self, url: &str) -> Result<(), DiscoveryError> {
        self.send(QueryIntent::Open(url.to_string())).await
    }

    /// Report a URL change the environment already performed.
    #[instrument(skip(self))]
    pub async fn url_changed(&self, params: UrlParams) -> Result<(), DiscoveryError> {
        self.send(QueryIntent::UrlChanged(params)).await
    }

    async fn send(&self, intent: QueryIntent) -> Result<(), DiscoveryError> {
        debug!(?intent, "Sending request");
        self.inner.dispatch(intent).await.map_err(Self::map_error)
    }
}
