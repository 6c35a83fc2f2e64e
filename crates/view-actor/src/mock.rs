//! # Mock Framework
//!
//! Utilities for testing code that talks to a [`ViewClient`] without running the real model.
//!
//! | Feature | MockClient | Real Actor |
//! |---------|------------|------------|
//! | **Speed** | Instant (in-memory) | Fast (but involves tokio spawn) |
//! | **State** | No real state (expectations) | Real view model |
//! | **Use Case** | Testing client wrappers and renderers | Testing the model itself |
//! | **Error Injection** | Easy (`return_err`) | Needs a model that fails |
//!
//! Two styles are available:
//!
//! - [`MockClient`]: queue expectations (`expect_dispatch().return_ok()`), run the code under
//!   test, then call [`MockClient::verify`]. Dispatched intents are recorded for inspection.
//! - [`create_mock_client`] + [`expect_dispatch`]: receive the raw request and answer it by
//!   hand, which is useful when the test wants to control *when* the reply arrives.

use crate::client::ViewClient;
use crate::error::FrameworkError;
use crate::message::ViewRequest;
use crate::model::ViewModel;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot, watch};

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

enum Expectation<T: ViewModel> {
    Dispatch {
        response: Result<(), FrameworkError>,
    },
    Snapshot {
        response: Result<T::Snapshot, FrameworkError>,
    },
}

/// A mock client with expectation tracking for fluent testing.
///
/// # Example
/// ```ignore
/// let mut mock = MockClient::<QueryController>::new();
/// mock.expect_dispatch().return_ok();
///
/// let client = DiscoveryClient::new(mock.client());
/// client.next_page().await?;
///
/// mock.verify();
/// assert!(matches!(mock.received()[0], Intent::ChangePage(1)));
/// ```
pub struct MockClient<T: ViewModel> {
    client: ViewClient<T>,
    expectations: Arc<Mutex<VecDeque<Expectation<T>>>>,
    received: Arc<Mutex<Vec<T::Intent>>>,
    publisher: watch::Sender<T::Snapshot>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: ViewModel> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ViewModel> MockClient<T> {
    /// Creates a new mock client with no expectations.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ViewRequest<T>>(100);
        let (publisher, snapshots) = watch::channel(T::Snapshot::default());
        let expectations = Arc::new(Mutex::new(VecDeque::new()));
        let received = Arc::new(Mutex::new(Vec::new()));
        let expectations_clone = expectations.clone();
        let received_clone = received.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = expectations_clone.lock().unwrap().pop_front();

                match (request, expectation) {
                    (
                        ViewRequest::Dispatch { intent, respond_to },
                        Some(Expectation::Dispatch { response }),
                    ) => {
                        received_clone.lock().unwrap().push(intent);
                        let _ = respond_to.send(response);
                    }
                    (ViewRequest::Notify { intent }, Some(Expectation::Dispatch { .. })) => {
                        received_clone.lock().unwrap().push(intent);
                    }
                    (
                        ViewRequest::Snapshot { respond_to },
                        Some(Expectation::Snapshot { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (ViewRequest::Shutdown { respond_to }, _) => {
                        let _ = respond_to.send(Ok(()));
                        return;
                    }
                    _ => {
                        panic!("Unexpected request or expectation mismatch");
                    }
                }
            }
        });

        Self {
            client: ViewClient::new(sender, snapshots),
            expectations,
            received,
            publisher,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> ViewClient<T> {
        self.client.clone()
    }

    /// Expects a `dispatch` (or `notify`) request.
    pub fn expect_dispatch(&mut self) -> DispatchExpectationBuilder<T> {
        DispatchExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    /// Expects a `snapshot` request.
    pub fn expect_snapshot(&mut self) -> SnapshotExpectationBuilder<T> {
        SnapshotExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    /// Pushes a snapshot to every subscriber of the mock client.
    pub fn publish(&self, snapshot: T::Snapshot) {
        self.publisher.send_replace(snapshot);
    }

    /// Drains the intents received so far.
    pub fn received(&self) -> Vec<T::Intent> {
        std::mem::take(&mut *self.received.lock().unwrap())
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let exps = self.expectations.lock().unwrap();
        if !exps.is_empty() {
            panic!("Not all expectations were met. {} remaining", exps.len());
        }
    }
}

/// Builder for `dispatch` expectations.
pub struct DispatchExpectationBuilder<T: ViewModel> {
    expectations: Arc<Mutex<VecDeque<Expectation<T>>>>,
}

impl<T: ViewModel> DispatchExpectationBuilder<T> {
    pub fn return_ok(self) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::Dispatch { response: Ok(()) });
    }

    pub fn return_err(self, error: FrameworkError) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::Dispatch {
                response: Err(error),
            });
    }
}

/// Builder for `snapshot` expectations.
pub struct SnapshotExpectationBuilder<T: ViewModel> {
    expectations: Arc<Mutex<VecDeque<Expectation<T>>>>,
}

impl<T: ViewModel> SnapshotExpectationBuilder<T> {
    pub fn return_ok(self, snapshot: T::Snapshot) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::Snapshot {
                response: Ok(snapshot),
            });
    }

    pub fn return_err(self, error: FrameworkError) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::Snapshot {
                response: Err(error),
            });
    }
}

// =============================================================================
// CHANNEL HELPERS
// =============================================================================

/// Creates a client whose requests land on a receiver the test controls.
pub fn create_mock_client<T: ViewModel>(
    buffer_size: usize,
) -> (ViewClient<T>, mpsc::Receiver<ViewRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    let (_publisher, snapshots) = watch::channel(T::Snapshot::default());
    (ViewClient::new(sender, snapshots), receiver)
}

/// Helper to verify that the next message is a Dispatch request.
pub async fn expect_dispatch<T: ViewModel>(
    receiver: &mut mpsc::Receiver<ViewRequest<T>>,
) -> Option<(T::Intent, oneshot::Sender<Result<(), FrameworkError>>)> {
    match receiver.recv().await {
        Some(ViewRequest::Dispatch { intent, respond_to }) => Some((intent, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Snapshot request.
pub async fn expect_snapshot<T: ViewModel>(
    receiver: &mut mpsc::Receiver<ViewRequest<T>>,
) -> Option<oneshot::Sender<Result<T::Snapshot, FrameworkError>>> {
    match receiver.recv().await {
        Some(ViewRequest::Snapshot { respond_to }) => Some(respond_to),
        _ => None,
    }
}
