//! # Mock Transport
//!
//! An in-memory [`HttpTransport`] for tests. Responses are scripted in order with a fluent
//! builder, each optionally delayed (pair with `#[tokio::test(start_paused = true)]` to
//! stage out-of-order completions), and every request is recorded.
//!
//! ```ignore
//! let transport = MockTransport::new();
//! transport.expect_get().respond_json(json!({ "results": [] }));
//! transport.expect_get().after(Duration::from_millis(300)).respond_none();
//!
//! let gateway = FetchGateway::new(config, Arc::new(transport.clone()));
//! // ...
//! assert_eq!(transport.requests().len(), 2);
//! transport.verify();
//! ```
//!
//! When no scripted response is left, a request gets an empty `{"results": []}` page, so tests
//! that only count requests do not need to script every one.

use crate::gateway::{HttpRequest, HttpResponse, HttpTransport, TransportError};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

type Reply = Result<Option<HttpResponse>, TransportError>;

struct Scripted {
    delay: Duration,
    reply: Reply,
}

#[derive(Clone, Default)]
pub struct MockTransport {
    script: Arc<Mutex<VecDeque<Scripted>>>,
    requests: Arc<Mutex<Vec<HttpRequest>>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scripts the next response.
    pub fn expect_get(&self) -> ResponseBuilder {
        ResponseBuilder {
            script: self.script.clone(),
            delay: Duration::ZERO,
        }
    }

    /// Every request seen so far, in arrival order.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// URLs of every request seen so far.
    pub fn urls(&self) -> Vec<String> {
        self.requests().into_iter().map(|r| r.url).collect()
    }

    /// Panics if scripted responses were never consumed.
    pub fn verify(&self) {
        let remaining = self.script.lock().unwrap().len();
        if remaining != 0 {
            panic!("Not all scripted responses were used. {remaining} remaining");
        }
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn get(&self, request: HttpRequest) -> Result<Option<HttpResponse>, TransportError> {
        self.requests.lock().unwrap().push(request);
        let next = self.script.lock().unwrap().pop_front();
        match next {
            Some(Scripted { delay, reply }) => {
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                reply
            }
            None => Ok(Some(HttpResponse {
                status: 200,
                body: r#"{"results":[]}"#.to_string(),
            })),
        }
    }
}

/// Builder for one scripted response.
pub struct ResponseBuilder {
    script: Arc<Mutex<VecDeque<Scripted>>>,
    delay: Duration,
}

impl ResponseBuilder {
    /// Holds the response back for `delay`.
    pub fn after(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn respond(self, status: u16, body: impl Into<String>) {
        self.push(Ok(Some(HttpResponse {
            status,
            body: body.into(),
        })));
    }

    /// A 200 response with `value` as its body.
    pub fn respond_json(self, value: serde_json::Value) {
        self.respond(200, value.to_string());
    }

    /// The call completes without a response object.
    pub fn respond_none(self) {
        self.push(Ok(None));
    }

    pub fn fail(self, error: TransportError) {
        self.push(Err(error));
    }

    fn push(self, reply: Reply) {
        self.script.lock().unwrap().push_back(Scripted {
            delay: self.delay,
            reply,
        });
    }
}
