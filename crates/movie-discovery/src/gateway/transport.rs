//! The HTTP seam under the gateway.
//!
//! The gateway only needs "GET this URL with these headers and give me the body, if any".
//! Keeping that behind [`HttpTransport`] lets tests script responses and delays with
//! [`MockTransport`](super::mock::MockTransport) while production uses `ureq`.

use crate::gateway::TransportError;
use async_trait::async_trait;
use tracing::{debug, instrument};

#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
}

impl HttpRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

#[async_trait]
pub trait HttpTransport: Send + Sync + 'static {
    /// Perform a GET. `Ok(None)` means the call returned without a response object.
    ///
    /// Non-success statuses are still responses; judging them is the caller's business.
    async fn get(&self, request: HttpRequest) -> Result<Option<HttpResponse>, TransportError>;
}

/// Blocking `ureq` client run on tokio's blocking pool.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl UreqTransport {
    pub fn new() -> Self {
        Self {
            agent: ureq::AgentBuilder::new().build(),
        }
    }

    pub fn with_agent(agent: ureq::Agent) -> Self {
        Self { agent }
    }
}

#[async_trait]
impl HttpTransport for UreqTransport {
    #[instrument(skip(self, request), fields(url = %request.url))]
    async fn get(&self, request: HttpRequest) -> Result<Option<HttpResponse>, TransportError> {
        let agent = self.agent.clone();
        tokio::task::spawn_blocking(move || {
            let mut call = agent.get(&request.url);
            for (name, value) in &request.headers {
                call = call.set(name, value);
            }

            let response = match call.call() {
                Ok(response) => response,
                Err(ureq::Error::Status(_, response)) => response,
                Err(ureq::Error::Transport(err)) => {
                    return Err(TransportError::Connect(err.to_string()))
                }
            };

            let status = response.status();
            let body = response
                .into_string()
                .map_err(|e| TransportError::Body(e.to_string()))?;
            debug!(status, bytes = body.len(), "Response received");
            Ok(Some(HttpResponse { status, body }))
        })
        .await
        .map_err(|e| TransportError::Task(e.to_string()))?
    }
}
