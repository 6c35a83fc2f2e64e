//! Error types for the fetch gateway.

use thiserror::Error;

pub const NETWORK_FAILURE_MESSAGE: &str = "Error fetching movies. Please try again.";
pub const API_FAILURE_MESSAGE: &str = "Failed to fetch movies.";

/// Why a fetch produced no result list.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FetchError {
    /// The request did not complete, no response object came back, or the body was not JSON.
    #[error("network failure: {0}")]
    NetworkFailure(String),

    /// The body decoded but the API flagged the request as failed.
    #[error("api reported failure: {}", message.as_deref().unwrap_or("no message"))]
    ApiReportedFailure { message: Option<String> },
}

impl FetchError {
    /// The single line shown in place of the results.
    pub fn user_message(&self) -> String {
        match self {
            FetchError::NetworkFailure(_) => NETWORK_FAILURE_MESSAGE.to_string(),
            FetchError::ApiReportedFailure { message } => message
                .clone()
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| API_FAILURE_MESSAGE.to_string()),
        }
    }
}

/// Failures below the HTTP layer, reported by an [`HttpTransport`](super::HttpTransport).
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TransportError {
    #[error("connection failed: {0}")]
    Connect(String),

    #[error("could not read response body: {0}")]
    Body(String),

    #[error("transport task failed: {0}")]
    Task(String),
}

impl From<TransportError> for FetchError {
    fn from(err: TransportError) -> Self {
        FetchError::NetworkFailure(err.to_string())
    }
}
