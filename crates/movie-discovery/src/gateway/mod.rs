//! # Fetch Gateway
//!
//! Turns a `(query, page)` pair into one request against the movie metadata API and
//! normalizes whatever comes back into a result list or a [`FetchError`].
//!
//! ## Endpoints
//!
//! | Query | Request |
//! |-------|---------|
//! | non-empty | `{base}/search/movie?query=<encoded>&page=<n>` |
//! | empty | `{base}/discover/movie?page=<n>&sort_by=popularity.desc` |
//!
//! ## Normalization
//!
//! - no response object, transport failure, or a body that is not JSON: `NetworkFailure`;
//! - `"Response": "False"` (with optional `"Error"`) or TMDB's `"success": false` (with
//!   optional `"status_message"`): `ApiReportedFailure`;
//! - otherwise the `results` array; a missing or non-array `results` is an empty list, and
//!   records that fail to decode are skipped.
//!
//! HTTP status codes are not checked: an error status with a normal body is normalized like any
//! other response.

pub mod error;
pub mod mock;
pub mod transport;

pub use error::*;
pub use transport::*;

use crate::config::GatewayConfig;
use crate::model::{encode_uri_component, Movie, PageNumber};
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

#[derive(Clone)]
pub struct FetchGateway {
    config: GatewayConfig,
    transport: Arc<dyn HttpTransport>,
}

impl FetchGateway {
    pub fn new(config: GatewayConfig, transport: Arc<dyn HttpTransport>) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// The endpoint for a query and page.
    pub fn endpoint(&self, query: &str, page: PageNumber) -> String {
        let base = self.config.base_url.trim_end_matches('/');
        if query.is_empty() {
            format!("{base}/discover/movie?page={page}&sort_by=popularity.desc")
        } else {
            format!(
                "{base}/search/movie?query={}&page={page}",
                encode_uri_component(query)
            )
        }
    }

    /// The complete request, headers included.
    pub fn request(&self, query: &str, page: PageNumber) -> HttpRequest {
        HttpRequest {
            url: self.endpoint(query, page),
            headers: vec![
                ("accept".to_string(), "application/json".to_string()),
                (
                    "Authorization".to_string(),
                    format!("Bearer {}", self.config.api_key),
                ),
            ],
        }
    }

    /// Fetch one page of results. Single attempt, no retry.
    #[instrument(skip(self, page), fields(page = %page))]
    pub async fn fetch(&self, query: &str, page: PageNumber) -> Result<Vec<Movie>, FetchError> {
        let request = self.request(query, page);
        debug!(url = %request.url, "Sending request");

        let response = self
            .transport
            .get(request)
            .await
            .map_err(|e| {
                warn!(error = %e, "Transport failed");
                FetchError::from(e)
            })?
            .ok_or_else(|| {
                warn!("No response object");
                FetchError::NetworkFailure("no response received".to_string())
            })?;

        let movies = Self::normalize(&response.body)?;
        info!(status = response.status, count = movies.len(), "Fetched movies");
        Ok(movies)
    }

    /// Map a response body to the result list.
    ///
    /// Top-level fields are read one at a time: a sidecar field of an unexpected type is
    /// ignored and never hides the `results` array.
    pub fn normalize(body: &str) -> Result<Vec<Movie>, FetchError> {
        let value: Value = serde_json::from_str(body)
            .map_err(|e| FetchError::NetworkFailure(format!("response is not JSON: {e}")))?;

        let mut fields = match value {
            Value::Object(fields) => fields,
            other => {
                debug!(kind = json_kind(&other), "Response body is not an object, treating as empty");
                return Ok(Vec::new());
            }
        };

        if Self::reports_failure(&fields) {
            let message = ["Error", "status_message"]
                .iter()
                .find_map(|key| fields.get(*key).and_then(Value::as_str))
                .map(str::to_string);
            warn!(message = ?message, "API reported failure");
            return Err(FetchError::ApiReportedFailure { message });
        }

        let records = match fields.remove("results") {
            Some(Value::Array(records)) => records,
            None | Some(Value::Null) => return Ok(Vec::new()),
            Some(other) => {
                warn!(kind = json_kind(&other), "results is not an array, treating as empty");
                return Ok(Vec::new());
            }
        };

        Ok(records
            .into_iter()
            .filter_map(|record| match serde_json::from_value::<Movie>(record) {
                Ok(movie) => Some(movie),
                Err(e) => {
                    warn!(error = %e, "Skipping undecodable movie record");
                    None
                }
            })
            .collect())
    }

    fn reports_failure(fields: &Map<String, Value>) -> bool {
        let flagged = match fields.get("Response") {
            Some(Value::String(flag)) => flag.eq_ignore_ascii_case("false"),
            Some(Value::Bool(flag)) => !flag,
            _ => false,
        };
        flagged || fields.get("success").and_then(Value::as_bool) == Some(false)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
