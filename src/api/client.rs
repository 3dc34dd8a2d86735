//! HTTP client for the natural-language query endpoint. The server owns
//! query translation and execution; this side only posts text and interprets
//! the response envelope.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::Record;

#[derive(Debug, Serialize)]
struct QueryRequest<'a> {
    query: &'a str,
}

#[derive(Debug, Serialize)]
struct SuggestRequest<'a> {
    input: &'a str,
}

/// The `/api/query` response envelope. A failure body carries `error`; a
/// success body carries `data`, usually `sql_query`, and occasionally a
/// `note` when the server fell back to a degraded execution path.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QueryResponse {
    pub success: bool,
    #[serde(default)]
    pub data: Option<Vec<Record>>,
    #[serde(default)]
    pub sql_query: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
}

/// The seam between the controller and the network. The production
/// implementation is [`ApiClient`]; tests drive the controller through
/// [`crate::api::MockBackend`].
#[allow(async_fn_in_trait)]
pub trait QueryBackend {
    /// Post one query and return the parsed envelope. A non-2xx status is an
    /// error regardless of the body's `success` flag.
    async fn run_query(&self, query: &str) -> Result<QueryResponse>;

    /// Ask the server for query suggestions seeded by partial input.
    async fn suggest(&self, input: &str) -> Result<Vec<String>>;
}

/// `reqwest`-backed client. No request timeout is configured; an unresponsive
/// server stalls the in-flight query indefinitely, matching the observed
/// behavior of the page this replaces.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        ApiClient {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl QueryBackend for ApiClient {
    async fn run_query(&self, query: &str) -> Result<QueryResponse> {
        log::info!("posting query: {}", query);

        let response = self
            .http
            .post(self.url("/api/query"))
            .json(&QueryRequest { query })
            .send()
            .await
            .map_err(|e| Error::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            // Prefer the server's own message when the error body parses.
            let message = response
                .json::<QueryResponse>()
                .await
                .ok()
                .and_then(|body| body.error)
                .unwrap_or_else(|| format!("HTTP error: status {}", status));
            return Err(Error::Http(message));
        }

        response
            .json::<QueryResponse>()
            .await
            .map_err(|e| Error::Http(format!("invalid response body: {}", e)))
    }

    async fn suggest(&self, input: &str) -> Result<Vec<String>> {
        let response = self
            .http
            .post(self.url("/api/suggest"))
            .json(&SuggestRequest { input })
            .send()
            .await
            .map_err(|e| Error::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Http(format!("HTTP error: status {}", status)));
        }

        response
            .json::<Vec<String>>()
            .await
            .map_err(|e| Error::Http(format!("invalid response body: {}", e)))
    }
}
