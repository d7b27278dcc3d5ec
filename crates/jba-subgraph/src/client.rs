use std::fmt;

use serde::Serialize;
use tracing::debug;

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Errors a [`SubgraphClient`] implementation may return. All are fatal.
#[derive(Debug)]
pub enum TransportError {
    /// Request could not be built or sent, or the connection failed.
    Request(String),
    /// The indexer answered with a non-success HTTP status.
    Status { code: u16, body: String },
    /// The response body could not be read.
    Body(String),
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::Request(msg) => write!(f, "subgraph request failed: {msg}"),
            TransportError::Status { code, body } => {
                write!(f, "subgraph http error status={code}: {body}")
            }
            TransportError::Body(msg) => write!(f, "subgraph response unreadable: {msg}"),
        }
    }
}

impl std::error::Error for TransportError {}

// ---------------------------------------------------------------------------
// Client trait
// ---------------------------------------------------------------------------

/// Synchronous-in-spirit request/response to the indexer: one query in, one
/// raw response body out. Callers await each call before issuing the next.
///
/// Object safe so drivers can take `&dyn SubgraphClient`.
#[async_trait::async_trait]
pub trait SubgraphClient: Send + Sync {
    async fn query(&self, query: &str) -> Result<String, TransportError>;
}

// ---------------------------------------------------------------------------
// HTTP implementation
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct QueryBody<'a> {
    query: &'a str,
}

/// `POST {"query": ...}` to a GraphQL endpoint.
///
/// The endpoint may embed an API key, so it is never logged.
#[derive(Clone)]
pub struct HttpSubgraphClient {
    http: reqwest::Client,
    endpoint: String,
}

impl fmt::Debug for HttpSubgraphClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpSubgraphClient")
            .field("endpoint", &"<REDACTED>")
            .finish()
    }
}

impl HttpSubgraphClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait::async_trait]
impl SubgraphClient for HttpSubgraphClient {
    async fn query(&self, query: &str) -> Result<String, TransportError> {
        let resp = self
            .http
            .post(&self.endpoint)
            .json(&QueryBody { query })
            .send()
            .await
            .map_err(|e| TransportError::Request(e.without_url().to_string()))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| TransportError::Body(e.without_url().to_string()))?;
        debug!(status = status.as_u16(), bytes = body.len(), "subgraph response");

        if !status.is_success() {
            return Err(TransportError::Status {
                code: status.as_u16(),
                body: truncate(&body, 512),
            });
        }
        Ok(body)
    }
}

fn truncate(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => format!("{}...", &s[..idx]),
        None => s.to_string(),
    }
}
