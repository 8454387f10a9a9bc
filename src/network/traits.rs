//! Outbound fetch capability

use async_trait::async_trait;
use thiserror::Error;

/// Failure to obtain a JSON document from a remote endpoint
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection, TLS, timeout or body read failure
    #[error("request failed: {0}")]
    Request(reqwest::Error),

    /// The body arrived but is not JSON
    #[error("invalid JSON body (HTTP {status}): {source}")]
    InvalidJson {
        status: u16,
        #[source]
        source: serde_json::Error,
    },
}

// The request URL carries the API key; it must not reach the error text.
impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Request(err.without_url())
    }
}

/// Anything that can GET a URL and decode the body as JSON.
///
/// The provider's HTTP status is not inspected; any decodable body is a success.
#[async_trait]
pub trait JsonFetcher: Send + Sync {
    async fn fetch_json(&self, url: &str) -> Result<serde_json::Value, FetchError>;
}
