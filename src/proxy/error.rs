//! Caller-facing proxy errors

use crate::network::FetchError;
use thiserror::Error;

/// Terminal failure of a search invocation.
///
/// `Display` is exactly the message returned to the caller, so upstream
/// details stay in the `source` chain.
#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("Search query is required.")]
    MissingQuery,

    #[error("API key or CX is not configured.")]
    NotConfigured,

    #[error("Failed to fetch search results.")]
    Upstream(#[from] FetchError),
}

impl ProxyError {
    /// HTTP status code reported to the caller
    pub fn status(&self) -> u16 {
        match self {
            ProxyError::MissingQuery => 400,
            ProxyError::NotConfigured | ProxyError::Upstream(_) => 500,
        }
    }
}
