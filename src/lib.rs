//! search-proxy: a pass-through proxy for the Google Custom Search JSON API
//!
//! A single handler validates the `q` parameter and the provider secrets,
//! forwards the query upstream and hands the provider's JSON back unchanged.

pub mod config;
pub mod network;
pub mod proxy;
pub mod web;

pub use config::Settings;
pub use network::{HttpClient, JsonFetcher};
pub use proxy::{ProxyError, ProxyResponse, SearchRequest};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
