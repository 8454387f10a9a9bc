//! HTTP networking module
//!
//! Provides the outbound capability used to reach the search provider.

mod client;
mod traits;

pub use client::HttpClient;
pub use traits::{FetchError, JsonFetcher};
