//! Search proxy
//!
//! Validates an inbound search invocation, forwards it to the configured
//! provider and translates the outcome into a status code and JSON body.

mod error;
mod handler;
mod models;

pub use error::ProxyError;
pub use handler::{build_search_url, handle, search};
pub use models::{ProxyResponse, SearchRequest};
