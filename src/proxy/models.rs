//! Inbound and outbound shapes of a proxy invocation

use super::error::ProxyError;
use serde_json::{json, Value};
use std::collections::HashMap;

/// Query-string parameters of one inbound invocation
#[derive(Debug, Clone, Default)]
pub struct SearchRequest {
    params: HashMap<String, String>,
}

impl SearchRequest {
    pub fn new(params: HashMap<String, String>) -> Self {
        Self { params }
    }

    /// Request carrying only `q`
    pub fn with_query(query: impl Into<String>) -> Self {
        let mut params = HashMap::new();
        params.insert("q".to_string(), query.into());
        Self { params }
    }

    /// The search term, if present and non-empty
    pub fn query(&self) -> Option<&str> {
        self.params
            .get("q")
            .map(String::as_str)
            .filter(|q| !q.is_empty())
    }
}

/// Status code and JSON body produced for one invocation
#[derive(Debug, Clone, PartialEq)]
pub struct ProxyResponse {
    pub status: u16,
    pub body: Value,
}

impl ProxyResponse {
    pub fn ok(body: Value) -> Self {
        Self { status: 200, body }
    }

    /// JSON-encoded body text
    pub fn body_text(&self) -> String {
        self.body.to_string()
    }
}

impl From<ProxyError> for ProxyResponse {
    fn from(err: ProxyError) -> Self {
        Self {
            status: err.status(),
            body: json!({ "error": err.to_string() }),
        }
    }
}
