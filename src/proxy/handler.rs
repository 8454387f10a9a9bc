//! Search proxy handler

use super::error::ProxyError;
use super::models::{ProxyResponse, SearchRequest};
use crate::config::{Credentials, ProviderSettings};
use crate::network::JsonFetcher;
use serde_json::Value;
use tracing::{debug, error, warn};

/// Build the provider URL for `query`. Every value is percent-encoded.
pub fn build_search_url(base_url: &str, credentials: Credentials<'_>, query: &str) -> String {
    format!(
        "{}?key={}&cx={}&q={}",
        base_url,
        urlencoding::encode(credentials.api_key),
        urlencoding::encode(credentials.cx),
        urlencoding::encode(query)
    )
}

/// Validate `request` and fetch the provider's raw payload.
///
/// A missing query is reported before missing configuration. Neither guard
/// touches the network.
pub async fn search(
    request: &SearchRequest,
    provider: &ProviderSettings,
    fetcher: &dyn JsonFetcher,
) -> Result<Value, ProxyError> {
    let query = request.query().ok_or(ProxyError::MissingQuery)?;
    let credentials = provider.credentials().ok_or(ProxyError::NotConfigured)?;

    let url = build_search_url(&provider.base_url, credentials, query);
    debug!("Forwarding query '{}' to {}", query, provider.base_url);

    Ok(fetcher.fetch_json(&url).await?)
}

/// Run one invocation to completion.
pub async fn handle(
    request: &SearchRequest,
    provider: &ProviderSettings,
    fetcher: &dyn JsonFetcher,
) -> ProxyResponse {
    match search(request, provider, fetcher).await {
        Ok(payload) => ProxyResponse::ok(payload),
        Err(err) => {
            match &err {
                ProxyError::MissingQuery => {}
                ProxyError::NotConfigured => {
                    warn!("Rejecting search: GOOGLE_API_KEY or GOOGLE_CX is not set")
                }
                ProxyError::Upstream(source) => {
                    error!("Error fetching search results: {}", source)
                }
            }
            err.into()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::FetchError;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    enum Reply {
        Json(Value),
        NotJson,
    }

    /// Fetcher returning a canned reply and recording requested URLs
    struct FakeFetcher {
        reply: Reply,
        urls: Mutex<Vec<String>>,
    }

    impl FakeFetcher {
        fn json(value: Value) -> Self {
            Self {
                reply: Reply::Json(value),
                urls: Mutex::new(Vec::new()),
            }
        }

        fn not_json() -> Self {
            Self {
                reply: Reply::NotJson,
                urls: Mutex::new(Vec::new()),
            }
        }

        fn urls(&self) -> Vec<String> {
            self.urls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl JsonFetcher for FakeFetcher {
        async fn fetch_json(&self, url: &str) -> Result<Value, FetchError> {
            self.urls.lock().unwrap().push(url.to_string());
            match &self.reply {
                Reply::Json(value) => Ok(value.clone()),
                Reply::NotJson => Err(FetchError::InvalidJson {
                    status: 200,
                    source: serde_json::from_str::<Value>("<html>").unwrap_err(),
                }),
            }
        }
    }

    fn provider() -> ProviderSettings {
        ProviderSettings::new("test-key", "test-cx").with_base_url("https://search.test/v1")
    }

    #[tokio::test]
    async fn test_missing_query_is_bad_request() {
        let fetcher = FakeFetcher::json(json!({}));

        for request in [SearchRequest::default(), SearchRequest::with_query("")] {
            let response = handle(&request, &provider(), &fetcher).await;
            assert_eq!(response.status, 400);
            assert_eq!(response.body, json!({"error": "Search query is required."}));
        }
        assert!(fetcher.urls().is_empty());
    }

    #[tokio::test]
    async fn test_missing_query_wins_over_missing_config() {
        let fetcher = FakeFetcher::json(json!({}));
        let response = handle(
            &SearchRequest::default(),
            &ProviderSettings::default(),
            &fetcher,
        )
        .await;

        assert_eq!(response.status, 400);
    }

    #[tokio::test]
    async fn test_missing_config_is_server_error() {
        let fetcher = FakeFetcher::json(json!({}));
        let request = SearchRequest::with_query("cats");

        let mut no_key = provider();
        no_key.api_key = None;
        let mut no_cx = provider();
        no_cx.cx = None;
        let mut empty_cx = provider();
        empty_cx.cx = Some(String::new());

        for settings in [no_key, no_cx, empty_cx] {
            let response = handle(&request, &settings, &fetcher).await;
            assert_eq!(response.status, 500);
            assert_eq!(
                response.body_text(),
                r#"{"error":"API key or CX is not configured."}"#
            );
        }
        assert!(fetcher.urls().is_empty());
    }

    #[tokio::test]
    async fn test_success_passes_payload_through() {
        let payload = json!({"items": [{"title": "Cat facts"}]});
        let fetcher = FakeFetcher::json(payload.clone());

        let response = handle(&SearchRequest::with_query("cats"), &provider(), &fetcher).await;

        assert_eq!(response.status, 200);
        assert_eq!(response.body_text(), r#"{"items":[{"title":"Cat facts"}]}"#);
        assert_eq!(
            fetcher.urls(),
            vec!["https://search.test/v1?key=test-key&cx=test-cx&q=cats".to_string()]
        );
    }

    #[tokio::test]
    async fn test_provider_error_payload_is_still_ok() {
        let payload = json!({"error": {"code": 429, "message": "Quota exceeded"}});
        let fetcher = FakeFetcher::json(payload.clone());

        let response = handle(&SearchRequest::with_query("cats"), &provider(), &fetcher).await;

        assert_eq!(response, ProxyResponse::ok(payload));
    }

    #[tokio::test]
    async fn test_fetch_failure_hides_detail() {
        let fetcher = FakeFetcher::not_json();

        let response = handle(&SearchRequest::with_query("cats"), &provider(), &fetcher).await;

        assert_eq!(response.status, 500);
        assert_eq!(
            response.body,
            json!({"error": "Failed to fetch search results."})
        );
        assert_eq!(fetcher.urls().len(), 1);
    }

    #[tokio::test]
    async fn test_query_is_percent_encoded() {
        let fetcher = FakeFetcher::json(json!({}));

        handle(
            &SearchRequest::with_query("foo bar&baz"),
            &provider(),
            &fetcher,
        )
        .await;

        let urls = fetcher.urls();
        assert_eq!(urls.len(), 1);
        assert!(urls[0].ends_with("&q=foo%20bar%26baz"));
        assert!(!urls[0].contains("foo bar"));
    }

    #[tokio::test]
    async fn test_repeated_requests_are_identical() {
        let fetcher = FakeFetcher::json(json!({"items": [{"title": "Cat facts"}]}));
        let request = SearchRequest::with_query("cats");

        let first = handle(&request, &provider(), &fetcher).await;
        let second = handle(&request, &provider(), &fetcher).await;

        assert_eq!(first, second);
        assert_eq!(first.status, 200);
        assert_eq!(fetcher.urls().len(), 2);
    }

    #[test]
    fn test_build_search_url_encodes_credentials() {
        let settings = ProviderSettings::new("k+y", "a:b");
        let url = build_search_url(
            &settings.base_url,
            settings.credentials().unwrap(),
            "rust",
        );
        assert_eq!(
            url,
            "https://www.googleapis.com/customsearch/v1?key=k%2By&cx=a%3Ab&q=rust"
        );
    }

    #[tokio::test]
    async fn test_end_to_end_against_mock_provider() {
        use crate::network::HttpClient;
        use wiremock::matchers::{method, path, query_param};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/customsearch/v1"))
            .and(query_param("key", "test-key"))
            .and(query_param("cx", "test-cx"))
            .and(query_param("q", "foo bar&baz"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
            .expect(1)
            .mount(&server)
            .await;

        let settings = ProviderSettings::new("test-key", "test-cx")
            .with_base_url(format!("{}/customsearch/v1", server.uri()));
        let client = HttpClient::new().unwrap();

        let response = handle(&SearchRequest::with_query("foo bar&baz"), &settings, &client).await;

        assert_eq!(response, ProxyResponse::ok(json!({"items": []})));
    }

    /// In-memory sink for captured log output
    #[derive(Clone, Default)]
    struct LogBuffer(std::sync::Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl LogBuffer {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    #[tokio::test]
    async fn test_upstream_failure_is_logged_without_key() {
        use crate::network::HttpClient;

        let logs = LogBuffer::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let settings = ProviderSettings::new("SECRETKEY123", "test-cx")
            .with_base_url(format!("http://{}/v1", listener.local_addr().unwrap()));
        drop(listener);
        let client = HttpClient::new().unwrap();

        let response = handle(&SearchRequest::with_query("cats"), &settings, &client).await;

        assert_eq!(
            response.body_text(),
            r#"{"error":"Failed to fetch search results."}"#
        );
        let output = logs.contents();
        assert!(output.contains("Error fetching search results: request failed"));
        assert!(!output.contains("SECRETKEY123"));
    }
}
