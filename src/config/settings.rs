//! Settings structures for search-proxy configuration

use anyhow::Result;
use serde::Deserialize;
use std::path::Path;

/// Default Google Custom Search JSON API endpoint
pub const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/customsearch/v1";

/// Main settings structure
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub provider: ProviderSettings,
    pub outgoing: OutgoingSettings,
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let settings: Settings = serde_yaml::from_str(&content)?;
        Ok(settings)
    }

    /// Merge with process environment variables
    pub fn merge_env(&mut self) {
        self.merge_from(|key| std::env::var(key).ok());
    }

    /// Merge with variables resolved through `lookup`
    pub fn merge_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("GOOGLE_API_KEY") {
            self.provider.api_key = Some(val);
        }
        if let Some(val) = lookup("GOOGLE_CX") {
            self.provider.cx = Some(val);
        }
        if let Some(val) = lookup("SEARCH_PROXY_BASE_URL") {
            self.provider.base_url = val;
        }
        if let Some(val) = lookup("SEARCH_PROXY_PORT") {
            if let Ok(port) = val.parse() {
                self.server.port = port;
            }
        }
        if let Some(val) = lookup("SEARCH_PROXY_BIND_ADDRESS") {
            self.server.bind_address = val;
        }
    }
}

/// Server settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Server port
    pub port: u16,
    /// Bind address
    pub bind_address: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            port: 8888,
            bind_address: "127.0.0.1".to_string(),
        }
    }
}

/// Search provider settings
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct ProviderSettings {
    /// Endpoint the query is forwarded to
    pub base_url: String,
    /// Google API key
    pub api_key: Option<String>,
    /// Custom Search engine identifier
    pub cx: Option<String>,
}

impl ProviderSettings {
    /// Create provider settings with both secrets set
    pub fn new(api_key: impl Into<String>, cx: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            cx: Some(cx.into()),
            ..Default::default()
        }
    }

    /// Point the provider at another endpoint
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Both secrets, or `None` if either is unset or empty
    pub fn credentials(&self) -> Option<Credentials<'_>> {
        let api_key = self.api_key.as_deref().filter(|k| !k.is_empty())?;
        let cx = self.cx.as_deref().filter(|c| !c.is_empty())?;
        Some(Credentials { api_key, cx })
    }
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            cx: None,
        }
    }
}

// Keeps the API key out of logs.
impl std::fmt::Debug for ProviderSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderSettings")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("cx", &self.cx)
            .finish()
    }
}

/// Validated provider secrets
#[derive(Clone, Copy)]
pub struct Credentials<'a> {
    pub api_key: &'a str,
    pub cx: &'a str,
}

/// Outgoing request settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutgoingSettings {
    /// Request timeout in seconds (none = client default)
    pub request_timeout: Option<f64>,
    /// Pool max idle connections per host
    pub pool_maxsize: usize,
    /// Verify SSL certificates
    pub verify_ssl: bool,
    /// Proxy settings
    pub proxies: ProxySettings,
}

impl Default for OutgoingSettings {
    fn default() -> Self {
        Self {
            request_timeout: None,
            pool_maxsize: 20,
            verify_ssl: true,
            proxies: ProxySettings::default(),
        }
    }
}

/// Proxy settings
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProxySettings {
    pub http: Option<String>,
    pub https: Option<String>,
    pub all: Option<String>,
}
