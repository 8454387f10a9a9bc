//! Application state shared across handlers

use crate::config::Settings;
use crate::network::JsonFetcher;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Settings, read-only after startup
    pub settings: Arc<Settings>,
    /// Outbound client used to reach the provider
    pub fetcher: Arc<dyn JsonFetcher>,
}

impl AppState {
    /// Create new application state
    pub fn new(settings: Settings, fetcher: impl JsonFetcher + 'static) -> Self {
        Self {
            settings: Arc::new(settings),
            fetcher: Arc::new(fetcher),
        }
    }
}
