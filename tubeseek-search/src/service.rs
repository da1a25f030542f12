//! Search service used by interactive sessions.

use tubeseek_core::{Query, RuntimeMode, SearchResultSet, TubeseekConfig};

use crate::errors::SearchError;
use crate::providers::{DemoProvider, SearchProvider, YouTubeProvider};

/// Search service wrapping the provider chosen for the runtime mode.
///
/// Only validated queries reach the provider.
#[derive(Debug)]
pub struct SearchService {
    provider: Box<dyn SearchProvider>,
}

impl SearchService {
    /// Creates the service for `config.mode`: the live site in production,
    /// canned results in development.
    ///
    /// # Errors
    /// - `SearchError::ProviderError` - Live provider could not be set up
    pub fn from_config(config: &TubeseekConfig) -> Result<Self, SearchError> {
        let provider: Box<dyn SearchProvider> = match config.mode {
            RuntimeMode::Production => Box::new(YouTubeProvider::with_config(&config.search)?),
            RuntimeMode::Development => Box::new(DemoProvider::new()),
        };
        Ok(Self { provider })
    }

    /// Creates the service with demo data for development.
    pub fn new_demo() -> Self {
        Self::with_provider(DemoProvider::new())
    }

    /// Creates the service around any provider.
    pub fn with_provider(provider: impl SearchProvider + 'static) -> Self {
        Self {
            provider: Box::new(provider),
        }
    }

    /// Runs one search for `query`.
    ///
    /// # Errors
    /// - Any `SearchError` from the provider, unchanged
    pub async fn search(&self, query: &Query) -> Result<SearchResultSet, SearchError> {
        tracing::info!("Searching for {:?}", query.as_str());

        match self.provider.search(query.as_str()).await {
            Ok(results) => {
                tracing::info!(
                    "Search returned {} videos and {} live streams",
                    results.videos.len(),
                    results.streams.len()
                );
                Ok(results)
            }
            Err(e) => {
                tracing::error!("Search failed: {e}");
                Err(e)
            }
        }
    }
}

impl Default for SearchService {
    fn default() -> Self {
        Self::new_demo()
    }
}
