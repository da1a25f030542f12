//! YouTube search provider for production use.

use async_trait::async_trait;
use tubeseek_core::SearchResultSet;
use tubeseek_core::config::SearchConfig;

use super::SearchProvider;
use crate::errors::SearchError;
use crate::scrape::{extract_initial_data, parse_results};

/// Search provider reading YouTube's HTML results page.
///
/// Makes exactly one GET per search with no retries and no timeout.
#[derive(Debug)]
pub struct YouTubeProvider {
    client: reqwest::Client,
    base_url: String,
    accept_language: String,
}

impl YouTubeProvider {
    /// Create provider with default configuration.
    ///
    /// # Errors
    /// - `SearchError::ProviderError` - HTTP client could not be built
    pub fn new() -> Result<Self, SearchError> {
        Self::with_config(&SearchConfig::default())
    }

    /// Create provider with custom configuration.
    ///
    /// # Errors
    /// - `SearchError::ProviderError` - HTTP client could not be built
    pub fn with_config(config: &SearchConfig) -> Result<Self, SearchError> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| SearchError::ProviderError {
                reason: format!("HTTP client setup failed: {e}"),
            })?;

        Ok(Self::with_client(client, config))
    }

    /// Create provider around an existing HTTP client.
    pub fn with_client(client: reqwest::Client, config: &SearchConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            accept_language: config.accept_language.clone(),
        }
    }

    /// URL of the results page, without query parameters.
    pub fn results_url(&self) -> String {
        format!("{}/results", self.base_url)
    }
}

#[async_trait]
impl SearchProvider for YouTubeProvider {
    async fn search(&self, query: &str) -> Result<SearchResultSet, SearchError> {
        let url = self.results_url();
        tracing::debug!("GET {url} search_query={query:?}");

        let response = self
            .client
            .get(&url)
            .query(&[("search_query", query)])
            .header(reqwest::header::ACCEPT_LANGUAGE, self.accept_language.as_str())
            .send()
            .await
            .map_err(|e| SearchError::NetworkError {
                reason: format!("Search request failed: {e}"),
            })?;

        if !response.status().is_success() {
            return Err(SearchError::HttpStatus {
                query: query.to_string(),
                status: response.status().as_u16(),
            });
        }

        let html = response.text().await.map_err(|e| SearchError::NetworkError {
            reason: format!("Reading results page failed: {e}"),
        })?;

        let data = extract_initial_data(&html)?;
        Ok(parse_results(&data))
    }
}
