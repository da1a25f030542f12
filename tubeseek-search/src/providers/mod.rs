//! Provider implementations for video search.

use async_trait::async_trait;
use tubeseek_core::SearchResultSet;

use crate::errors::SearchError;

pub mod demo;
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
pub mod youtube;

pub use demo::DemoProvider;
#[cfg(any(test, feature = "test-utils"))]
pub use mock::MockProvider;
pub use youtube::YouTubeProvider;

/// Trait for video search providers.
///
/// A provider takes free text only. Category filtering and result limits are
/// applied by the caller after the provider returns.
#[async_trait]
pub trait SearchProvider: Send + Sync + std::fmt::Debug {
    /// Searches for `query`, returning videos and live streams in relevance order.
    ///
    /// # Errors
    /// - `SearchError::NetworkError` - Network connectivity issues
    /// - `SearchError::HttpStatus` - Provider answered with an error status
    /// - `SearchError::ParseError` - Response could not be understood
    async fn search(&self, query: &str) -> Result<SearchResultSet, SearchError>;
}
