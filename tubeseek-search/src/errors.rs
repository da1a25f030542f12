//! Error types for search functionality.

use thiserror::Error;

/// Errors that can occur while searching.
///
/// None of these are retried; they end the current session.
#[derive(Debug, Error)]
pub enum SearchError {
    /// Request could not be sent or the response body could not be read.
    #[error("Network error: {reason}")]
    NetworkError {
        /// The reason for the network error
        reason: String,
    },

    /// Results page answered with a non-success status.
    #[error("Search failed for query '{query}': HTTP {status}")]
    HttpStatus {
        /// The search query that failed
        query: String,
        /// HTTP status code returned
        status: u16,
    },

    /// Results page did not contain parsable result data.
    #[error("Parse error: {reason}")]
    ParseError {
        /// The reason for the parse error
        reason: String,
    },

    /// Provider could not be constructed or is unavailable.
    #[error("Provider error: {reason}")]
    ProviderError {
        /// The reason for the provider error
        reason: String,
    },
}
