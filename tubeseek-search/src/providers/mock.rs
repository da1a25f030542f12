//! Mock provider implementation for testing.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use tubeseek_core::SearchResultSet;

use super::SearchProvider;
use crate::errors::SearchError;

#[derive(Debug, Default)]
struct MockState {
    responses: VecDeque<Result<SearchResultSet, SearchError>>,
    queries: Vec<String>,
}

/// Scripted provider for testing.
///
/// Answers searches from a queue of scripted responses, then with empty
/// result sets once the queue is drained. Clones share state, so a test can
/// keep a handle after moving the provider into a session.
#[derive(Debug, Clone, Default)]
pub struct MockProvider {
    state: Arc<Mutex<MockState>>,
}

impl MockProvider {
    /// Creates a mock provider with no scripted responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful response.
    pub fn with_results(self, results: SearchResultSet) -> Self {
        self.state.lock().responses.push_back(Ok(results));
        self
    }

    /// Queues a failure.
    pub fn with_error(self, error: SearchError) -> Self {
        self.state.lock().responses.push_back(Err(error));
        self
    }

    /// Queries received so far, oldest first.
    pub fn queries(&self) -> Vec<String> {
        self.state.lock().queries.clone()
    }

    /// Number of searches performed.
    pub fn call_count(&self) -> usize {
        self.state.lock().queries.len()
    }
}

#[async_trait]
impl SearchProvider for MockProvider {
    async fn search(&self, query: &str) -> Result<SearchResultSet, SearchError> {
        let mut state = self.state.lock();
        state.queries.push(query.to_string());
        state.responses.pop_front().unwrap_or_else(|| Ok(SearchResultSet::default()))
    }
}
