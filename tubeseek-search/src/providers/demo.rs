//! Demo provider implementation for offline development.

use async_trait::async_trait;
use tubeseek_core::{Candidate, SearchResultSet, Uploader};

use super::SearchProvider;
use crate::errors::SearchError;

/// Number of ordinary videos the demo catalogue returns per query.
const DEMO_VIDEOS: usize = 12;
/// Number of live streams the demo catalogue returns per query.
const DEMO_STREAMS: usize = 3;

/// Demo provider for development and testing.
///
/// Returns deterministic results derived from the query text so the whole
/// prompt flow can be exercised without network access. Queries made only of
/// whitespace return nothing, which exercises the retry prompt.
#[derive(Debug, Default)]
pub struct DemoProvider;

impl DemoProvider {
    /// Creates the demo provider.
    pub fn new() -> Self {
        Self
    }

    fn candidate(query: &str, index: usize, live: bool) -> Candidate {
        let id = format!("{}{:03}{}", if live { "live" } else { "demo" }, index, query.len() % 100);
        let channel = format!("Demo Channel {}", index % 4 + 1);

        Candidate {
            link: format!("https://www.youtube.com/watch?v={id}"),
            thumbnail: Some(format!("https://i.ytimg.com/vi/{id}/hqdefault.jpg")),
            title: if live {
                format!("{query} - live radio #{}", index + 1)
            } else {
                format!("{query} (part {})", index + 1)
            },
            description: format!("Demo description for {query}"),
            uploaded: if live { String::new() } else { format!("{} days ago", index + 1) },
            views: Some(1_000 * (index as u64 + 1)),
            duration: (!live).then_some(180 + 30 * index as u32),
            uploader: Uploader {
                id: format!("UCdemo{}", index % 4),
                link: format!("https://www.youtube.com/@demo{}", index % 4),
                name: channel,
                verified: index % 4 == 0,
            },
            id,
        }
    }
}

#[async_trait]
impl SearchProvider for DemoProvider {
    async fn search(&self, query: &str) -> Result<SearchResultSet, SearchError> {
        if query.trim().is_empty() {
            return Ok(SearchResultSet::default());
        }

        Ok(SearchResultSet {
            videos: (0..DEMO_VIDEOS).map(|i| Self::candidate(query, i, false)).collect(),
            streams: (0..DEMO_STREAMS).map(|i| Self::candidate(query, i, true)).collect(),
        })
    }
}
