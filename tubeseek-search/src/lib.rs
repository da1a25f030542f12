//! Tubeseek Search - Video search providers

#![deny(missing_docs)]
#![deny(clippy::missing_errors_doc)]
//!
//! Turns free-text queries into result sets partitioned into ordinary videos
//! and live streams. The live provider scrapes the site's results page; a
//! demo provider serves canned data for offline development.

pub mod errors;
pub mod providers;
pub mod scrape;
pub mod service;

pub use errors::SearchError;
pub use providers::{DemoProvider, SearchProvider, YouTubeProvider};
#[cfg(any(test, feature = "test-utils"))]
pub use providers::MockProvider;
pub use service::SearchService;
