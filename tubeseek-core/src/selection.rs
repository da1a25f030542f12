//! Search result types and the category/limit result selector.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::validation::ResultLimit;

/// Channel that published a candidate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Uploader {
    pub id: String,
    pub name: String,
    pub link: String,
    pub verified: bool,
}

/// One discoverable media item returned by a search provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: String,
    pub title: String,
    pub link: String,
    pub thumbnail: Option<String>,
    pub description: String,
    /// Provider-relative upload time, e.g. "3 days ago". Empty for live streams.
    pub uploaded: String,
    /// View count for videos, current viewers for live streams.
    pub views: Option<u64>,
    /// Length in seconds. `None` for live streams.
    pub duration: Option<u32>,
    pub uploader: Uploader,
}

impl Candidate {
    /// Canonical watch URL handed to the downloader.
    pub fn watch_url(&self) -> String {
        format!("https://youtube.com/watch?v={}", self.id)
    }
}

/// Provider output partitioned by content category.
///
/// Each partition keeps the provider's own relevance order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResultSet {
    pub videos: Vec<Candidate>,
    pub streams: Vec<Candidate>,
}

impl SearchResultSet {
    pub fn is_empty(&self) -> bool {
        self.videos.is_empty() && self.streams.is_empty()
    }

    /// Returns the partition holding `category`.
    pub fn partition(&self, category: ContentCategory) -> &[Candidate] {
        match category {
            ContentCategory::Video => &self.videos,
            ContentCategory::LiveStream => &self.streams,
        }
    }
}

/// Partition axis of a search result set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContentCategory {
    #[default]
    Video,
    LiveStream,
}

impl ContentCategory {
    /// Choices in prompt order.
    pub const ALL: [ContentCategory; 2] = [ContentCategory::Video, ContentCategory::LiveStream];

    /// Label shown at the category prompt.
    pub fn label(self) -> &'static str {
        match self {
            ContentCategory::Video => "video",
            ContentCategory::LiveStream => "live-stream",
        }
    }

    /// Maps a label to a category, ignoring case.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.to_lowercase().as_str() {
            "video" => Some(ContentCategory::Video),
            "live-stream" => Some(ContentCategory::LiveStream),
            _ => None,
        }
    }
}

impl fmt::Display for ContentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Bounded, category-filtered view of a result set.
///
/// `Empty` is an expected outcome, not a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionOutcome<'a> {
    Candidates(&'a [Candidate]),
    Empty,
}

impl<'a> SelectionOutcome<'a> {
    fn from_slice(candidates: &'a [Candidate]) -> Self {
        if candidates.is_empty() {
            SelectionOutcome::Empty
        } else {
            SelectionOutcome::Candidates(candidates)
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, SelectionOutcome::Empty)
    }

    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    pub fn as_slice(&self) -> &'a [Candidate] {
        match self {
            SelectionOutcome::Candidates(candidates) => candidates,
            SelectionOutcome::Empty => &[],
        }
    }

    /// Titles in selection order.
    pub fn titles(&self) -> Vec<&'a str> {
        self.as_slice().iter().map(|c| c.title.as_str()).collect()
    }

    /// First candidate whose title equals `title` exactly.
    ///
    /// Titles are not unique; on a collision the earliest entry wins.
    pub fn find_by_title(&self, title: &str) -> Option<&'a Candidate> {
        self.as_slice().iter().find(|c| c.title == title)
    }
}

/// Selects the first `limit` candidates of the partition for `category`.
///
/// Order is preserved and the result set is never modified, so repeated calls
/// on the same input return the same slice.
pub fn select(
    result_set: &SearchResultSet,
    category: ContentCategory,
    limit: ResultLimit,
) -> SelectionOutcome<'_> {
    let partition = result_set.partition(category);
    let end = limit.get().min(partition.len());
    SelectionOutcome::from_slice(&partition[..end])
}

/// Like [`select`], dispatching on a free-text category label.
///
/// Unknown labels select nothing rather than failing.
pub fn select_labeled<'a>(
    result_set: &'a SearchResultSet,
    label: &str,
    limit: ResultLimit,
) -> SelectionOutcome<'a> {
    match ContentCategory::from_label(label) {
        Some(category) => select(result_set, category, limit),
        None => {
            tracing::debug!("Unknown content category '{label}', selecting nothing");
            SelectionOutcome::Empty
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::validation::validate_limit;

    fn candidate(id: &str, title: &str) -> Candidate {
        Candidate {
            id: id.to_string(),
            title: title.to_string(),
            link: format!("https://www.youtube.com/watch?v={id}"),
            ..Default::default()
        }
    }

    fn result_set(videos: usize, streams: usize) -> SearchResultSet {
        SearchResultSet {
            videos: (0..videos)
                .map(|i| candidate(&format!("v{i}"), &format!("Video {i}")))
                .collect(),
            streams: (0..streams)
                .map(|i| candidate(&format!("s{i}"), &format!("Stream {i}")))
                .collect(),
        }
    }

    fn limit(n: i64) -> ResultLimit {
        validate_limit(n).unwrap()
    }

    #[test]
    fn test_select_takes_prefix_of_videos() {
        let results = result_set(8, 2);
        let selection = select(&results, ContentCategory::Video, limit(5));

        assert_eq!(selection.len(), 5);
        assert_eq!(selection.as_slice(), &results.videos[..5]);
    }

    #[test]
    fn test_select_streams() {
        let results = result_set(8, 2);
        let selection = select(&results, ContentCategory::LiveStream, limit(10));

        assert_eq!(selection.as_slice(), results.streams.as_slice());
    }

    #[test]
    fn test_select_empty_partition() {
        let results = result_set(3, 0);
        assert!(select(&results, ContentCategory::LiveStream, limit(10)).is_empty());
        assert!(select(&SearchResultSet::default(), ContentCategory::Video, limit(1)).is_empty());
    }

    #[test]
    fn test_select_labeled_unknown_label_is_empty() {
        let results = result_set(4, 4);
        assert!(select_labeled(&results, "playlist", limit(10)).is_empty());
        assert!(select_labeled(&results, "", limit(10)).is_empty());
    }

    #[test]
    fn test_select_labeled_ignores_case() {
        let results = result_set(4, 4);
        let selection = select_labeled(&results, "LIVE-STREAM", limit(2));
        assert_eq!(selection.as_slice(), &results.streams[..2]);
    }

    #[test]
    fn test_find_by_title_prefers_first_duplicate() {
        let results = SearchResultSet {
            videos: vec![
                candidate("a", "Intro"),
                candidate("b", "Live Set"),
                candidate("c", "Live Set"),
            ],
            streams: Vec::new(),
        };
        let selection = select(&results, ContentCategory::Video, limit(10));

        assert_eq!(selection.find_by_title("Live Set").unwrap().id, "b");
        assert!(selection.find_by_title("live set").is_none());
    }

    #[test]
    fn test_category_labels() {
        assert_eq!(ContentCategory::from_label("video"), Some(ContentCategory::Video));
        assert_eq!(ContentCategory::from_label("Live-Stream"), Some(ContentCategory::LiveStream));
        assert_eq!(ContentCategory::from_label("live stream"), None);
        assert_eq!(ContentCategory::default().label(), "video");
    }

    #[test]
    fn test_watch_url() {
        assert_eq!(candidate("dQw4w9WgXcQ", "x").watch_url(), "https://youtube.com/watch?v=dQw4w9WgXcQ");
    }

    proptest! {
        #[test]
        fn prop_select_is_bounded_prefix(
            videos in 0usize..40,
            streams in 0usize..40,
            n in 1i64..=100,
            live in any::<bool>(),
        ) {
            let results = result_set(videos, streams);
            let category = if live { ContentCategory::LiveStream } else { ContentCategory::Video };
            let partition = results.partition(category);

            let selection = select(&results, category, limit(n));
            let expected = (n as usize).min(partition.len());

            prop_assert_eq!(selection.len(), expected);
            prop_assert_eq!(selection.as_slice(), &partition[..expected]);
        }

        #[test]
        fn prop_select_is_idempotent(videos in 0usize..20, streams in 0usize..20, n in 1i64..=100) {
            let results = result_set(videos, streams);
            let before = results.clone();

            let first = select(&results, ContentCategory::Video, limit(n));
            let second = select(&results, ContentCategory::Video, limit(n));

            prop_assert_eq!(first, second);
            prop_assert_eq!(&results, &before);
        }

        #[test]
        fn prop_unknown_labels_select_nothing(label in "[a-z]{1,12}", n in 1i64..=100) {
            prop_assume!(label != "video");
            let results = result_set(5, 5);
            prop_assert!(select_labeled(&results, &label, limit(n)).is_empty());
        }
    }
}
