//! Extraction of search results from a YouTube results page.
//!
//! The page embeds its initial state as a `ytInitialData` JSON object. Only
//! `videoRenderer` items of the main result sections are read; channels,
//! playlists, shelves and ads are skipped.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use tubeseek_core::{Candidate, SearchResultSet, Uploader};

use crate::errors::SearchError;

/// Root of watch and channel links built from relative URLs.
const SITE_ROOT: &str = "https://www.youtube.com";

static INITIAL_DATA: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)(?:var\s+ytInitialData|window\["ytInitialData"\])\s*=\s*(\{.+?\});\s*</script>"#)
        .expect("initial data pattern is valid")
});

/// Extracts the embedded `ytInitialData` object from results page HTML.
///
/// # Errors
/// - `SearchError::ParseError` - Page has no initial data or it is not valid JSON
pub fn extract_initial_data(html: &str) -> Result<Value, SearchError> {
    let captures = INITIAL_DATA
        .captures(html)
        .ok_or_else(|| SearchError::ParseError {
            reason: "results page contains no ytInitialData".to_string(),
        })?;

    serde_json::from_str(&captures[1]).map_err(|e| SearchError::ParseError {
        reason: format!("ytInitialData is not valid JSON: {e}"),
    })
}

/// Splits the video items of `data` into ordinary videos and live streams,
/// keeping page order within each partition.
pub fn parse_results(data: &Value) -> SearchResultSet {
    let mut results = SearchResultSet::default();

    let sections = data
        .pointer("/contents/twoColumnSearchResultsRenderer/primaryContents/sectionListRenderer/contents")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    let renderers = sections
        .iter()
        .filter_map(|section| section.pointer("/itemSectionRenderer/contents"))
        .filter_map(Value::as_array)
        .flatten()
        .filter_map(|item| item.get("videoRenderer"));

    for renderer in renderers {
        let Some(candidate) = parse_video(renderer) else {
            continue;
        };

        if is_live(renderer) {
            results.streams.push(candidate);
        } else {
            results.videos.push(candidate);
        }
    }

    results
}

/// Converts one `videoRenderer`. Items without an id or title are dropped.
fn parse_video(renderer: &Value) -> Option<Candidate> {
    let id = renderer.get("videoId")?.as_str()?.to_string();
    let title = renderer.get("title").and_then(text)?;

    let description = renderer
        .pointer("/detailedMetadataSnippets/0/snippetText")
        .or_else(|| renderer.get("descriptionSnippet"))
        .and_then(text)
        .unwrap_or_default();

    let thumbnail = renderer
        .pointer("/thumbnail/thumbnails")
        .and_then(Value::as_array)
        .and_then(|thumbs| thumbs.last())
        .and_then(|thumb| thumb.get("url"))
        .and_then(Value::as_str)
        .map(String::from);

    Some(Candidate {
        link: format!("{SITE_ROOT}/watch?v={id}"),
        id,
        title,
        thumbnail,
        description,
        uploaded: renderer.get("publishedTimeText").and_then(text).unwrap_or_default(),
        views: renderer.get("viewCountText").and_then(text).and_then(|t| parse_count(&t)),
        duration: renderer.get("lengthText").and_then(text).and_then(|t| parse_duration(&t)),
        uploader: parse_uploader(renderer),
    })
}

fn parse_uploader(renderer: &Value) -> Uploader {
    let owner = renderer
        .pointer("/ownerText/runs/0")
        .or_else(|| renderer.pointer("/longBylineText/runs/0"));

    let Some(owner) = owner else {
        return Uploader::default();
    };

    let endpoint = owner.get("navigationEndpoint");
    let id = endpoint
        .and_then(|e| e.pointer("/browseEndpoint/browseId"))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let link = endpoint
        .and_then(|e| {
            e.pointer("/browseEndpoint/canonicalBaseUrl")
                .or_else(|| e.pointer("/commandMetadata/webCommandMetadata/url"))
        })
        .and_then(Value::as_str)
        .map(|path| format!("{SITE_ROOT}{path}"))
        .unwrap_or_default();

    let verified = renderer
        .get("ownerBadges")
        .and_then(Value::as_array)
        .is_some_and(|badges| {
            badges.iter().any(|badge| {
                badge
                    .pointer("/metadataBadgeRenderer/style")
                    .and_then(Value::as_str)
                    .is_some_and(|style| style.contains("VERIFIED"))
            })
        });

    Uploader {
        id,
        name: owner.get("text").and_then(Value::as_str).unwrap_or_default().to_string(),
        link,
        verified,
    }
}

/// A video is a live stream when it carries a live-now badge or a live
/// thumbnail overlay.
fn is_live(renderer: &Value) -> bool {
    let live_badge = renderer
        .get("badges")
        .and_then(Value::as_array)
        .is_some_and(|badges| {
            badges.iter().any(|badge| {
                badge.pointer("/metadataBadgeRenderer/style").and_then(Value::as_str)
                    == Some("BADGE_STYLE_TYPE_LIVE_NOW")
            })
        });

    let live_overlay = renderer
        .get("thumbnailOverlays")
        .and_then(Value::as_array)
        .is_some_and(|overlays| {
            overlays.iter().any(|overlay| {
                overlay
                    .pointer("/thumbnailOverlayTimeStatusRenderer/style")
                    .and_then(Value::as_str)
                    == Some("LIVE")
            })
        });

    live_badge || live_overlay
}

/// Reads a text node in either `simpleText` or `runs` form.
fn text(node: &Value) -> Option<String> {
    if let Some(simple) = node.get("simpleText").and_then(Value::as_str) {
        return Some(simple.to_string());
    }

    let runs = node.get("runs")?.as_array()?;
    let joined: String = runs
        .iter()
        .filter_map(|run| run.get("text").and_then(Value::as_str))
        .collect();
    Some(joined)
}

/// Parses counts such as "1,234,567 views" or "812 watching".
fn parse_count(text: &str) -> Option<u64> {
    let digits: String = text
        .split_whitespace()
        .next()?
        .chars()
        .filter(char::is_ascii_digit)
        .collect();
    digits.parse().ok()
}

/// Parses clock durations such as "4:05" or "1:02:03" into seconds.
fn parse_duration(text: &str) -> Option<u32> {
    text.split(':').try_fold(0u32, |total, part| {
        let part: u32 = part.trim().parse().ok()?;
        total.checked_mul(60)?.checked_add(part)
    })
}
