//! YouTube Data API client
//!
//! Resolves a video id from a URL or raw id, then fetches the snippet and
//! statistics parts for that video. The API is an external collaborator only:
//! its payload is normalized into [`VideoMetadata`] and nothing else of it
//! leaks into the rest of the backend.

use crate::error::{Error, Result};
use serde::Deserialize;
use std::time::Duration;
use url::Url;

const YOUTUBE_API_BASE: &str = "https://www.googleapis.com/youtube/v3/videos";
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Extract the video id from a YouTube URL.
///
/// Recognized forms:
/// - `https://youtu.be/VIDEO_ID` (id is the path)
/// - `https://www.youtube.com/watch?v=VIDEO_ID` (id is the `v` query param)
///
/// Returns None when the host matches neither pattern or the id is missing.
pub fn extract_video_id(youtube_url: &str) -> Option<String> {
    let parsed = Url::parse(youtube_url).ok()?;
    let host = parsed.host_str()?;

    if host.contains("youtu.be") {
        let id = parsed.path().trim_start_matches('/');
        return if id.is_empty() {
            None
        } else {
            Some(id.to_string())
        };
    }

    if host.contains("youtube.com") {
        return parsed
            .query_pairs()
            .find(|(k, _)| k == "v")
            .map(|(_, v)| v.into_owned());
    }

    None
}

/// Resolve a video id from either a URL or a raw id.
///
/// Inputs without the "youtu" marker are taken as raw ids verbatim.
pub fn resolve_video_id(input: &str) -> Option<String> {
    if input.contains("youtu") {
        extract_video_id(input)
    } else {
        Some(input.to_string())
    }
}

/// Normalized video metadata returned by the fetcher
#[derive(Debug, Clone)]
pub struct VideoMetadata {
    pub video_id: String,
    pub title: String,
    pub description: String,
    /// Raw publishedAt timestamp string (RFC 3339)
    pub publication_date: String,
    pub views: i64,
    pub likes: i64,
}

#[derive(Debug, Deserialize)]
struct VideoListResponse {
    error: Option<ApiErrorBody>,
    #[serde(default)]
    items: Vec<VideoItem>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    message: String,
}

#[derive(Debug, Deserialize)]
struct VideoItem {
    snippet: Snippet,
    statistics: Option<Statistics>,
}

#[derive(Debug, Deserialize)]
struct Snippet {
    title: Option<String>,
    description: Option<String>,
    #[serde(rename = "publishedAt")]
    published_at: Option<String>,
}

/// Statistics counts arrive as JSON strings, not numbers
#[derive(Debug, Deserialize)]
struct Statistics {
    #[serde(rename = "viewCount")]
    view_count: Option<String>,
    #[serde(rename = "likeCount")]
    like_count: Option<String>,
}

/// Thin client over the YouTube Data API v3
#[derive(Clone)]
pub struct YouTubeClient {
    http: reqwest::Client,
    api_key: String,
}

impl YouTubeClient {
    pub fn new(api_key: String) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { http, api_key })
    }

    /// Fetch snippet + statistics for a video given a URL or raw id.
    ///
    /// Transport errors and non-success statuses surface as [`Error::YouTube`];
    /// an error payload or an empty item list means the video does not exist
    /// and surfaces as [`Error::InvalidInput`] so the caller's 400 path fires.
    pub async fn video_metadata(&self, input: &str) -> Result<VideoMetadata> {
        let video_id = resolve_video_id(input).ok_or_else(|| {
            Error::InvalidInput(format!("Could not extract a video id from '{}'", input))
        })?;

        let response = self
            .http
            .get(YOUTUBE_API_BASE)
            .query(&[
                ("part", "snippet,statistics"),
                ("id", video_id.as_str()),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|e| Error::YouTube(format!("request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::YouTube(format!(
                "videos endpoint returned {}",
                status
            )));
        }

        let body: VideoListResponse = response
            .json()
            .await
            .map_err(|e| Error::YouTube(format!("invalid response body: {}", e)))?;

        if let Some(err) = body.error {
            tracing::warn!("YouTube API error payload for {}: {}", video_id, err.message);
            return Err(Error::InvalidInput(format!(
                "Could not fetch video data for '{}'",
                video_id
            )));
        }

        let item = body.items.into_iter().next().ok_or_else(|| {
            Error::InvalidInput(format!("No video found for id '{}'", video_id))
        })?;

        let stats = item.statistics;
        Ok(VideoMetadata {
            video_id,
            title: item.snippet.title.unwrap_or_else(|| "unknown".to_string()),
            description: item
                .snippet
                .description
                .unwrap_or_else(|| "No description".to_string()),
            publication_date: item.snippet.published_at.unwrap_or_default(),
            views: parse_count(stats.as_ref().and_then(|s| s.view_count.as_deref())),
            likes: parse_count(stats.as_ref().and_then(|s| s.like_count.as_deref())),
        })
    }
}

fn parse_count(raw: Option<&str>) -> i64 {
    raw.and_then(|s| s.parse().ok()).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_short_form() {
        assert_eq!(
            extract_video_id("https://youtu.be/abc123"),
            Some("abc123".to_string())
        );
    }

    #[test]
    fn test_extract_long_form() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?v=abc123"),
            Some("abc123".to_string())
        );
    }

    #[test]
    fn test_extract_long_form_extra_params() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?t=42&v=dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ".to_string())
        );
    }

    #[test]
    fn test_extract_unrelated_url() {
        assert_eq!(extract_video_id("https://example.com/watch?v=abc123"), None);
    }

    #[test]
    fn test_extract_missing_query_param() {
        assert_eq!(extract_video_id("https://www.youtube.com/watch"), None);
    }

    #[test]
    fn test_resolve_raw_id_passthrough() {
        assert_eq!(
            resolve_video_id("dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ".to_string())
        );
    }

    #[test]
    fn test_resolve_url_with_marker() {
        assert_eq!(
            resolve_video_id("https://youtu.be/abc123"),
            Some("abc123".to_string())
        );
    }

    #[test]
    fn test_resolve_bad_url_with_marker() {
        // Contains the marker but parses to nothing usable
        assert_eq!(resolve_video_id("https://youtube.com/watch"), None);
    }

    #[test]
    fn test_parse_count_defaults_to_zero() {
        assert_eq!(parse_count(None), 0);
        assert_eq!(parse_count(Some("not-a-number")), 0);
        assert_eq!(parse_count(Some("1234")), 1234);
    }
}
