//! YouTube Data API v3 response types for the endpoints the evaluator calls.
//!
//! ## Observed shape from live API responses
//!
//! ### Counts are strings
//! `statistics` blocks carry counts as JSON strings (`"viewCount": "12345"`),
//! not numbers. We keep them as `Option<String>` and parse during
//! normalization so one malformed count degrades to zero instead of failing
//! the whole page.
//!
//! ### Absent counts are meaningful
//! `likeCount` disappears when the creator hides likes; `commentCount`
//! disappears when comments are turned off for the video. Absence is signal,
//! so these are `Option` rather than defaulted to `"0"`.
//!
//! ### `hiddenSubscriberCount`
//! Boolean on channel statistics. When `true` the `subscriberCount` field may
//! be absent entirely.
//!
//! ### `tags`
//! Omitted (not `[]`) when the uploader set no tags. `#[serde(default)]`
//! covers it.
//!
//! ### `topicDetails`
//! Absent for channels with no topic associations; present ones list
//! Wikipedia category URLs like `https://en.wikipedia.org/wiki/Technology`.
//!
//! ### Error envelope
//! Non-2xx responses carry `{"error": {"code": ..., "message": ...,
//! "errors": [{"reason": ...}]}}`. The `reason` of the first entry is what
//! distinguishes daily quota exhaustion (`"quotaExceeded"`) from other 403s.

use serde::Deserialize;

/// Envelope shared by the `channels.list`, `playlistItems.list`,
/// `videos.list` and `search.list` endpoints.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ListResponse<T> {
    #[serde(default)]
    pub items: Vec<T>,

    /// Present when another page of results exists.
    #[serde(default)]
    pub next_page_token: Option<String>,
}

/// A channel resource from `channels.list` with
/// `part=snippet,statistics,contentDetails,topicDetails`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelItem {
    /// Canonical channel ID (`UC` + 22 characters).
    pub id: String,
    pub snippet: ChannelSnippet,
    pub statistics: ChannelStatistics,
    pub content_details: ChannelContentDetails,
    /// Absent when the channel has no topic associations.
    #[serde(default)]
    pub topic_details: Option<ChannelTopicDetails>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelSnippet {
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Handle-style custom URL (e.g., `"@mkbhd"`). Absent on old channels
    /// that never claimed one.
    #[serde(default)]
    pub custom_url: Option<String>,
    #[serde(default)]
    pub thumbnails: Thumbnails,
}

/// Thumbnail set keyed by size. Any size may be absent.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Thumbnails {
    #[serde(default)]
    pub default: Option<Thumbnail>,
    #[serde(default)]
    pub medium: Option<Thumbnail>,
    #[serde(default)]
    pub high: Option<Thumbnail>,
}

#[derive(Debug, Deserialize)]
pub struct Thumbnail {
    pub url: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelStatistics {
    #[serde(default)]
    pub view_count: Option<String>,
    /// Absent when `hiddenSubscriberCount` is `true`.
    #[serde(default)]
    pub subscriber_count: Option<String>,
    #[serde(default)]
    pub hidden_subscriber_count: bool,
    #[serde(default)]
    pub video_count: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelContentDetails {
    pub related_playlists: RelatedPlaylists,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelatedPlaylists {
    /// Uploads playlist ID (`UU` + 22 characters). Observed absent on
    /// channels that have never uploaded.
    #[serde(default)]
    pub uploads: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelTopicDetails {
    /// Wikipedia category URLs; the trailing path segment is the label.
    #[serde(default)]
    pub topic_categories: Vec<String>,
}

/// A playlist entry from `playlistItems.list` with `part=contentDetails`.
///
/// Entries for private or deleted videos still appear here; they drop out
/// naturally when `videos.list` declines to return them.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistItem {
    pub content_details: PlaylistItemContentDetails,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistItemContentDetails {
    pub video_id: String,
}

/// A video resource from `videos.list` with
/// `part=snippet,statistics,contentDetails`.
///
/// Every part is optional here: suppressed or partially-processed videos have
/// been observed with whole blocks missing, and normalization decides what is
/// salvageable per video.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoItem {
    pub id: String,
    #[serde(default)]
    pub snippet: Option<VideoSnippet>,
    #[serde(default)]
    pub statistics: Option<VideoStatistics>,
    #[serde(default)]
    pub content_details: Option<VideoContentDetails>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoSnippet {
    /// RFC 3339 upload timestamp. Videos without one cannot be placed on the
    /// upload timeline and are dropped during normalization.
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoStatistics {
    #[serde(default)]
    pub view_count: Option<String>,
    /// Absent when the creator hides like counts.
    #[serde(default)]
    pub like_count: Option<String>,
    /// Absent when comments are disabled.
    #[serde(default)]
    pub comment_count: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoContentDetails {
    /// ISO-8601 duration like `"PT12M7S"`. Absent on live streams that have
    /// not finished processing.
    #[serde(default)]
    pub duration: Option<String>,
}

/// A channel resource from `channels.list` with `part=id`, used during
/// resolution where only the canonical ID matters.
#[derive(Debug, Deserialize)]
pub struct ChannelIdItem {
    pub id: String,
}

/// A result from `search.list` with `type=channel`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchItem {
    pub id: SearchItemId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchItemId {
    #[serde(default)]
    pub channel_id: Option<String>,
}

/// Error envelope returned with non-2xx statuses.
#[derive(Debug, Deserialize)]
pub struct ApiErrorEnvelope {
    pub error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub code: u16,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub errors: Vec<ApiErrorDetail>,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorDetail {
    #[serde(default)]
    pub reason: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn video_item_tolerates_missing_parts() {
        let json = r#"{"id": "abc123"}"#;
        let item: VideoItem = serde_json::from_str(json).expect("minimal item");
        assert!(item.snippet.is_none());
        assert!(item.statistics.is_none());
        assert!(item.content_details.is_none());
    }

    #[test]
    fn video_statistics_counts_stay_strings() {
        let json = r#"{"viewCount": "1200", "commentCount": "7"}"#;
        let stats: VideoStatistics = serde_json::from_str(json).expect("stats");
        assert_eq!(stats.view_count.as_deref(), Some("1200"));
        assert!(stats.like_count.is_none());
        assert_eq!(stats.comment_count.as_deref(), Some("7"));
    }

    #[test]
    fn channel_item_parses_observed_response() {
        let json = r#"{
            "id": "UCBJycsmduvYEL83R_U4JriQ",
            "snippet": {
                "title": "Marques Brownlee",
                "description": "Quality tech videos",
                "customUrl": "@mkbhd",
                "thumbnails": {"high": {"url": "https://yt3.ggpht.com/x"}}
            },
            "statistics": {
                "viewCount": "3900000000",
                "subscriberCount": "18100000",
                "hiddenSubscriberCount": false,
                "videoCount": "1600"
            },
            "contentDetails": {
                "relatedPlaylists": {"uploads": "UUBJycsmduvYEL83R_U4JriQ"}
            },
            "topicDetails": {
                "topicCategories": ["https://en.wikipedia.org/wiki/Technology"]
            }
        }"#;
        let item: ChannelItem = serde_json::from_str(json).expect("channel item");
        assert_eq!(item.snippet.custom_url.as_deref(), Some("@mkbhd"));
        assert_eq!(
            item.content_details.related_playlists.uploads.as_deref(),
            Some("UUBJycsmduvYEL83R_U4JriQ")
        );
        let topics = item.topic_details.expect("topic details");
        assert_eq!(topics.topic_categories.len(), 1);
    }

    #[test]
    fn error_envelope_extracts_reason() {
        let json = r#"{
            "error": {
                "code": 403,
                "message": "The request cannot be completed because you have exceeded your quota.",
                "errors": [{"reason": "quotaExceeded", "domain": "youtube.quota"}]
            }
        }"#;
        let envelope: ApiErrorEnvelope = serde_json::from_str(json).expect("envelope");
        assert_eq!(envelope.error.code, 403);
        assert_eq!(envelope.error.errors[0].reason, "quotaExceeded");
    }
}
