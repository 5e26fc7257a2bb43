use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single video after normalization, the canonical unit every analysis
/// component consumes.
///
/// Produced once by the normalizer and never mutated afterwards. Collections
/// of records are ordered by `published_at`, most recent first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoRecord {
    /// YouTube video ID (the `v=` parameter), e.g. `"dQw4w9WgXcQ"`.
    pub id: String,
    pub title: String,
    /// Full description text; the sponsorship scanner works over this.
    pub description: String,
    /// Uploader-set tags. Empty when the API omits them.
    pub tags: Vec<String>,
    pub published_at: DateTime<Utc>,
    pub views: u64,
    /// Like count, `0` when likes are hidden; see [`Self::likes_disabled`].
    pub likes: u64,
    /// Comment count, `0` when comments are off; see [`Self::comments_disabled`].
    pub comments: u64,
    /// Total runtime in seconds; `0` when the API supplied no duration.
    pub duration_secs: u64,
    /// `true` when `0 < duration_secs <= 60` (Shorts-length uploads).
    pub is_short: bool,
    /// The like count was absent from the source data. Distinct from a
    /// genuine zero-like video, which reports `likes = 0` with this `false`.
    pub likes_disabled: bool,
    /// The comment count was absent from the source data.
    pub comments_disabled: bool,
    /// Per-video engagement: `(likes + comments) / views * 100`, `0` when
    /// the video has no views.
    pub engagement_pct: f64,
}

impl VideoRecord {
    /// Canonical watch URL for this video.
    #[must_use]
    pub fn url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.id)
    }
}

/// Lifetime channel counters as reported by the channels endpoint.
///
/// Read-only input to every downstream component.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ChannelStats {
    pub subscriber_count: u64,
    /// Lifetime view count across all uploads.
    pub view_count: u64,
    /// Lifetime number of public uploads.
    pub video_count: u64,
    /// The channel hides its subscriber count; `subscriber_count` is then
    /// whatever the API reported (typically `0`) and tier/reach scoring
    /// treats it at face value.
    #[serde(default)]
    pub hidden_subscriber_count: bool,
}

/// Channel identity and metadata resolved by the YouTube collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelProfile {
    /// Canonical channel ID, e.g. `"UCxxxxxxxxxxxxxxxxxxxxxx"`.
    pub id: String,
    pub title: String,
    /// Public `@handle`, when the channel has one.
    pub handle: Option<String>,
    pub description: String,
    /// Playlist ID holding the channel's uploads (`UU…`), used to page
    /// through recent videos.
    pub uploads_playlist_id: String,
    /// Human-readable topic labels derived from the channel's topic
    /// categories (e.g. `"Technology"`, `"Lifestyle (sociology)"`). The
    /// niche multiplier matches against these.
    pub category_labels: Vec<String>,
    pub thumbnail_url: Option<String>,
    pub stats: ChannelStats,
}

impl ChannelProfile {
    /// Canonical channel URL, preferring the handle form when present.
    #[must_use]
    pub fn url(&self) -> String {
        match &self.handle {
            Some(h) => format!("https://www.youtube.com/{h}"),
            None => format!("https://www.youtube.com/channel/{}", self.id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_record(id: &str) -> VideoRecord {
        VideoRecord {
            id: id.to_string(),
            title: "Test upload".to_string(),
            description: String::new(),
            tags: vec![],
            published_at: "2026-01-15T12:00:00Z".parse().unwrap(),
            views: 1000,
            likes: 50,
            comments: 10,
            duration_secs: 300,
            is_short: false,
            likes_disabled: false,
            comments_disabled: false,
            engagement_pct: 6.0,
        }
    }

    #[test]
    fn video_url_uses_watch_form() {
        let v = make_record("abc123XYZ_-");
        assert_eq!(v.url(), "https://www.youtube.com/watch?v=abc123XYZ_-");
    }

    #[test]
    fn channel_url_prefers_handle() {
        let profile = ChannelProfile {
            id: "UC0000000000000000000000".to_string(),
            title: "Test Channel".to_string(),
            handle: Some("@testchannel".to_string()),
            description: String::new(),
            uploads_playlist_id: "UU0000000000000000000000".to_string(),
            category_labels: vec![],
            thumbnail_url: None,
            stats: ChannelStats::default(),
        };
        assert_eq!(profile.url(), "https://www.youtube.com/@testchannel");
    }

    #[test]
    fn channel_url_falls_back_to_id() {
        let profile = ChannelProfile {
            id: "UC0000000000000000000000".to_string(),
            title: "Test Channel".to_string(),
            handle: None,
            description: String::new(),
            uploads_playlist_id: "UU0000000000000000000000".to_string(),
            category_labels: vec![],
            thumbnail_url: None,
            stats: ChannelStats::default(),
        };
        assert_eq!(
            profile.url(),
            "https://www.youtube.com/channel/UC0000000000000000000000"
        );
    }

    #[test]
    fn channel_stats_hidden_flag_defaults_false_in_json() {
        let stats: ChannelStats = serde_json::from_str(
            r#"{"subscriber_count": 1200, "view_count": 90000, "video_count": 41}"#,
        )
        .unwrap();
        assert!(!stats.hidden_subscriber_count);
        assert_eq!(stats.subscriber_count, 1200);
    }
}
