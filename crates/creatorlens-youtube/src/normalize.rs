//! Normalization from raw YouTube API types to [`creatorlens_core`] records.
//!
//! Duration parsing is delegated to [`crate::duration`]; this module focuses
//! on structural conversion and the defensive-count rules. Everything here is
//! pure: callers that replay recorded API responses get identical records
//! without touching the network.

use chrono::{DateTime, Utc};
use creatorlens_core::{ChannelProfile, ChannelStats, VideoRecord};

use crate::duration::parse_duration_secs;
use crate::types::{ChannelItem, VideoItem};

/// Normalizes raw `videos.list` items into [`VideoRecord`]s, most recent
/// first.
///
/// Records whose publish timestamp is missing or unparseable are dropped
/// silently (logged at debug); every other defect degrades field-by-field:
/// non-numeric counts become zero, a missing duration becomes zero seconds
/// and the video is treated as not-short.
#[must_use]
pub fn normalize_videos(items: Vec<VideoItem>) -> Vec<VideoRecord> {
    let mut records: Vec<VideoRecord> = items.into_iter().filter_map(normalize_video).collect();
    records.sort_by(|a, b| b.published_at.cmp(&a.published_at));
    records
}

/// Converts one raw item, or `None` when the publish timestamp is unusable.
fn normalize_video(item: VideoItem) -> Option<VideoRecord> {
    let VideoItem {
        id,
        snippet,
        statistics,
        content_details,
    } = item;

    let Some(snippet) = snippet else {
        tracing::debug!(video_id = %id, "dropping video without snippet");
        return None;
    };
    let Some(published_at) = snippet.published_at.as_deref().and_then(parse_timestamp) else {
        tracing::debug!(video_id = %id, "dropping video with unparseable publish timestamp");
        return None;
    };

    let stats = statistics.unwrap_or_default();
    let views = count_or_zero(stats.view_count.as_deref());
    let likes_disabled = stats.like_count.is_none();
    let likes = count_or_zero(stats.like_count.as_deref());
    let comments_disabled = stats.comment_count.is_none();
    let comments = count_or_zero(stats.comment_count.as_deref());

    let duration_secs = content_details
        .and_then(|d| d.duration)
        .map(|d| parse_duration_secs(&d))
        .unwrap_or(0);
    let is_short = duration_secs > 0 && duration_secs <= 60;

    // Counts fit comfortably in f64's 52-bit mantissa.
    #[allow(clippy::cast_precision_loss)]
    let engagement_pct = if views == 0 {
        0.0
    } else {
        likes.saturating_add(comments) as f64 / views as f64 * 100.0
    };

    Some(VideoRecord {
        id,
        title: snippet.title,
        description: snippet.description,
        tags: snippet.tags,
        published_at,
        views,
        likes,
        comments,
        duration_secs,
        is_short,
        likes_disabled,
        comments_disabled,
        engagement_pct,
    })
}

/// Converts a raw channel item into a [`ChannelProfile`].
///
/// When the uploads playlist is absent the ID is derived from the channel ID
/// (`UC…` and `UU…` share the same 22-character suffix on every observed
/// channel).
#[must_use]
pub fn normalize_channel(item: ChannelItem) -> ChannelProfile {
    let ChannelItem {
        id,
        snippet,
        statistics,
        content_details,
        topic_details,
    } = item;

    let uploads_playlist_id = content_details
        .related_playlists
        .uploads
        .filter(|u| !u.is_empty())
        .unwrap_or_else(|| derive_uploads_playlist(&id));

    let category_labels = topic_details
        .map(|t| t.topic_categories)
        .unwrap_or_default()
        .iter()
        .filter_map(|url| topic_label(url))
        .collect();

    let thumbnail_url = {
        let t = snippet.thumbnails;
        t.high
            .or(t.medium)
            .or(t.default)
            .map(|thumb| thumb.url)
    };

    let stats = ChannelStats {
        subscriber_count: count_or_zero(statistics.subscriber_count.as_deref()),
        view_count: count_or_zero(statistics.view_count.as_deref()),
        video_count: count_or_zero(statistics.video_count.as_deref()),
        hidden_subscriber_count: statistics.hidden_subscriber_count,
    };

    ChannelProfile {
        id,
        title: snippet.title,
        handle: snippet.custom_url,
        description: snippet.description,
        uploads_playlist_id,
        category_labels,
        thumbnail_url,
        stats,
    }
}

/// Parses an RFC 3339 timestamp into UTC.
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Parses a string count, defaulting missing or non-numeric values to zero.
fn count_or_zero(raw: Option<&str>) -> u64 {
    raw.and_then(|s| s.parse::<u64>().ok()).unwrap_or(0)
}

/// Swaps the `UC` channel prefix for the `UU` uploads-playlist prefix.
fn derive_uploads_playlist(channel_id: &str) -> String {
    channel_id
        .strip_prefix("UC")
        .map_or_else(String::new, |rest| format!("UU{rest}"))
}

/// Extracts a human-readable label from a Wikipedia topic-category URL,
/// e.g. `".../wiki/Lifestyle_(sociology)"` → `"Lifestyle (sociology)"`.
fn topic_label(url: &str) -> Option<String> {
    let segment = url.rsplit('/').next()?;
    if segment.is_empty() {
        return None;
    }
    Some(segment.replace('_', " "))
}
