//! Descriptive statistics over a channel's recent uploads.
//!
//! Works entirely on normalized [`VideoRecord`]s; nothing here touches the
//! network. Averages are reported as whole counts, ratios and percentages
//! to two decimal places.

use chrono::{DateTime, Utc};
use creatorlens_core::VideoRecord;

use crate::stats::{coefficient_of_variation, mean, median_u64, round2, to_f64};
use crate::types::{AnalyticsResult, DateRange, VideoHighlight, ViewDistribution};

const SECS_PER_DAY: f64 = 86_400.0;

/// Compute upload statistics for one channel.
///
/// An empty video list yields a fully zeroed result with no highlights
/// and no date range; callers decide whether that is worth reporting.
#[must_use]
pub fn compute_analytics(videos: &[VideoRecord], subscriber_count: u64) -> AnalyticsResult {
    if videos.is_empty() {
        return empty_result();
    }

    let total_views: u64 = videos.iter().map(|v| v.views).sum();
    let total_likes: u64 = videos.iter().map(|v| v.likes).sum();
    let total_comments: u64 = videos.iter().map(|v| v.comments).sum();

    let avg_views = rounded_average(total_views, videos.len());
    let avg_likes = rounded_average(total_likes, videos.len());
    let avg_comments = rounded_average(total_comments, videos.len());

    let engagement_rate_pct = percentage(to_f64(total_likes + total_comments), to_f64(total_views));
    let like_to_view_pct = percentage(to_f64(total_likes), to_f64(total_views));
    let comment_to_view_pct = percentage(to_f64(total_comments), to_f64(total_views));
    let view_to_sub_ratio_pct = percentage(to_f64(avg_views), to_f64(subscriber_count));

    // Publish times in upload order, oldest first. The input arrives
    // newest-first but we do not rely on that here.
    let mut published: Vec<DateTime<Utc>> = videos.iter().map(|v| v.published_at).collect();
    published.sort_unstable();
    let earliest = published[0];
    let latest = published[published.len() - 1];

    #[allow(clippy::cast_precision_loss)]
    let span_days = ((latest - earliest).num_seconds() as f64 / SECS_PER_DAY).max(1.0);
    #[allow(clippy::cast_precision_loss)]
    let posts_per_week = round2(videos.len() as f64 / span_days * 7.0);

    let consistency_score = consistency_from_gaps(&published);

    let views: Vec<u64> = videos.iter().map(|v| v.views).collect();
    let views_f64: Vec<f64> = views.iter().map(|&v| to_f64(v)).collect();
    let view_mean = mean(&views_f64);
    let view_median = median_u64(&views);
    let skew_ratio = if view_median > 0.0 {
        round2(view_mean / view_median)
    } else {
        0.0
    };
    let distribution = ViewDistribution {
        mean: round2(view_mean),
        median: view_median,
        min: views.iter().copied().min().unwrap_or(0),
        max: views.iter().copied().max().unwrap_or(0),
        skew_ratio,
    };

    let top_video = videos.iter().max_by_key(|v| v.views).map(highlight);
    let worst_video = if videos.len() > 1 {
        videos.iter().min_by_key(|v| v.views).map(highlight)
    } else {
        None
    };

    AnalyticsResult {
        video_count: videos.len(),
        total_views,
        total_likes,
        total_comments,
        avg_views,
        avg_likes,
        avg_comments,
        engagement_rate_pct,
        like_to_view_pct,
        comment_to_view_pct,
        view_to_sub_ratio_pct,
        posts_per_week,
        consistency_score,
        distribution,
        top_video,
        worst_video,
        date_range: Some(DateRange {
            from: earliest,
            to: latest,
        }),
    }
}

/// Regularity of the upload schedule, 0-100.
///
/// Based on the coefficient of variation of the gaps between consecutive
/// publish times. A single gap cannot show a pattern and scores a neutral
/// 60; a lone upload (no gaps) scores 100.
#[allow(clippy::cast_precision_loss)]
fn consistency_from_gaps(published_ascending: &[DateTime<Utc>]) -> f64 {
    let gaps: Vec<f64> = published_ascending
        .windows(2)
        .map(|pair| (pair[1] - pair[0]).num_seconds() as f64 / SECS_PER_DAY)
        .collect();

    match gaps.len() {
        0 => 100.0,
        1 => 60.0,
        _ => match coefficient_of_variation(&gaps) {
            // A zero or negative mean gap means every upload shares one
            // timestamp; there is no spread to penalize.
            None => 100.0,
            Some(cv) => (100.0 * (1.0 - cv.min(1.0))).round().max(0.0),
        },
    }
}

fn highlight(video: &VideoRecord) -> VideoHighlight {
    VideoHighlight {
        id: video.id.clone(),
        title: video.title.clone(),
        url: video.url(),
        views: video.views,
        likes: video.likes,
        comments: video.comments,
        engagement_pct: video.engagement_pct,
        published_at: video.published_at,
    }
}

/// Percentage `numerator / denominator * 100`, two decimals, `0.0` when
/// the denominator is not positive.
fn percentage(numerator: f64, denominator: f64) -> f64 {
    if denominator <= 0.0 {
        return 0.0;
    }
    round2(numerator / denominator * 100.0)
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn rounded_average(total: u64, count: usize) -> u64 {
    if count == 0 {
        return 0;
    }
    (total as f64 / count as f64).round() as u64
}

fn empty_result() -> AnalyticsResult {
    AnalyticsResult {
        video_count: 0,
        total_views: 0,
        total_likes: 0,
        total_comments: 0,
        avg_views: 0,
        avg_likes: 0,
        avg_comments: 0,
        engagement_rate_pct: 0.0,
        like_to_view_pct: 0.0,
        comment_to_view_pct: 0.0,
        view_to_sub_ratio_pct: 0.0,
        posts_per_week: 0.0,
        consistency_score: 0.0,
        distribution: ViewDistribution {
            mean: 0.0,
            median: 0.0,
            min: 0,
            max: 0,
            skew_ratio: 0.0,
        },
        top_video: None,
        worst_video: None,
        date_range: None,
    }
}
