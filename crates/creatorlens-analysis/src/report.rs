//! Channel evaluation orchestration.

use chrono::{DateTime, Utc};
use creatorlens_core::{ChannelProfile, QuotaSnapshot, VideoRecord};

use crate::analytics::compute_analytics;
use crate::authenticity::compute_authenticity;
use crate::insights::synthesize_partnership_insights;
use crate::ratecard::generate_rate_card;
use crate::score::compute_composite_score;
use crate::sponsorship::detect_sponsorship;
use crate::types::{ChannelEvaluation, ChannelIdentity};

/// Run the full evaluation pipeline for one channel.
///
/// 1. Descriptive analytics over the normalized uploads.
/// 2. Tier-benchmarked composite score.
/// 3. Sponsorship signal scan.
/// 4. Authenticity checks.
/// 5. Rate card, priced off the score and the scan.
/// 6. Partnership insights.
///
/// Pure computation over already-fetched data; the quota snapshot is
/// echoed into the report untouched. The caller supplies `evaluated_at`
/// so a batch run stamps every report with one clock reading.
#[must_use]
pub fn evaluate_channel(
    profile: &ChannelProfile,
    videos: &[VideoRecord],
    quota: Option<QuotaSnapshot>,
    evaluated_at: DateTime<Utc>,
) -> ChannelEvaluation {
    let analytics = compute_analytics(videos, profile.stats.subscriber_count);
    let composite_score = compute_composite_score(&analytics, &profile.stats);
    let sponsorship = detect_sponsorship(videos);
    let authenticity = compute_authenticity(videos, &profile.stats);
    let rate_card = generate_rate_card(
        &analytics,
        &composite_score,
        &profile.category_labels,
        Some(&sponsorship),
    );
    let insights =
        synthesize_partnership_insights(&analytics, &profile.category_labels, &composite_score);

    tracing::debug!(
        channel = %profile.id,
        score = composite_score.score,
        grade = %composite_score.grade,
        videos = analytics.video_count,
        "channel evaluation complete"
    );

    ChannelEvaluation {
        status: "ok".to_string(),
        channel: ChannelIdentity::from(profile),
        analytics,
        composite_score,
        sponsorship,
        authenticity,
        rate_card,
        insights,
        evaluated_at,
        quota,
    }
}
