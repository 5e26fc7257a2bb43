//! Weighted composite scoring.
//!
//! Five sub-scores, each 0-100, combined into a single partnership
//! readiness score. Engagement is judged against per-tier benchmarks
//! since a 5% rate means something very different at 5K subscribers
//! than at 5M.

use creatorlens_core::ChannelStats;

use crate::tier::Tier;
use crate::types::{AnalyticsResult, CompositeScore, ScoreBreakdown, SubScore};

const WEIGHT_ENGAGEMENT: u8 = 35;
const WEIGHT_CONSISTENCY: u8 = 20;
const WEIGHT_FREQUENCY: u8 = 15;
const WEIGHT_VIEW_TO_SUB: u8 = 15;
const WEIGHT_AUDIENCE_REACH: u8 = 15;

/// Per-tier engagement-rate benchmarks, in percent: (good, great).
fn engagement_benchmarks(tier: Tier) -> (f64, f64) {
    match tier {
        Tier::Nano => (5.0, 8.0),
        Tier::Micro => (4.0, 7.0),
        Tier::MidTier => (3.0, 5.0),
        Tier::Macro => (2.0, 4.0),
        Tier::Mega => (1.5, 3.0),
    }
}

/// Score a channel's partnership readiness from its upload statistics.
#[must_use]
pub fn compute_composite_score(analytics: &AnalyticsResult, stats: &ChannelStats) -> CompositeScore {
    let tier = Tier::classify(stats.subscriber_count);

    let (engagement_raw, engagement) = engagement_sub(analytics.engagement_rate_pct, tier);
    let (consistency_raw, consistency) = consistency_sub(analytics.consistency_score);
    let (frequency_raw, frequency) = frequency_sub(analytics.posts_per_week);
    let (view_to_sub_raw, view_to_sub) = view_to_sub_sub(analytics.view_to_sub_ratio_pct);
    let (reach_raw, audience_reach) = audience_reach_sub(stats.subscriber_count, tier);

    // Weighted over the unrounded sub-scores; rounding only at the end.
    let weighted = engagement_raw * f64::from(WEIGHT_ENGAGEMENT)
        + consistency_raw * f64::from(WEIGHT_CONSISTENCY)
        + frequency_raw * f64::from(WEIGHT_FREQUENCY)
        + view_to_sub_raw * f64::from(WEIGHT_VIEW_TO_SUB)
        + reach_raw * f64::from(WEIGHT_AUDIENCE_REACH);
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let score = (weighted / 100.0).round().clamp(0.0, 100.0) as u8;

    CompositeScore {
        score,
        grade: grade_for(score).to_string(),
        tier,
        breakdown: ScoreBreakdown {
            engagement,
            consistency,
            frequency,
            view_to_sub,
            audience_reach,
        },
    }
}

/// Letter grade for a 0-100 composite score.
fn grade_for(score: u8) -> &'static str {
    match score {
        90..=u8::MAX => "A+",
        80..=89 => "A",
        70..=79 => "B+",
        60..=69 => "B",
        50..=59 => "C+",
        40..=49 => "C",
        30..=39 => "D",
        _ => "F",
    }
}

fn engagement_sub(rate_pct: f64, tier: Tier) -> (f64, SubScore) {
    let (good, great) = engagement_benchmarks(tier);
    let raw = if rate_pct <= 0.0 {
        0.0
    } else if rate_pct >= great {
        90.0 + ((rate_pct - great) * 5.0).min(10.0)
    } else if rate_pct >= good {
        60.0 + 30.0 * (rate_pct - good) / (great - good)
    } else {
        60.0 * rate_pct / good
    };
    let detail =
        format!("{rate_pct:.2}% engagement vs {tier} benchmarks {good}% good / {great}% great");
    sub_score(raw, WEIGHT_ENGAGEMENT, detail)
}

fn consistency_sub(consistency_score: f64) -> (f64, SubScore) {
    let detail = format!("upload regularity {consistency_score:.0}/100 from publish-gap spread");
    sub_score(consistency_score, WEIGHT_CONSISTENCY, detail)
}

fn frequency_sub(posts_per_week: f64) -> (f64, SubScore) {
    let raw = if posts_per_week <= 0.0 {
        0.0
    } else if posts_per_week < 0.25 {
        10.0
    } else if posts_per_week < 1.0 {
        50.0 * (posts_per_week - 0.25) / 0.75
    } else if posts_per_week < 2.0 {
        50.0 + 40.0 * (posts_per_week - 1.0)
    } else if posts_per_week <= 5.0 {
        // Sweet spot: two to five uploads a week.
        90.0 + ((posts_per_week - 2.0) * 4.0).min(10.0)
    } else {
        // Beyond five a week quality tends to suffer; taper, floor at 70.
        (100.0 - (posts_per_week - 5.0) * 5.0).max(70.0)
    };
    let detail = format!("{posts_per_week:.2} uploads per week");
    sub_score(raw, WEIGHT_FREQUENCY, detail)
}

fn view_to_sub_sub(ratio_pct: f64) -> (f64, SubScore) {
    let raw = if ratio_pct <= 0.0 {
        0.0
    } else if ratio_pct >= 30.0 {
        90.0 + ((ratio_pct - 30.0) * 0.5).min(10.0)
    } else if ratio_pct >= 15.0 {
        60.0 + 30.0 * (ratio_pct - 15.0) / 15.0
    } else {
        60.0 * ratio_pct / 15.0
    };
    let detail = format!("average upload reaches {ratio_pct:.2}% of subscribers");
    sub_score(raw, WEIGHT_VIEW_TO_SUB, detail)
}

fn audience_reach_sub(subscriber_count: u64, tier: Tier) -> (f64, SubScore) {
    let raw = match subscriber_count {
        1_000_000.. => 95.0,
        500_000..=999_999 => 85.0,
        100_000..=499_999 => 75.0,
        50_000..=99_999 => 65.0,
        10_000..=49_999 => 50.0,
        1_000..=9_999 => 30.0,
        _ => 10.0,
    };
    let detail = format!("{subscriber_count} subscribers ({tier})");
    sub_score(raw, WEIGHT_AUDIENCE_REACH, detail)
}

/// Clamp a raw sub-score into [0,100] and package it for the breakdown.
/// Returns the clamped raw value alongside, for the weighted sum.
fn sub_score(raw: f64, weight_pct: u8, detail: String) -> (f64, SubScore) {
    let clamped = raw.clamp(0.0, 100.0);
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let rounded = clamped.round() as u8;
    (
        clamped,
        SubScore {
            score: rounded,
            weight_pct,
            detail,
        },
    )
}
