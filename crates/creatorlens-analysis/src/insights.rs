//! Partnership insight synthesis.
//!
//! Turns the analyzer and scoring output into the short narrative a
//! brand manager skims first: estimated deal value, what stands out,
//! what to worry about, and a yes/no recommendation.

use crate::stats::to_f64;
use crate::tier::Tier;
use crate::types::{AnalyticsResult, CompositeScore, PartnershipInsights};

/// Estimated-value CPM pair in USD per thousand views: (low, high).
///
/// More conservative than the rate-card bands; this is a ballpark for
/// first contact, not a price.
fn estimate_cpm_for(tier: Tier) -> (f64, f64) {
    match tier {
        Tier::Nano => (10.0, 20.0),
        Tier::Micro => (15.0, 30.0),
        Tier::MidTier => (20.0, 40.0),
        Tier::Macro => (25.0, 50.0),
        Tier::Mega => (30.0, 60.0),
    }
}

/// Build the narrative summary from the upstream passes.
#[must_use]
pub fn synthesize_partnership_insights(
    analytics: &AnalyticsResult,
    categories: &[String],
    score: &CompositeScore,
) -> PartnershipInsights {
    let (cpm_low, cpm_high) = estimate_cpm_for(score.tier);
    let thousands = to_f64(analytics.avg_views) / 1000.0;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let estimated_value_low = (thousands * cpm_low).round() as u64;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let estimated_value_high = (thousands * cpm_high).round() as u64;

    let breakdown = &score.breakdown;
    let skew = analytics.distribution.skew_ratio;

    let mut strengths: Vec<String> = Vec::new();
    if breakdown.engagement.score >= 80 {
        strengths.push("Strong audience engagement for the tier".to_string());
    }
    if breakdown.consistency.score >= 80 {
        strengths.push("Reliable upload schedule".to_string());
    }
    if breakdown.frequency.score >= 80 {
        strengths.push("Healthy posting frequency".to_string());
    }
    if analytics.view_to_sub_ratio_pct >= 30.0 {
        strengths.push("Average uploads reach well beyond the subscriber base".to_string());
    }
    if skew > 0.0 && skew <= 1.5 {
        strengths.push("Views spread evenly across uploads".to_string());
    }

    let mut flags: Vec<String> = Vec::new();
    if breakdown.engagement.score < 40 {
        flags.push("Engagement is weak for the channel's tier".to_string());
    }
    if analytics.posts_per_week < 0.5 {
        flags.push("Fewer than one upload every two weeks".to_string());
    }
    if breakdown.consistency.score < 30 {
        flags.push("Upload schedule is erratic".to_string());
    }
    if skew > 3.0 {
        flags.push("Views concentrated in a few outlier videos".to_string());
    }
    if analytics.view_to_sub_ratio_pct < 10.0 {
        flags.push("Uploads reach only a small share of subscribers".to_string());
    }

    let recommended = score.score >= 50 && flags.len() <= 1;

    PartnershipInsights {
        estimated_value_low,
        estimated_value_high,
        strengths,
        flags,
        categories: categories.to_vec(),
        recommended,
    }
}

#[cfg(test)]
mod tests {
    use crate::types::{ScoreBreakdown, SubScore, ViewDistribution};

    use super::*;

    fn make_analytics(
        avg_views: u64,
        view_to_sub_ratio_pct: f64,
        posts_per_week: f64,
        skew_ratio: f64,
    ) -> AnalyticsResult {
        AnalyticsResult {
            video_count: 20,
            total_views: avg_views * 20,
            total_likes: 0,
            total_comments: 0,
            avg_views,
            avg_likes: 0,
            avg_comments: 0,
            engagement_rate_pct: 4.0,
            like_to_view_pct: 3.5,
            comment_to_view_pct: 0.5,
            view_to_sub_ratio_pct,
            posts_per_week,
            consistency_score: 80.0,
            distribution: ViewDistribution {
                mean: to_f64(avg_views),
                median: to_f64(avg_views),
                min: 0,
                max: 0,
                skew_ratio,
            },
            top_video: None,
            worst_video: None,
            date_range: None,
        }
    }

    fn make_score(
        score: u8,
        tier: Tier,
        engagement: u8,
        consistency: u8,
        frequency: u8,
    ) -> CompositeScore {
        let sub = |value: u8, weight_pct: u8| SubScore {
            score: value,
            weight_pct,
            detail: String::new(),
        };
        CompositeScore {
            score,
            grade: "B".to_string(),
            tier,
            breakdown: ScoreBreakdown {
                engagement: sub(engagement, 35),
                consistency: sub(consistency, 20),
                frequency: sub(frequency, 15),
                view_to_sub: sub(50, 15),
                audience_reach: sub(50, 15),
            },
        }
    }

    // --- estimated value ---

    #[test]
    fn estimate_uses_tier_cpm_pair() {
        let insights = synthesize_partnership_insights(
            &make_analytics(10_000, 20.0, 2.0, 1.2),
            &[],
            &make_score(60, Tier::Nano, 50, 50, 50),
        );
        // 10 thousands x (10, 20) CPM.
        assert_eq!(insights.estimated_value_low, 100);
        assert_eq!(insights.estimated_value_high, 200);
    }

    #[test]
    fn mega_tier_estimates_with_higher_cpm() {
        let insights = synthesize_partnership_insights(
            &make_analytics(2_000_000, 20.0, 2.0, 1.2),
            &[],
            &make_score(60, Tier::Mega, 50, 50, 50),
        );
        assert_eq!(insights.estimated_value_low, 60_000);
        assert_eq!(insights.estimated_value_high, 120_000);
    }

    // --- strengths and flags ---

    #[test]
    fn strong_channel_collects_all_five_strengths() {
        let insights = synthesize_partnership_insights(
            &make_analytics(50_000, 45.0, 3.0, 1.1),
            &["Technology".to_string()],
            &make_score(85, Tier::Micro, 90, 85, 88),
        );
        assert_eq!(insights.strengths.len(), 5);
        assert!(insights.flags.is_empty());
        assert!(insights.recommended);
        assert_eq!(insights.categories, vec!["Technology".to_string()]);
    }

    #[test]
    fn weak_channel_collects_the_flags() {
        let insights = synthesize_partnership_insights(
            &make_analytics(500, 4.0, 0.2, 5.0),
            &[],
            &make_score(25, Tier::Nano, 20, 20, 10),
        );
        assert_eq!(insights.flags.len(), 5);
        assert!(insights.strengths.is_empty());
        assert!(!insights.recommended);
    }

    #[test]
    fn zero_skew_is_neither_strength_nor_flag() {
        let insights = synthesize_partnership_insights(
            &make_analytics(1_000, 20.0, 2.0, 0.0),
            &[],
            &make_score(60, Tier::Nano, 50, 50, 50),
        );
        assert!(!insights
            .strengths
            .iter()
            .any(|s| s.contains("spread evenly")));
        assert!(!insights.flags.iter().any(|f| f.contains("outlier")));
    }

    // --- recommendation ---

    #[test]
    fn one_flag_still_recommends_at_50_plus() {
        // Only the reach flag fires (ratio 8% < 10).
        let insights = synthesize_partnership_insights(
            &make_analytics(5_000, 8.0, 2.0, 1.2),
            &[],
            &make_score(55, Tier::Micro, 50, 50, 50),
        );
        assert_eq!(insights.flags.len(), 1);
        assert!(insights.recommended);
    }

    #[test]
    fn two_flags_block_the_recommendation() {
        let insights = synthesize_partnership_insights(
            &make_analytics(5_000, 8.0, 0.4, 1.2),
            &[],
            &make_score(55, Tier::Micro, 50, 50, 50),
        );
        assert_eq!(insights.flags.len(), 2);
        assert!(!insights.recommended);
    }

    #[test]
    fn low_score_blocks_even_a_clean_channel() {
        let insights = synthesize_partnership_insights(
            &make_analytics(5_000, 20.0, 2.0, 1.2),
            &[],
            &make_score(45, Tier::Micro, 50, 50, 50),
        );
        assert!(insights.flags.is_empty());
        assert!(!insights.recommended);
    }
}
