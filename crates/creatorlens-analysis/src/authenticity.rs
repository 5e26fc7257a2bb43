//! Engagement-authenticity heuristics.
//!
//! Five statistical checks over the recent uploads, each looking for a
//! pattern organic audiences rarely produce. Deductions accumulate
//! against a starting score of 100. None of the checks proves bought
//! engagement on its own; the flags carry the measurement so a human can
//! judge.
//!
//! Videos under 100 views are excluded: at that size a single viewer's
//! behavior swings every ratio, and all five checks would fire on noise.

use std::collections::BTreeMap;

use creatorlens_core::{ChannelStats, VideoRecord};

use crate::stats::{coefficient_of_variation, round2, to_f64};
use crate::types::{AuthenticityFlag, AuthenticityReport, Severity};

/// Minimum videos (total and eligible) before the checks run at all.
const MIN_SAMPLE: usize = 3;
/// View floor a video must clear to enter the analyzed subset.
const MIN_VIEWS: u64 = 100;

/// Run the authenticity checks for one channel.
///
/// Returns [`AuthenticityReport::InsufficientData`] instead of a score
/// when fewer than [`MIN_SAMPLE`] videos exist or clear the view floor.
#[must_use]
pub fn compute_authenticity(videos: &[VideoRecord], stats: &ChannelStats) -> AuthenticityReport {
    if videos.len() < MIN_SAMPLE {
        return AuthenticityReport::InsufficientData {
            note: format!(
                "only {} videos available; at least {MIN_SAMPLE} are needed to judge engagement patterns",
                videos.len()
            ),
        };
    }

    let eligible: Vec<&VideoRecord> = videos.iter().filter(|v| v.views >= MIN_VIEWS).collect();
    if eligible.len() < MIN_SAMPLE {
        return AuthenticityReport::InsufficientData {
            note: format!(
                "only {} of {} videos reach {MIN_VIEWS} views; at least {MIN_SAMPLE} are needed",
                eligible.len(),
                videos.len()
            ),
        };
    }

    let mut flags: Vec<AuthenticityFlag> = Vec::new();
    let mut measurements: BTreeMap<String, f64> = BTreeMap::new();

    check_like_ratio_spread(&eligible, &mut flags, &mut measurements);
    check_comment_to_like(&eligible, &mut flags, &mut measurements);
    check_lifetime_views(stats, &mut flags, &mut measurements);
    check_zero_comment_high_like(&eligible, &mut flags, &mut measurements);
    check_view_spread(&eligible, &mut flags, &mut measurements);

    let deductions: u32 = flags.iter().map(|f| u32::from(f.deduction)).sum();
    #[allow(clippy::cast_possible_truncation)]
    let score = 100u32.saturating_sub(deductions) as u8;

    AuthenticityReport::Computed {
        score,
        label: label_for(score).to_string(),
        flags,
        measurements,
        videos_analyzed: eligible.len(),
    }
}

fn label_for(score: u8) -> &'static str {
    match score {
        85..=u8::MAX => "high",
        65..=84 => "moderate",
        40..=64 => "low",
        _ => "very low",
    }
}

/// Check 1: spread of per-video like-to-view ratios.
///
/// Needs at least three likes-enabled eligible videos. Organic ratios
/// drift video to video; a coefficient of variation under 0.15 is the
/// kind of uniformity purchased likes produce.
fn check_like_ratio_spread(
    eligible: &[&VideoRecord],
    flags: &mut Vec<AuthenticityFlag>,
    measurements: &mut BTreeMap<String, f64>,
) {
    let ratios: Vec<f64> = eligible
        .iter()
        .filter(|v| !v.likes_disabled)
        .map(|v| to_f64(v.likes) / to_f64(v.views))
        .collect();
    if ratios.len() < MIN_SAMPLE {
        return;
    }
    let Some(cv) = coefficient_of_variation(&ratios) else {
        return;
    };
    measurements.insert("like_view_ratio_cv".to_string(), round4(cv));

    if cv < 0.15 {
        flags.push(AuthenticityFlag {
            signal: "like-to-view ratio consistency".to_string(),
            severity: Severity::High,
            deduction: 30,
            explanation: format!(
                "like-to-view ratios are nearly identical across videos (CV {cv:.3}); organic audiences vary more"
            ),
        });
    } else if cv < 0.20 {
        flags.push(AuthenticityFlag {
            signal: "like-to-view ratio consistency".to_string(),
            severity: Severity::Medium,
            deduction: 10,
            explanation: format!(
                "like-to-view ratios vary unusually little across videos (CV {cv:.3})"
            ),
        });
    }
}

/// Check 2: comments relative to likes across the eligible subset.
///
/// Inflated like counts rarely bring conversation with them, and
/// giveaway or pod activity produces the opposite skew.
fn check_comment_to_like(
    eligible: &[&VideoRecord],
    flags: &mut Vec<AuthenticityFlag>,
    measurements: &mut BTreeMap<String, f64>,
) {
    let total_likes: u64 = eligible.iter().map(|v| v.likes).sum();
    let total_comments: u64 = eligible.iter().map(|v| v.comments).sum();
    if total_likes == 0 {
        return;
    }
    let ratio_pct = to_f64(total_comments) / to_f64(total_likes) * 100.0;
    measurements.insert("comment_to_like_pct".to_string(), round2(ratio_pct));

    if ratio_pct < 0.5 {
        flags.push(AuthenticityFlag {
            signal: "comment-to-like balance".to_string(),
            severity: Severity::High,
            deduction: 25,
            explanation: format!(
                "comments run at {ratio_pct:.2}% of likes; engaged audiences comment far more than that"
            ),
        });
    } else if ratio_pct > 20.0 {
        flags.push(AuthenticityFlag {
            signal: "comment-to-like balance".to_string(),
            severity: Severity::Medium,
            deduction: 15,
            explanation: format!(
                "comments run at {ratio_pct:.2}% of likes, a skew giveaway threads and comment pods produce"
            ),
        });
    }
}

/// Check 3: lifetime channel views against the subscriber base.
///
/// Only meaningful above 1,000 subscribers; tiny channels legitimately
/// have thin archives.
fn check_lifetime_views(
    stats: &ChannelStats,
    flags: &mut Vec<AuthenticityFlag>,
    measurements: &mut BTreeMap<String, f64>,
) {
    if stats.subscriber_count <= 1_000 || stats.view_count == 0 {
        return;
    }
    let views_per_sub = to_f64(stats.view_count) / to_f64(stats.subscriber_count);
    measurements.insert("lifetime_views_per_subscriber".to_string(), round2(views_per_sub));

    if views_per_sub < 5.0 {
        flags.push(AuthenticityFlag {
            signal: "lifetime views per subscriber".to_string(),
            severity: Severity::High,
            deduction: 25,
            explanation: format!(
                "{views_per_sub:.1} lifetime views per subscriber; a base that size usually leaves a far deeper watch history"
            ),
        });
    }
}

/// Check 4: videos with open comments, zero comments, and heavy likes.
fn check_zero_comment_high_like(
    eligible: &[&VideoRecord],
    flags: &mut Vec<AuthenticityFlag>,
    measurements: &mut BTreeMap<String, f64>,
) {
    let suspicious = eligible
        .iter()
        .filter(|v| !v.comments_disabled && v.comments == 0 && v.likes > 50)
        .count();
    #[allow(clippy::cast_precision_loss)]
    let share_pct = suspicious as f64 / eligible.len() as f64 * 100.0;
    measurements.insert("zero_comment_high_like_pct".to_string(), round2(share_pct));

    if share_pct >= 30.0 {
        flags.push(AuthenticityFlag {
            signal: "silent high-like videos".to_string(),
            severity: Severity::Medium,
            deduction: 15,
            explanation: format!(
                "{share_pct:.0}% of analyzed videos collect 50+ likes without a single comment"
            ),
        });
    }
}

/// Check 5: spread of raw view counts. Needs five or more eligible
/// videos; organic reach fluctuates upload to upload.
fn check_view_spread(
    eligible: &[&VideoRecord],
    flags: &mut Vec<AuthenticityFlag>,
    measurements: &mut BTreeMap<String, f64>,
) {
    if eligible.len() < 5 {
        return;
    }
    let views: Vec<f64> = eligible.iter().map(|v| to_f64(v.views)).collect();
    let Some(cv) = coefficient_of_variation(&views) else {
        return;
    };
    measurements.insert("view_count_cv".to_string(), round4(cv));

    if cv < 0.10 {
        flags.push(AuthenticityFlag {
            signal: "view count uniformity".to_string(),
            severity: Severity::Medium,
            deduction: 15,
            explanation: format!(
                "view counts are nearly flat across uploads (CV {cv:.3}), a shape traffic services tend to leave"
            ),
        });
    }
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}
