//! Result entities produced by the evaluation passes.
//!
//! Everything here is a plain value object: the passes compute, these
//! structs carry. All of them serialize straight into the final JSON
//! report, so field names are chosen for the reader of that report.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use creatorlens_core::{ChannelProfile, QuotaSnapshot};
use serde::{Deserialize, Serialize};

use crate::tier::Tier;

/// A single video surfaced in the report (top or worst performer).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoHighlight {
    pub id: String,
    pub title: String,
    pub url: String,
    pub views: u64,
    pub likes: u64,
    pub comments: u64,
    pub engagement_pct: f64,
    pub published_at: DateTime<Utc>,
}

/// Publish-time window covered by the analyzed uploads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DateRange {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

/// Shape of the view-count distribution across the analyzed uploads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewDistribution {
    pub mean: f64,
    pub median: f64,
    pub min: u64,
    pub max: u64,
    /// Mean over median. Above 1 means a few videos pull the average up;
    /// `0.0` when the median is zero.
    pub skew_ratio: f64,
}

/// Descriptive statistics over a channel's recent uploads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsResult {
    pub video_count: usize,
    pub total_views: u64,
    pub total_likes: u64,
    pub total_comments: u64,
    /// Per-video averages, rounded to the nearest whole count.
    pub avg_views: u64,
    pub avg_likes: u64,
    pub avg_comments: u64,
    /// (likes + comments) / views across all uploads, as a percentage.
    pub engagement_rate_pct: f64,
    pub like_to_view_pct: f64,
    pub comment_to_view_pct: f64,
    /// Average views as a percentage of the subscriber count.
    pub view_to_sub_ratio_pct: f64,
    pub posts_per_week: f64,
    /// 0-100. Regularity of the upload schedule; 100 means evenly spaced.
    pub consistency_score: f64,
    pub distribution: ViewDistribution,
    pub top_video: Option<VideoHighlight>,
    /// Absent when fewer than two videos were analyzed.
    pub worst_video: Option<VideoHighlight>,
    pub date_range: Option<DateRange>,
}

/// One weighted component of the composite score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubScore {
    /// 0-100, rounded for reporting. The weighted sum uses the unrounded
    /// value.
    pub score: u8,
    pub weight_pct: u8,
    /// Short explanation of how the component landed where it did.
    pub detail: String,
}

/// The five named components feeding the composite score.
///
/// Weights sum to 100 across the five fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub engagement: SubScore,
    pub consistency: SubScore,
    pub frequency: SubScore,
    pub view_to_sub: SubScore,
    pub audience_reach: SubScore,
}

/// Overall brand-partnership readiness score for a channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompositeScore {
    /// 0-100.
    pub score: u8,
    /// Letter grade derived from the score (`A+` down to `F`).
    pub grade: String,
    pub tier: Tier,
    pub breakdown: ScoreBreakdown,
}

/// Severity of an authenticity finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    Medium,
}

/// A single suspicious pattern found during the authenticity pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticityFlag {
    /// Which signal fired, e.g. `like-to-view ratio consistency`.
    pub signal: String,
    pub severity: Severity,
    /// Points subtracted from the starting score of 100.
    pub deduction: u8,
    pub explanation: String,
}

/// Outcome of the engagement-authenticity heuristics.
///
/// Channels with too little usable data get an explicit
/// `insufficient_data` status instead of a misleading score.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AuthenticityReport {
    Computed {
        /// 0-100 after deductions.
        score: u8,
        /// `high`, `moderate`, `low`, or `very low`.
        label: String,
        flags: Vec<AuthenticityFlag>,
        /// Raw measurements backing the flags, keyed by metric name.
        measurements: BTreeMap<String, f64>,
        /// Number of videos that met the minimum-view bar.
        videos_analyzed: usize,
    },
    InsufficientData { note: String },
}

/// A brand named in sponsorship language, with how often it appeared.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrandMention {
    pub name: String,
    pub mentions: u32,
}

/// Signals detected in one video's description.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoSignals {
    pub video_id: String,
    /// `family:value` pairs, e.g. `disclosure:#ad` or `affiliate:NordVPN`.
    pub signals: Vec<String>,
}

/// What the sponsorship scanner found across the analyzed uploads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SponsorshipReport {
    pub videos_scanned: usize,
    pub videos_detected: usize,
    /// Detected share of scanned videos, rounded to a whole percentage.
    pub sponsorship_rate_pct: u8,
    /// `very high`, `high`, `moderate`, `low`, or `none`.
    pub label: String,
    pub disclosure_found: bool,
    /// Share of detected sponsorships carrying a disclosure hashtag.
    /// 100 when nothing was detected, since nothing lacked disclosure.
    pub disclosure_rate_pct: u8,
    /// Sorted by mention count descending, ties alphabetical.
    pub brands: Vec<BrandMention>,
    pub promo_codes: Vec<String>,
    pub affiliate_networks: Vec<String>,
    /// Per-video detail for videos with at least one signal.
    pub video_signals: Vec<VideoSignals>,
}

/// A low/mid/high price band in whole dollars.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PricedRange {
    pub low: u64,
    pub mid: u64,
    pub high: u64,
}

/// Suggested sponsorship pricing for a channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateCard {
    pub tier: Tier,
    /// Niche the pricing multiplier was taken from (`General` when no
    /// category matched).
    pub niche_label: String,
    pub niche_multiplier: f64,
    pub engagement_multiplier: f64,
    pub combined_multiplier: f64,
    pub integration: PricedRange,
    pub dedicated_video: PricedRange,
    pub shorts: PricedRange,
    /// Add-on for content usage rights, priced off the integration mid.
    pub usage_rights_addon: PricedRange,
    /// `Very experienced` down to `No sponsorship history`, or `Unknown`
    /// when no sponsorship scan was available.
    pub experience: String,
}

/// Narrative summary for a prospective brand partner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartnershipInsights {
    pub estimated_value_low: u64,
    pub estimated_value_high: u64,
    pub strengths: Vec<String>,
    pub flags: Vec<String>,
    pub categories: Vec<String>,
    pub recommended: bool,
}

/// Who the evaluated channel is, echoed at the top of the report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelIdentity {
    pub id: String,
    pub title: String,
    pub handle: Option<String>,
    pub url: String,
    pub thumbnail_url: Option<String>,
    pub subscriber_count: u64,
    pub lifetime_view_count: u64,
    pub lifetime_video_count: u64,
    pub hidden_subscriber_count: bool,
}

impl From<&ChannelProfile> for ChannelIdentity {
    fn from(profile: &ChannelProfile) -> Self {
        Self {
            id: profile.id.clone(),
            title: profile.title.clone(),
            handle: profile.handle.clone(),
            url: profile.url(),
            thumbnail_url: profile.thumbnail_url.clone(),
            subscriber_count: profile.stats.subscriber_count,
            lifetime_view_count: profile.stats.view_count,
            lifetime_video_count: profile.stats.video_count,
            hidden_subscriber_count: profile.stats.hidden_subscriber_count,
        }
    }
}

/// Complete evaluation report for one channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelEvaluation {
    /// Always `ok`; failures are reported out-of-band per channel.
    pub status: String,
    pub channel: ChannelIdentity,
    pub analytics: AnalyticsResult,
    pub composite_score: CompositeScore,
    pub sponsorship: SponsorshipReport,
    pub authenticity: AuthenticityReport,
    pub rate_card: RateCard,
    pub insights: PartnershipInsights,
    pub evaluated_at: DateTime<Utc>,
    /// API quota spent collecting the inputs, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quota: Option<QuotaSnapshot>,
}
