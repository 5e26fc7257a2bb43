//! Channel evaluation pipeline for creatorlens.
//!
//! Turns a normalized channel profile and its recent uploads into a brand
//! partnership report: descriptive analytics, a tier-benchmarked composite
//! score, sponsorship and authenticity scans, a suggested rate card, and
//! plain-language insights. Every pass is a pure function; all I/O lives
//! in the data-source crates.

pub mod analytics;
pub mod authenticity;
pub mod insights;
pub mod ratecard;
pub mod report;
pub mod score;
pub mod sponsorship;
pub mod tier;
pub mod types;

mod stats;

pub use analytics::compute_analytics;
pub use authenticity::compute_authenticity;
pub use insights::synthesize_partnership_insights;
pub use ratecard::generate_rate_card;
pub use report::evaluate_channel;
pub use score::compute_composite_score;
pub use sponsorship::detect_sponsorship;
pub use tier::Tier;
pub use types::{
    AnalyticsResult, AuthenticityFlag, AuthenticityReport, BrandMention, ChannelEvaluation,
    ChannelIdentity, CompositeScore, PartnershipInsights, PricedRange, RateCard, ScoreBreakdown,
    Severity, SponsorshipReport, SubScore, VideoHighlight, VideoSignals,
};
