//! Sponsorship rate-card pricing.
//!
//! Prices scale with average views through per-tier CPM bands, then get
//! shaped by a niche multiplier, an engagement multiplier, and per-tier
//! dollar floors. Floors exist because small channels still carry fixed
//! production effort a CPM model would underprice.

use crate::stats::to_f64;
use crate::tier::Tier;
use crate::types::{AnalyticsResult, CompositeScore, PricedRange, RateCard, SponsorshipReport};

/// Base CPM bands in USD per thousand views: (low, mid, high).
fn cpm_for(tier: Tier) -> (f64, f64, f64) {
    match tier {
        Tier::Nano => (20.0, 30.0, 45.0),
        Tier::Micro => (22.0, 35.0, 50.0),
        Tier::MidTier => (25.0, 40.0, 60.0),
        Tier::Macro => (28.0, 45.0, 70.0),
        Tier::Mega => (32.0, 50.0, 80.0),
    }
}

/// Fixed dollar floors per deal type: (integration, dedicated, shorts).
fn floors_for(tier: Tier) -> (u64, u64, u64) {
    match tier {
        Tier::Nano => (200, 350, 100),
        Tier::Micro => (750, 1_250, 400),
        Tier::MidTier => (3_000, 5_000, 1_500),
        Tier::Macro => (10_000, 18_000, 5_000),
        Tier::Mega => (25_000, 45_000, 12_000),
    }
}

/// Niche pricing multipliers, matched case-insensitively as substrings
/// of the channel's category labels. The highest matching multiplier
/// wins; channels with no match price as General at 1.0.
const NICHE_MULTIPLIERS: &[(&str, f64)] = &[
    ("Finance", 1.5),
    ("Business", 1.4),
    ("Technology", 1.3),
    ("Science", 1.2),
    ("Health", 1.2),
    ("Education", 1.1),
    ("Lifestyle", 1.1),
    ("Sports", 1.0),
    ("Gaming", 0.9),
    ("Film", 0.9),
    ("Entertainment", 0.9),
    ("Comedy", 0.85),
    ("Music", 0.8),
];

/// Build the suggested rate card for one channel.
///
/// `sponsorship` is optional so pricing still works when the scan was
/// skipped; experience then reads `Unknown`.
#[must_use]
pub fn generate_rate_card(
    analytics: &AnalyticsResult,
    score: &CompositeScore,
    categories: &[String],
    sponsorship: Option<&SponsorshipReport>,
) -> RateCard {
    let tier = score.tier;
    let (niche_label, niche_multiplier) = pick_niche(categories);
    let engagement_multiplier = engagement_multiplier_for(score.score);
    let combined_multiplier = niche_multiplier * engagement_multiplier;

    let thousands = to_f64(analytics.avg_views) / 1000.0;
    let cpm = cpm_for(tier);
    let (integration_floor, dedicated_floor, shorts_floor) = floors_for(tier);

    let integration = priced(thousands, cpm, 1.0, combined_multiplier, integration_floor);
    let dedicated_video = priced(thousands, cpm, 2.0, combined_multiplier, dedicated_floor);
    // Shorts monetize a slice of regular reach: 60% of average views at
    // a 0.3 deal multiplier.
    let shorts = priced(thousands * 0.6, cpm, 0.3, combined_multiplier, shorts_floor);
    let usage_rights_addon = usage_rights(integration.mid);

    RateCard {
        tier,
        niche_label: niche_label.to_string(),
        niche_multiplier,
        engagement_multiplier,
        combined_multiplier,
        integration,
        dedicated_video,
        shorts,
        usage_rights_addon,
        experience: experience_label(sponsorship).to_string(),
    }
}

fn pick_niche(categories: &[String]) -> (&'static str, f64) {
    let lowered: Vec<String> = categories.iter().map(|c| c.to_lowercase()).collect();
    let mut best: Option<(&'static str, f64)> = None;
    for (name, multiplier) in NICHE_MULTIPLIERS {
        let needle = name.to_lowercase();
        if lowered.iter().any(|label| label.contains(&needle)) {
            match best {
                Some((_, current)) if current >= *multiplier => {}
                _ => best = Some((name, *multiplier)),
            }
        }
    }
    best.unwrap_or(("General", 1.0))
}

/// Step multiplier from the composite score. Strong channels command a
/// premium; weak ones discount.
fn engagement_multiplier_for(score: u8) -> f64 {
    match score {
        80..=u8::MAX => 1.25,
        65..=79 => 1.10,
        50..=64 => 1.0,
        35..=49 => 0.85,
        _ => 0.7,
    }
}

fn experience_label(sponsorship: Option<&SponsorshipReport>) -> &'static str {
    match sponsorship {
        None => "Unknown",
        Some(report) => match report.videos_detected {
            10.. => "Very experienced",
            5..=9 => "Experienced",
            1..=4 => "Some experience",
            0 => "No sponsorship history",
        },
    }
}

/// Price one deal type. CPM maths first, then the per-tier floor: low
/// at the floor itself, mid at 1.5x, high at 2.5x, which keeps every
/// band non-decreasing whichever side dominates.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn priced(
    thousands: f64,
    cpm: (f64, f64, f64),
    deal_multiplier: f64,
    combined: f64,
    floor: u64,
) -> PricedRange {
    let floor = to_f64(floor);
    let price = |per_mille: f64| (thousands * per_mille * deal_multiplier * combined).round();
    PricedRange {
        low: price(cpm.0).max(floor) as u64,
        mid: price(cpm.1).max(floor * 1.5) as u64,
        high: price(cpm.2).max(floor * 2.5) as u64,
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn usage_rights(integration_mid: u64) -> PricedRange {
    let mid = to_f64(integration_mid);
    PricedRange {
        low: (mid * 0.30).round() as u64,
        mid: (mid * 0.65).round() as u64,
        high: integration_mid,
    }
}
