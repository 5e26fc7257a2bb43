//! Sponsorship signal scanner.
//!
//! Scans video descriptions for four families of signals: disclosure
//! hashtags, sponsorship phrasing, affiliate/tracking links, and promo
//! codes. A video counts as detected when any family fires. The tables
//! below are ordered static data; scanning never branches on anything
//! but them.

use std::collections::{BTreeSet, HashMap};

use creatorlens_core::VideoRecord;
use regex::Regex;

use crate::types::{BrandMention, SponsorshipReport, VideoSignals};

/// FTC-style disclosure hashtags, matched as case-insensitive substrings.
const DISCLOSURE_TAGS: &[&str] = &[
    "#ad",
    "#sponsored",
    "#paidpartnership",
    "#paidpromotion",
    "#sponsoredby",
    "#brandpartner",
    "#gifted",
];

/// Sponsorship phrasing in priority order; the first phrase found in a
/// video wins and becomes that video's phrase signal. All entries are
/// plain case-insensitive substrings except [`THANKS_PHRASE`], which is
/// matched as a pattern around the brand name.
const SPONSOR_PHRASES: &[&str] = &[
    "sponsored by",
    "brought to you by",
    THANKS_PHRASE,
    "paid partnership",
    "in partnership with",
    "partnered with",
    "use my code",
    "use code",
    "use my link",
    "discount code",
    "promo code",
    "coupon code",
];

const THANKS_PHRASE: &str = "thanks to X for sponsoring";

/// Affiliate and tracking link fingerprints: network name to URL
/// substring. A hit records the network and tallies a brand mention
/// under the same name.
const AFFILIATE_NETWORKS: &[(&str, &str)] = &[
    ("Amazon Associates", "amzn.to"),
    ("ShareASale", "shareasale.com"),
    ("Impact Radius", "impact.com"),
    ("Rakuten", "linksynergy.com"),
    ("Awin", "awin1.com"),
    ("PartnerStack", "partnerstack.com"),
    ("Bitly", "bit.ly/"),
    ("Linktree", "linktr.ee/"),
    ("UTM tracking", "utm_source="),
    ("NordVPN", "nordvpn.com"),
    ("ExpressVPN", "expressvpn.com"),
    ("Squarespace", "squarespace.com"),
    ("Skillshare", "skl.sh/"),
    ("Audible", "audible.com"),
    ("HelloFresh", "hellofresh.com"),
    ("Honey", "joinhoney.com"),
    ("Raycon", "buyraycon.com"),
];

/// Generic words that look like promo codes but never are.
const PROMO_DENYLIST: &[&str] = &[
    "THE", "FOR", "AND", "YOU", "USE", "GET", "OFF", "ALL", "NEW", "NOW", "FREE", "HERE", "WITH",
    "YOUR", "THIS", "THAT", "FROM", "SAVE", "LINK", "BELOW",
];

/// Scan the analyzed uploads for sponsorship activity.
///
/// An empty input produces a zeroed report with a disclosure rate of
/// 100, since nothing was detected that could lack disclosure.
#[must_use]
pub fn detect_sponsorship(videos: &[VideoRecord]) -> SponsorshipReport {
    let thanks_sponsor =
        Regex::new(r"(?i)thanks\s+to\s+@?([A-Za-z0-9][A-Za-z0-9&.' -]{0,39}?)\s+for\s+sponsor")
            .expect("valid thanks-sponsor regex");
    // Window is one char wider than the 40-char brand limit; a run that
    // fills it is over the limit and clean_brand drops it.
    let brand_after =
        Regex::new(r"(?i)(?:sponsored\s+by|brought\s+to\s+you\s+by)\s+@?([A-Za-z0-9][A-Za-z0-9&.' -]{0,40})")
            .expect("valid brand-capture regex");
    let promo_code =
        Regex::new(r"(?i)\bcode[:\s]+([A-Za-z0-9_-]{3,20})\b").expect("valid promo-code regex");

    let mut videos_detected = 0usize;
    let mut videos_disclosed = 0usize;
    let mut brand_counts: HashMap<String, u32> = HashMap::new();
    let mut promo_codes: BTreeSet<String> = BTreeSet::new();
    let mut networks: BTreeSet<String> = BTreeSet::new();
    let mut video_signals: Vec<VideoSignals> = Vec::new();

    for video in videos {
        let text = &video.description;
        let lower = text.to_lowercase();
        let mut signals: Vec<String> = Vec::new();

        for tag in DISCLOSURE_TAGS {
            if lower.contains(tag) {
                signals.push(format!("disclosure:{tag}"));
            }
        }
        let disclosed = !signals.is_empty();

        let phrase_hit = SPONSOR_PHRASES.iter().find(|phrase| {
            if **phrase == THANKS_PHRASE {
                thanks_sponsor.is_match(text)
            } else {
                lower.contains(**phrase)
            }
        });
        if let Some(phrase) = phrase_hit {
            signals.push(format!("phrase:{phrase}"));
        }

        // Brand capture runs over the whole description regardless of
        // which phrase won, so "sponsored by A ... thanks to B" tallies
        // both brands.
        for caps in brand_after.captures_iter(text) {
            if let Some(name) = caps.get(1).and_then(|m| clean_brand(m.as_str())) {
                *brand_counts.entry(name).or_insert(0) += 1;
            }
        }
        for caps in thanks_sponsor.captures_iter(text) {
            if let Some(name) = caps.get(1).and_then(|m| clean_brand(m.as_str())) {
                *brand_counts.entry(name).or_insert(0) += 1;
            }
        }

        for (name, needle) in AFFILIATE_NETWORKS {
            if lower.contains(needle) {
                signals.push(format!("affiliate:{name}"));
                networks.insert((*name).to_string());
                *brand_counts.entry((*name).to_string()).or_insert(0) += 1;
            }
        }

        for caps in promo_code.captures_iter(text) {
            if let Some(token) = caps.get(1) {
                let code = token.as_str().to_uppercase();
                if !PROMO_DENYLIST.contains(&code.as_str()) {
                    signals.push(format!("promo:{code}"));
                    promo_codes.insert(code);
                }
            }
        }

        if !signals.is_empty() {
            videos_detected += 1;
            if disclosed {
                videos_disclosed += 1;
            }
            video_signals.push(VideoSignals {
                video_id: video.id.clone(),
                signals,
            });
        }
    }

    let sponsorship_rate_pct = whole_pct(videos_detected, videos.len());
    let disclosure_rate_pct = if videos_detected == 0 {
        100
    } else {
        whole_pct(videos_disclosed, videos_detected)
    };

    let mut brands: Vec<BrandMention> = brand_counts
        .into_iter()
        .map(|(name, mentions)| BrandMention { name, mentions })
        .collect();
    brands.sort_by(|a, b| b.mentions.cmp(&a.mentions).then_with(|| a.name.cmp(&b.name)));

    SponsorshipReport {
        videos_scanned: videos.len(),
        videos_detected,
        sponsorship_rate_pct,
        label: rate_label(sponsorship_rate_pct).to_string(),
        disclosure_found: videos_disclosed > 0,
        disclosure_rate_pct,
        brands,
        promo_codes: promo_codes.into_iter().collect(),
        affiliate_networks: networks.into_iter().collect(),
        video_signals,
    }
}

fn rate_label(rate_pct: u8) -> &'static str {
    match rate_pct {
        60..=u8::MAX => "very high",
        35..=59 => "high",
        15..=34 => "moderate",
        1..=14 => "low",
        0 => "none",
    }
}

/// Tidy a captured brand name: cut at sentence or list separators the
/// capture window may have swallowed, then enforce the 2-40 char range.
fn clean_brand(raw: &str) -> Option<String> {
    let mut name = raw;
    for sep in [". ", " - ", " | "] {
        if let Some((head, _)) = name.split_once(sep) {
            name = head;
        }
    }
    let name = name.trim().trim_end_matches('.').trim_end();
    let len = name.chars().count();
    if (2..=40).contains(&len) {
        Some(name.to_string())
    } else {
        None
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
fn whole_pct(part: usize, whole: usize) -> u8 {
    if whole == 0 {
        return 0;
    }
    (part as f64 / whole as f64 * 100.0).round() as u8
}
