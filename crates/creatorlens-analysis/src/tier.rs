//! Channel size tiers.
//!
//! Every downstream table (engagement benchmarks, CPM ranges, deal floors)
//! is keyed by tier, so classification happens once and the tier value is
//! threaded through the rest of the pipeline.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Subscriber-count bracket a channel falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tier {
    /// Up to 9,999 subscribers.
    Nano,
    /// 10,000 to 49,999 subscribers.
    Micro,
    /// 50,000 to 499,999 subscribers.
    #[serde(rename = "Mid-Tier")]
    MidTier,
    /// 500,000 to 999,999 subscribers.
    Macro,
    /// 1,000,000 subscribers and up.
    Mega,
}

impl Tier {
    /// Classify a channel by subscriber count. Total over all of `u64`,
    /// so there is no fall-through bracket.
    #[must_use]
    pub fn classify(subscriber_count: u64) -> Self {
        match subscriber_count {
            0..=9_999 => Self::Nano,
            10_000..=49_999 => Self::Micro,
            50_000..=499_999 => Self::MidTier,
            500_000..=999_999 => Self::Macro,
            _ => Self::Mega,
        }
    }

    /// Human-readable tier label as it appears in reports.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Nano => "Nano",
            Self::Micro => "Micro",
            Self::MidTier => "Mid-Tier",
            Self::Macro => "Macro",
            Self::Mega => "Mega",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_covers_every_bracket() {
        assert_eq!(Tier::classify(500), Tier::Nano);
        assert_eq!(Tier::classify(25_000), Tier::Micro);
        assert_eq!(Tier::classify(250_000), Tier::MidTier);
        assert_eq!(Tier::classify(750_000), Tier::Macro);
        assert_eq!(Tier::classify(5_000_000), Tier::Mega);
    }

    #[test]
    fn classify_boundaries_are_inclusive() {
        assert_eq!(Tier::classify(0), Tier::Nano);
        assert_eq!(Tier::classify(9_999), Tier::Nano);
        assert_eq!(Tier::classify(10_000), Tier::Micro);
        assert_eq!(Tier::classify(49_999), Tier::Micro);
        assert_eq!(Tier::classify(50_000), Tier::MidTier);
        assert_eq!(Tier::classify(499_999), Tier::MidTier);
        assert_eq!(Tier::classify(500_000), Tier::Macro);
        assert_eq!(Tier::classify(999_999), Tier::Macro);
        assert_eq!(Tier::classify(1_000_000), Tier::Mega);
    }

    #[test]
    fn mid_tier_label_is_hyphenated() {
        assert_eq!(Tier::MidTier.label(), "Mid-Tier");
        assert_eq!(Tier::Mega.to_string(), "Mega");
    }

    #[test]
    fn tier_serializes_as_its_label() {
        let json = serde_json::to_string(&Tier::MidTier).unwrap();
        assert_eq!(json, "\"Mid-Tier\"");
    }
}
