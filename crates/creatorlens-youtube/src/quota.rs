//! Quota accounting for the YouTube Data API.
//!
//! Every call charges a fixed unit cost against the project's daily quota
//! (10,000 units on the free tier). The list endpoints cost 1 unit per page;
//! `search.list` costs 100, which is why channel resolution tries every
//! cheaper strategy before falling back to search.

use std::sync::atomic::{AtomicU64, Ordering};

use creatorlens_core::QuotaSnapshot;

/// Unit cost of one page of `channels.list`, `playlistItems.list` or
/// `videos.list`.
pub const LIST_COST: u64 = 1;

/// Unit cost of one `search.list` call.
pub const SEARCH_COST: u64 = 100;

/// Tally of quota units and HTTP requests spent by one client.
///
/// Shared by reference across concurrent channel evaluations, so the
/// counters are atomic and all methods take `&self`.
#[derive(Debug, Default)]
pub struct QuotaLedger {
    units: AtomicU64,
    requests: AtomicU64,
}

impl QuotaLedger {
    /// Records one request costing `units`.
    pub fn charge(&self, units: u64) {
        self.units.fetch_add(units, Ordering::Relaxed);
        self.requests.fetch_add(1, Ordering::Relaxed);
    }

    /// Current totals.
    #[must_use]
    pub fn snapshot(&self) -> QuotaSnapshot {
        QuotaSnapshot {
            units_used: self.units.load(Ordering::Relaxed),
            requests: self.requests.load(Ordering::Relaxed),
        }
    }
}
