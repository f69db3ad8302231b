//! Ordering of the per-destination counters into the final ranking.

use clickrank_core::models::{ClickAccumulator, RankedEntry};

/// Turns a [`ClickAccumulator`] into a ranked list.
pub struct RankedReporter;

impl RankedReporter {
    /// One entry per destination, most clicks first.
    ///
    /// Equal counts are ordered by destination URL ascending, so the output
    /// is identical across runs.
    pub fn rank(accumulator: &ClickAccumulator) -> Vec<RankedEntry> {
        let mut entries: Vec<RankedEntry> = accumulator
            .iter()
            .map(|(url, clicks)| RankedEntry::new(url, clicks))
            .collect();

        entries.sort_by(|a, b| {
            b.clicks
                .cmp(&a.clicks)
                .then_with(|| a.destination_url.cmp(&b.destination_url))
        });
        entries
    }
}
