//! Click counting against the link index.

use clickrank_core::error::Result;
use clickrank_core::identifiers::bitlink_identifier;
use clickrank_core::models::{ClickAccumulator, ClickEvent, LinkIndex};
use tracing::debug;

// ── ClickOutcome ──────────────────────────────────────────────────────────────

/// What happened to a single click event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// The click resolved to a destination and was counted.
    Counted,
    /// The click falls outside the target year.
    OutOfYear,
    /// The short link is not in the registry.
    Unmatched,
}

// ── AggregationStats ──────────────────────────────────────────────────────────

/// Tally of outcomes over a batch of events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AggregationStats {
    pub events_read: usize,
    pub counted: usize,
    pub out_of_year: usize,
    pub unmatched: usize,
}

impl AggregationStats {
    fn record(&mut self, outcome: ClickOutcome) {
        self.events_read += 1;
        match outcome {
            ClickOutcome::Counted => self.counted += 1,
            ClickOutcome::OutOfYear => self.out_of_year += 1,
            ClickOutcome::Unmatched => self.unmatched += 1,
        }
    }
}

// ── ClickAggregator ───────────────────────────────────────────────────────────

/// Counts clicks from one calendar year into a [`ClickAccumulator`].
#[derive(Debug, Clone, Copy)]
pub struct ClickAggregator {
    target_year: i32,
}

impl ClickAggregator {
    pub fn new(target_year: i32) -> Self {
        Self { target_year }
    }

    pub fn target_year(&self) -> i32 {
        self.target_year
    }

    /// Apply a single event.
    ///
    /// The year filter runs first, so an event from another year is skipped
    /// even when its `bitlink` would not parse.
    ///
    /// # Errors
    ///
    /// Returns [`ClickRankError::InvalidBitlink`] for an in-year event whose
    /// `bitlink` is not a URL. The accumulator is untouched in that case.
    ///
    /// [`ClickRankError::InvalidBitlink`]: clickrank_core::error::ClickRankError::InvalidBitlink
    pub fn record(
        &self,
        index: &LinkIndex,
        accumulator: &mut ClickAccumulator,
        event: &ClickEvent,
    ) -> Result<ClickOutcome> {
        if event.year() != self.target_year {
            return Ok(ClickOutcome::OutOfYear);
        }

        let identifier = bitlink_identifier(&event.bitlink)?;
        let counted = index
            .resolve(&identifier)
            .is_some_and(|destination| accumulator.increment(destination));

        if counted {
            Ok(ClickOutcome::Counted)
        } else {
            Ok(ClickOutcome::Unmatched)
        }
    }

    /// Apply every event in order, stopping at the first error.
    pub fn aggregate(
        &self,
        index: &LinkIndex,
        accumulator: &mut ClickAccumulator,
        events: &[ClickEvent],
    ) -> Result<AggregationStats> {
        let mut stats = AggregationStats::default();
        for event in events {
            stats.record(self.record(index, accumulator, event)?);
        }

        debug!(
            "Year {}: {} events read, {} counted, {} out of year, {} unmatched",
            self.target_year, stats.events_read, stats.counted, stats.out_of_year, stats.unmatched
        );

        Ok(stats)
    }
}

impl Default for ClickAggregator {
    fn default() -> Self {
        Self::new(clickrank_core::models::DEFAULT_TARGET_YEAR)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
