//! Builds the join table and the zeroed click counters from the registry.

use clickrank_core::models::{ClickAccumulator, LinkIndex, LinkRecord};
use tracing::{debug, warn};

// ── LinkIndexBuilder ──────────────────────────────────────────────────────────

/// Accumulates registry records into a [`LinkIndex`] plus a
/// [`ClickAccumulator`] that already holds every destination at zero.
///
/// When two records share an identifier the later one wins. The destination
/// it displaces stays in the accumulator, so it is still reported (with
/// whatever clicks other identifiers bring it).
#[derive(Debug, Default)]
pub struct LinkIndexBuilder {
    index: LinkIndex,
    accumulator: ClickAccumulator,
    duplicates: usize,
}

impl LinkIndexBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index a whole registry in one call.
    pub fn from_records(records: &[LinkRecord]) -> (LinkIndex, ClickAccumulator) {
        let mut builder = Self::new();
        for record in records {
            builder.add(record);
        }
        builder.build()
    }

    /// Add one registry record.
    pub fn add(&mut self, record: &LinkRecord) {
        let displaced = self
            .index
            .insert(&record.link_identifier, &record.destination_url);

        if let Some(previous) = displaced {
            if previous != record.destination_url {
                warn!(
                    "Link {} redefined: {} replaces {}",
                    record.link_identifier, record.destination_url, previous
                );
            }
            self.duplicates += 1;
        }

        self.accumulator.seed(record.destination_url.as_str());
    }

    /// Finish indexing.
    pub fn build(self) -> (LinkIndex, ClickAccumulator) {
        debug!(
            "Indexed {} links to {} destinations ({} duplicate identifiers)",
            self.index.len(),
            self.accumulator.len(),
            self.duplicates
        );
        (self.index, self.accumulator)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
