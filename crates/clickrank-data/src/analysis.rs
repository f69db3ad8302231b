//! Main analysis pipeline for clickrank.
//!
//! Loads both datasets, indexes the registry, counts the target year's
//! clicks and ranks the destinations, returning an [`AnalysisResult`].

use std::io::Read;
use std::path::Path;
use std::time::Instant;

use chrono::Utc;
use clickrank_core::error::Result;
use clickrank_core::models::{ClickEvent, LinkRecord, RankedEntry};
use tracing::info;

use crate::aggregator::ClickAggregator;
use crate::index::LinkIndexBuilder;
use crate::reader::{load_click_events, load_link_records, read_click_events, read_link_records};
use crate::report::RankedReporter;

// ── Public types ──────────────────────────────────────────────────────────────

/// Metadata produced alongside the ranking.
#[derive(Debug, Clone, serde::Serialize)]
pub struct AnalysisMetadata {
    /// ISO-8601 timestamp when this result was generated.
    pub generated_at: String,
    /// Year whose clicks were counted.
    pub target_year: i32,
    /// Distinct link identifiers in the registry.
    pub links_indexed: usize,
    /// Distinct destination URLs in the registry.
    pub destinations: usize,
    /// Click events read from the event dataset.
    pub events_read: usize,
    /// Events that resolved to a destination and were counted.
    pub clicks_counted: usize,
    /// Events skipped for falling outside `target_year`.
    pub events_out_of_year: usize,
    /// In-year events whose link is not in the registry.
    pub events_unmatched: usize,
    /// Wall-clock seconds spent reading and parsing both datasets.
    pub load_time_seconds: f64,
    /// Wall-clock seconds spent indexing, counting and ranking.
    pub aggregate_time_seconds: f64,
}

/// The complete output of [`analyze_clicks`].
///
/// Serializes as `{"metadata": {...}, "ranking": [{"<url>": <clicks>}, ...]}`.
#[derive(Debug, Clone, serde::Serialize)]
pub struct AnalysisResult {
    /// Metadata about this analysis run.
    pub metadata: AnalysisMetadata,
    /// Destinations ordered by clicks descending, then URL ascending.
    pub ranking: Vec<RankedEntry>,
}

impl AnalysisResult {
    /// Sum of clicks across the ranking.
    pub fn total_clicks(&self) -> u64 {
        self.ranking.iter().map(|e| e.clicks).sum()
    }
}

// ── Public functions ──────────────────────────────────────────────────────────

/// Run the full pipeline over the registry CSV at `encodes` and the click
/// JSON at `decodes`.
///
/// 1. Load both datasets (each file is closed once parsed).
/// 2. Build the link index and zeroed counters.
/// 3. Count clicks from `target_year`.
/// 4. Rank the destinations.
///
/// The first error from any step is returned and no ranking is produced.
pub fn analyze_clicks(encodes: &Path, decodes: &Path, target_year: i32) -> Result<AnalysisResult> {
    let load_start = Instant::now();
    let records = load_link_records(encodes)?;
    let events = load_click_events(decodes)?;
    let load_time = load_start.elapsed().as_secs_f64();

    run_pipeline(&records, &events, target_year, load_time)
}

/// Same as [`analyze_clicks`] but over already-open byte streams.
pub fn analyze_readers<R1: Read, R2: Read>(
    registry: R1,
    clicks: R2,
    target_year: i32,
) -> Result<AnalysisResult> {
    let load_start = Instant::now();
    let records = read_link_records(registry)?;
    let events = read_click_events(clicks)?;
    let load_time = load_start.elapsed().as_secs_f64();

    run_pipeline(&records, &events, target_year, load_time)
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn run_pipeline(
    records: &[LinkRecord],
    events: &[ClickEvent],
    target_year: i32,
    load_time: f64,
) -> Result<AnalysisResult> {
    let aggregate_start = Instant::now();

    let (index, mut accumulator) = LinkIndexBuilder::from_records(records);
    let stats = ClickAggregator::new(target_year).aggregate(&index, &mut accumulator, events)?;
    let ranking = RankedReporter::rank(&accumulator);

    let aggregate_time = aggregate_start.elapsed().as_secs_f64();

    let metadata = AnalysisMetadata {
        generated_at: Utc::now().to_rfc3339(),
        target_year,
        links_indexed: index.len(),
        destinations: accumulator.len(),
        events_read: stats.events_read,
        clicks_counted: stats.counted,
        events_out_of_year: stats.out_of_year,
        events_unmatched: stats.unmatched,
        load_time_seconds: load_time,
        aggregate_time_seconds: aggregate_time,
    };

    info!(
        "Counted {} of {} clicks for {} across {} destinations",
        metadata.clicks_counted, metadata.events_read, target_year, metadata.destinations
    );

    Ok(AnalysisResult { metadata, ranking })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
