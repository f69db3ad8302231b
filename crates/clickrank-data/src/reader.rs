//! Dataset loading for clickrank.
//!
//! Reads the link registry (CSV) and the click events (a JSON array) into
//! [`LinkRecord`] and [`ClickEvent`] values for the pipeline. Any structural
//! problem in either dataset is an error; nothing is skipped.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use clickrank_core::error::{ClickRankError, Result};
use clickrank_core::identifiers::registry_identifier;
use clickrank_core::models::{ClickEvent, LinkRecord};
use tracing::debug;

/// Fields a registry row needs: long URL, domain, path segment.
const REGISTRY_FIELDS: usize = 3;

// ── Public API ────────────────────────────────────────────────────────────────

/// Parse the link registry from CSV.
///
/// The first row is a header and is dropped whatever it contains. Every
/// other row yields one [`LinkRecord`] from columns 0 (destination URL),
/// 1 (domain) and 2 (path segment); further columns are ignored.
///
/// # Errors
///
/// * [`ClickRankError::Csv`] when the CSV is malformed, including a row
///   whose field count differs from the first row's.
/// * [`ClickRankError::MalformedRecord`] when rows have fewer than three
///   fields. `row` is 1-based and counts the header.
pub fn read_link_records<R: Read>(reader: R) -> Result<Vec<LinkRecord>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_reader(reader);

    let mut records = Vec::new();
    for (row, result) in csv_reader.records().enumerate() {
        let record = result?;
        if row == 0 {
            continue;
        }
        if record.len() < REGISTRY_FIELDS {
            return Err(ClickRankError::MalformedRecord {
                row: row + 1,
                fields: record.len(),
            });
        }
        records.push(LinkRecord {
            destination_url: record[0].to_string(),
            link_identifier: registry_identifier(&record[1], &record[2]),
        });
    }

    Ok(records)
}

/// Parse click events from a JSON array of objects.
///
/// Each object needs a `bitlink` string and an RFC 3339 `timestamp`; other
/// keys are ignored.
pub fn read_click_events<R: Read>(reader: R) -> Result<Vec<ClickEvent>> {
    let events: Vec<ClickEvent> = serde_json::from_reader(BufReader::new(reader))?;
    Ok(events)
}

/// Open `path` and parse it with [`read_link_records`].
///
/// The file handle is released before this returns.
pub fn load_link_records(path: &Path) -> Result<Vec<LinkRecord>> {
    let records = read_link_records(open(path)?)?;
    debug!("Loaded {} registry rows from {}", records.len(), path.display());
    Ok(records)
}

/// Open `path` and parse it with [`read_click_events`].
///
/// The file handle is released before this returns.
pub fn load_click_events(path: &Path) -> Result<Vec<ClickEvent>> {
    let events = read_click_events(open(path)?)?;
    debug!("Loaded {} click events from {}", events.len(), path.display());
    Ok(events)
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|source| ClickRankError::FileRead {
        path: path.to_path_buf(),
        source,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
