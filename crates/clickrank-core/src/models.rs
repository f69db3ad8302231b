use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Datelike, FixedOffset};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// Calendar year whose clicks are counted when nothing else is configured.
pub const DEFAULT_TARGET_YEAR: i32 = 2021;

/// One row of the link registry, already normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRecord {
    /// Long-form URL the short link redirects to.
    pub destination_url: String,
    /// Join key in `domain/path` form.
    pub link_identifier: String,
}

/// A single click on a short link, read from the event dataset.
///
/// Fields other than `bitlink` and `timestamp` (user agent, referrer,
/// remote IP, ...) are ignored on deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClickEvent {
    /// Raw short link in `scheme://host/path` form.
    pub bitlink: String,
    /// RFC 3339 time of the click, kept in the offset it was recorded in.
    pub timestamp: DateTime<FixedOffset>,
}

impl ClickEvent {
    /// Calendar year of the click in its recorded offset.
    pub fn year(&self) -> i32 {
        self.timestamp.year()
    }
}

// ── LinkIndex ─────────────────────────────────────────────────────────────────

/// Join table from normalized link identifier to destination URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkIndex {
    links: HashMap<String, String>,
}

impl LinkIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map `identifier` to `destination_url`, returning the destination it
    /// previously pointed at, if any.
    pub fn insert(
        &mut self,
        identifier: impl Into<String>,
        destination_url: impl Into<String>,
    ) -> Option<String> {
        self.links.insert(identifier.into(), destination_url.into())
    }

    /// Destination URL for `identifier`, if the link is tracked.
    pub fn resolve(&self, identifier: &str) -> Option<&str> {
        self.links.get(identifier).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

// ── ClickAccumulator ──────────────────────────────────────────────────────────

/// Per-destination click counters.
///
/// Keys are fixed when the registry is indexed; counting never introduces
/// a new destination.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClickAccumulator {
    counts: BTreeMap<String, u64>,
}

impl ClickAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `destination_url` with a count of zero. Already-known
    /// destinations keep their current count.
    pub fn seed(&mut self, destination_url: impl Into<String>) {
        self.counts.entry(destination_url.into()).or_insert(0);
    }

    /// Add one click to `destination_url`.
    ///
    /// Returns `false` and changes nothing when the destination was never
    /// seeded.
    pub fn increment(&mut self, destination_url: &str) -> bool {
        match self.counts.get_mut(destination_url) {
            Some(count) => {
                *count += 1;
                true
            }
            None => false,
        }
    }

    pub fn get(&self, destination_url: &str) -> Option<u64> {
        self.counts.get(destination_url).copied()
    }

    /// Sum of all counters.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Iterate `(destination_url, count)` pairs in URL order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(url, count)| (url.as_str(), *count))
    }
}

// ── RankedEntry ───────────────────────────────────────────────────────────────

/// One line of the final ranking.
///
/// Serializes as a single-key object, `{"<destination_url>": <clicks>}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedEntry {
    pub destination_url: String,
    pub clicks: u64,
}

impl RankedEntry {
    pub fn new(destination_url: impl Into<String>, clicks: u64) -> Self {
        Self {
            destination_url: destination_url.into(),
            clicks,
        }
    }
}

impl Serialize for RankedEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.destination_url, &self.clicks)?;
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── ClickEvent ────────────────────────────────────────────────────────────

    #[test]
    fn test_click_event_deserialize_ignores_extra_fields() {
        let json = r#"{"bitlink": "http://bit.ly/3hxENM5", "user_agent": "ice king",
            "timestamp": "2021-05-13T00:00:00Z", "referrer": "pepperment butler",
            "remote_ip": "123"}"#;
        let event: ClickEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.bitlink, "http://bit.ly/3hxENM5");
        assert_eq!(event.year(), 2021);
    }

    #[test]
    fn test_click_event_year_uses_recorded_offset() {
        // 2022-01-01T04:30:00Z in UTC, but still 2021 where it was recorded.
        let json = r#"{"bitlink": "http://bit.ly/x", "timestamp": "2021-12-31T23:30:00-05:00"}"#;
        let event: ClickEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.year(), 2021);
    }

    #[test]
    fn test_click_event_missing_timestamp_is_error() {
        let json = r#"{"bitlink": "http://bit.ly/x"}"#;
        assert!(serde_json::from_str::<ClickEvent>(json).is_err());
    }

    // ── LinkIndex ─────────────────────────────────────────────────────────────

    #[test]
    fn test_link_index_insert_and_resolve() {
        let mut index = LinkIndex::new();
        assert!(index.insert("bit.ly/x", "https://a.com/").is_none());
        assert_eq!(index.resolve("bit.ly/x"), Some("https://a.com/"));
        assert_eq!(index.resolve("bit.ly/y"), None);
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_link_index_insert_returns_displaced_destination() {
        let mut index = LinkIndex::new();
        index.insert("bit.ly/x", "https://a.com/");
        let old = index.insert("bit.ly/x", "https://b.com/");
        assert_eq!(old.as_deref(), Some("https://a.com/"));
        assert_eq!(index.resolve("bit.ly/x"), Some("https://b.com/"));
    }

    // ── ClickAccumulator ──────────────────────────────────────────────────────

    #[test]
    fn test_accumulator_seed_is_idempotent() {
        let mut acc = ClickAccumulator::new();
        acc.seed("https://a.com/");
        assert!(acc.increment("https://a.com/"));
        acc.seed("https://a.com/");
        assert_eq!(acc.get("https://a.com/"), Some(1));
        assert_eq!(acc.len(), 1);
    }

    #[test]
    fn test_accumulator_increment_unknown_is_noop() {
        let mut acc = ClickAccumulator::new();
        acc.seed("https://a.com/");
        assert!(!acc.increment("https://nope.com/"));
        assert_eq!(acc.get("https://nope.com/"), None);
        assert_eq!(acc.total(), 0);
    }

    #[test]
    fn test_accumulator_iter_in_url_order() {
        let mut acc = ClickAccumulator::new();
        acc.seed("https://b.com/");
        acc.seed("https://a.com/");
        acc.increment("https://b.com/");
        let pairs: Vec<(&str, u64)> = acc.iter().collect();
        assert_eq!(pairs, vec![("https://a.com/", 0), ("https://b.com/", 1)]);
        assert_eq!(acc.total(), 1);
    }

    // ── RankedEntry ───────────────────────────────────────────────────────────

    #[test]
    fn test_ranked_entry_serializes_as_single_key_object() {
        let entries = vec![
            RankedEntry::new("https://reddit.com/", 542),
            RankedEntry::new("https://linkedin.com/", 529),
        ];
        let json = serde_json::to_string(&entries).unwrap();
        assert_eq!(
            json,
            r#"[{"https://reddit.com/":542},{"https://linkedin.com/":529}]"#
        );
    }
}
