//! Rendering of a finished ranking for the terminal or for other tools.

use crate::error::{ClickRankError, Result};
use crate::models::RankedEntry;

/// Format an integer count with thousands separators.
///
/// # Examples
///
/// ```
/// use clickrank_core::formatting::format_count;
///
/// assert_eq!(format_count(0), "0");
/// assert_eq!(format_count(542), "542");
/// assert_eq!(format_count(1_234_567), "1,234,567");
/// ```
pub fn format_count(value: u64) -> String {
    group_thousands(&value.to_string())
}

/// Calculate `(part / whole) * 100`, rounded to `decimal_places`.
///
/// Returns `0.0` if `whole` is zero to avoid division by zero.
///
/// # Examples
///
/// ```
/// use clickrank_core::formatting::percentage;
///
/// assert!((percentage(50, 200, 1) - 25.0).abs() < 1e-9);
/// assert_eq!(percentage(0, 0, 2), 0.0);
/// ```
pub fn percentage(part: u64, whole: u64, decimal_places: u32) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    let raw = (part as f64 / whole as f64) * 100.0;
    let factor = 10_f64.powi(decimal_places as i32);
    (raw * factor).round() / factor
}

/// Render `entries` in the named output format.
///
/// * `"json"`   – compact array of single-key objects, one line.
/// * `"pretty"` – the same array, pretty-printed.
/// * `"table"`  – aligned text columns with a totals line.
pub fn render_report(entries: &[RankedEntry], format: &str) -> Result<String> {
    match format {
        "json" => Ok(serde_json::to_string(entries)?),
        "pretty" => Ok(serde_json::to_string_pretty(entries)?),
        "table" => Ok(render_table(entries)),
        other => Err(ClickRankError::Config(format!(
            "unknown output format: {}",
            other
        ))),
    }
}

/// Render `entries` as a ranked text table.
///
/// Ranks are 1-based in the order given; each row shows the click count,
/// its share of all clicks and the destination URL.
pub fn render_table(entries: &[RankedEntry]) -> String {
    let total: u64 = entries.iter().map(|e| e.clicks).sum();

    let counts: Vec<String> = entries.iter().map(|e| format_count(e.clicks)).collect();
    let total_str = format_count(total);
    let rank_width = entries.len().to_string().len().max("RANK".len());
    let count_width = counts
        .iter()
        .map(String::len)
        .chain(std::iter::once(total_str.len()))
        .max()
        .unwrap_or(0)
        .max("CLICKS".len());

    let mut out = String::new();
    out.push_str(&format!(
        "{:>rw$}  {:>cw$}  {:>6}  DESTINATION\n",
        "RANK",
        "CLICKS",
        "SHARE",
        rw = rank_width,
        cw = count_width,
    ));

    for (i, (entry, count)) in entries.iter().zip(&counts).enumerate() {
        out.push_str(&format!(
            "{:>rw$}  {:>cw$}  {:>5.1}%  {}\n",
            i + 1,
            count,
            percentage(entry.clicks, total, 1),
            entry.destination_url,
            rw = rank_width,
            cw = count_width,
        ));
    }

    out.push_str(&format!(
        "{:>rw$}  {:>cw$}  clicks across {} destinations",
        "TOTAL",
        total_str,
        entries.len(),
        rw = rank_width,
        cw = count_width,
    ));
    out
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Insert commas every three digits from the right of an integer string.
fn group_thousands(s: &str) -> String {
    if s.len() <= 3 {
        return s.to_string();
    }
    let chars: Vec<char> = s.chars().collect();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    let remainder = chars.len() % 3;
    for (i, &c) in chars.iter().enumerate() {
        if i != 0 && (i % 3 == remainder) {
            result.push(',');
        }
        result.push(c);
    }
    result
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<RankedEntry> {
        vec![
            RankedEntry::new("https://reddit.com/", 1_500),
            RankedEntry::new("https://linkedin.com/", 500),
        ]
    }

    // ── format_count ─────────────────────────────────────────────────────────

    #[test]
    fn test_format_count_exact_thousands() {
        assert_eq!(format_count(1_000), "1,000");
    }

    #[test]
    fn test_format_count_six_digits() {
        assert_eq!(format_count(999_999), "999,999");
    }

    // ── percentage ───────────────────────────────────────────────────────────

    #[test]
    fn test_percentage_rounding() {
        let p = percentage(1, 3, 2);
        assert!((p - 33.33).abs() < 1e-9, "percentage = {p}");
    }

    #[test]
    fn test_percentage_zero_part() {
        assert_eq!(percentage(0, 100, 2), 0.0);
    }

    // ── render_report ────────────────────────────────────────────────────────

    #[test]
    fn test_render_json_compact() {
        let out = render_report(&sample(), "json").unwrap();
        assert_eq!(
            out,
            r#"[{"https://reddit.com/":1500},{"https://linkedin.com/":500}]"#
        );
    }

    #[test]
    fn test_render_json_empty() {
        assert_eq!(render_report(&[], "json").unwrap(), "[]");
    }

    #[test]
    fn test_render_pretty_parses_back() {
        let out = render_report(&sample(), "pretty").unwrap();
        assert!(out.contains('\n'));
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value[0]["https://reddit.com/"], 1500);
        assert_eq!(value[1]["https://linkedin.com/"], 500);
    }

    #[test]
    fn test_render_unknown_format_is_config_error() {
        let err = render_report(&sample(), "xml").unwrap_err();
        assert!(matches!(err, ClickRankError::Config(_)));
    }

    // ── render_table ─────────────────────────────────────────────────────────

    #[test]
    fn test_render_table_rows_in_order() {
        let out = render_table(&sample());
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].contains("CLICKS"));
        assert!(lines[1].contains("1,500"));
        assert!(lines[1].contains("75.0%"));
        assert!(lines[1].ends_with("https://reddit.com/"));
        assert!(lines[2].contains("25.0%"));
        assert!(lines[2].ends_with("https://linkedin.com/"));
        assert!(lines[3].contains("2,000"));
        assert!(lines[3].ends_with("across 2 destinations"));
    }

    #[test]
    fn test_render_table_zero_clicks() {
        let out = render_table(&[RankedEntry::new("https://a.com/", 0)]);
        assert!(out.contains("0.0%"));
        assert!(out.ends_with("clicks across 1 destinations"));
    }
}
