use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by clickrank.
///
/// Every variant is fatal to a run: the pipeline stops at the first one and
/// no ranking is produced.
#[derive(Error, Debug)]
pub enum ClickRankError {
    /// An input file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The link registry is not well-formed CSV (including rows whose field
    /// count differs from the first row).
    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    /// The click-event document could not be parsed.
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// A registry row has fewer than the three required fields.
    #[error("Malformed registry row {row}: expected at least 3 fields, found {fields}")]
    MalformedRecord { row: usize, fields: usize },

    /// A click event's `bitlink` could not be parsed as a URL.
    #[error("Invalid bitlink {bitlink:?}: {reason}")]
    InvalidBitlink { bitlink: String, reason: String },

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Convenience alias used throughout the clickrank crates.
pub type Result<T> = std::result::Result<T, ClickRankError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_file_read() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = ClickRankError::FileRead {
            path: PathBuf::from("/data/encodes.csv"),
            source: io_err,
        };
        let msg = err.to_string();
        assert!(msg.contains("Failed to read file"));
        assert!(msg.contains("/data/encodes.csv"));
        assert!(msg.contains("no such file"));
    }

    #[test]
    fn test_error_display_malformed_record() {
        let err = ClickRankError::MalformedRecord { row: 4, fields: 2 };
        assert_eq!(
            err.to_string(),
            "Malformed registry row 4: expected at least 3 fields, found 2"
        );
    }

    #[test]
    fn test_error_display_invalid_bitlink() {
        let err = ClickRankError::InvalidBitlink {
            bitlink: "%foo.html".to_string(),
            reason: "invalid percent escape \"%fo\"".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid bitlink \"%foo.html\": invalid percent escape \"%fo\""
        );
    }

    #[test]
    fn test_error_display_config() {
        let err = ClickRankError::Config("unknown output format: xml".to_string());
        assert_eq!(err.to_string(), "Configuration error: unknown output format: xml");
    }

    #[test]
    fn test_error_from_serde_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("[{").unwrap_err();
        let err: ClickRankError = json_err.into();
        assert!(err.to_string().contains("Failed to parse JSON"));
    }

    #[test]
    fn test_error_from_csv() {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_reader("a,b,c\nd,e,f,g\n".as_bytes());
        let csv_err = reader
            .records()
            .find_map(|r| r.err())
            .expect("unequal row lengths must fail");
        let err: ClickRankError = csv_err.into();
        assert!(err.to_string().contains("Failed to parse CSV"));
    }
}
