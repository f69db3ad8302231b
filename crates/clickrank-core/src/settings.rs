use clap::Parser;
use std::path::PathBuf;

use crate::models::DEFAULT_TARGET_YEAR;

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Rank short-link destinations by clicks in a given year
#[derive(Parser, Debug, Clone)]
#[command(
    name = "clickrank",
    about = "Rank short-link destinations by clicks in a given year",
    version
)]
pub struct Settings {
    /// Link registry CSV (long_url,domain,hash); the first row is a header
    #[arg(long, env = "CLICKRANK_ENCODES", default_value = "encodes.csv")]
    pub encodes: PathBuf,

    /// Click events as a JSON array of {bitlink, timestamp} objects
    #[arg(long, env = "CLICKRANK_DECODES", default_value = "decodes.json")]
    pub decodes: PathBuf,

    /// Only clicks in this calendar year are counted
    #[arg(long, env = "CLICKRANK_YEAR", default_value_t = DEFAULT_TARGET_YEAR)]
    pub year: i32,

    /// Report format
    #[arg(long, env = "CLICKRANK_FORMAT", default_value = "json", value_parser = ["json", "pretty", "table", "full"])]
    pub format: String,

    /// Logging level
    #[arg(long, env = "CLICKRANK_LOG_LEVEL", default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR"])]
    pub log_level: String,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

// ── Settings impl ──────────────────────────────────────────────────────────────

impl Settings {
    /// Parse the process arguments and apply the `--debug` override.
    pub fn load() -> Self {
        Self::load_from_args(std::env::args_os())
    }

    /// Same as [`load`](Self::load) but accepts an explicit argument list,
    /// enabling unit-testing without spawning subprocesses.
    pub fn load_from_args<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::resolve(Settings::parse_from(args))
    }

    fn resolve(mut settings: Settings) -> Settings {
        // --debug overrides log level.
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }
        settings
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
