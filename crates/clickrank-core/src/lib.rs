//! Shared types for clickrank.
//!
//! Domain models, link identifier normalization, the error type, CLI
//! settings and report formatting.

pub mod error;
pub mod formatting;
pub mod identifiers;
pub mod models;
pub mod settings;

pub use error::{ClickRankError, Result};
