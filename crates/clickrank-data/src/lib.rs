//! Data pipeline for clickrank.
//!
//! Reads the link registry and the click events, builds the link index,
//! counts one year's clicks per destination and ranks the result.

pub mod aggregator;
pub mod analysis;
pub mod index;
pub mod reader;
pub mod report;

pub use clickrank_core as core;
