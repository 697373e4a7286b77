//! Access Log Analysis Pipeline
//!
//! Turns raw access-log text into the three result sets and writes them to disk.
//!
//! Every input line goes through the combined log pattern. Lines that match become a
//! `LogRecord`; everything else is filtered out and only counted. Records are tallied
//! per status code, URL and client address, then ranked by count (ties broken by key)
//! and written as JSON lines, one directory per category.
//!
//! Parsing and tallying run data-parallel. Per-worker tallies are merged by summing
//! counts per key, and only the merged tally is ranked and truncated, so a key that is
//! spread thinly across workers still lands where it belongs globally.
//!
//! The overall data processing architecture is:
//!
//! input path
//! resolve_input
//! classify_line
//! RecordTally
//! AggregationReport
//! write_report
//!

mod aggregate;
mod error;
mod input;
mod parse;
mod run;
mod writer;

#[cfg(test)]
mod tests;

pub use aggregate::{AggregationReport, RecordTally, aggregate, aggregate_par, rank_top_k};
pub use error::PipelineError;
pub use input::{resolve_input, resolve_output, strip_scheme};
pub use parse::{COMBINED_LOG_PATTERN, LineOutcome, classify_line, parse_line};
pub use run::{RunSummary, run_analysis};
pub use writer::{CategoryWrite, SUCCESS_MARKER, shard_file_name, write_category, write_report};
