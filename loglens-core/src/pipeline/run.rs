use crate::pipeline::{
    AggregationReport, CategoryWrite, LineOutcome, PipelineError, RecordTally, classify_line,
    resolve_input, resolve_output, write_report,
};
use rayon::prelude::*;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub input_files: usize,
    pub lines_read: u64,
    pub records: u64,
    pub unmatched: u64,
    pub malformed: u64,
    pub output_root: PathBuf,
    pub written: Vec<CategoryWrite>,
}

#[derive(Default)]
struct LineScan {
    tally: RecordTally,
    lines: u64,
    unmatched: u64,
    malformed: u64,
}

impl LineScan {
    fn observe(mut self, line: &str) -> Self {
        self.lines += 1;
        match classify_line(line) {
            LineOutcome::Parsed(record) => self.tally.push(&record),
            LineOutcome::Unmatched => self.unmatched += 1,
            LineOutcome::Malformed => self.malformed += 1,
        }
        self
    }

    fn merge(self, other: LineScan) -> Self {
        LineScan {
            tally: self.tally.merge(other.tally),
            lines: self.lines + other.lines,
            unmatched: self.unmatched + other.unmatched,
            malformed: self.malformed + other.malformed,
        }
    }
}

/// Runs the whole batch: resolve input, parse, aggregate, write.
pub fn run_analysis(input: &str, output: &str) -> Result<RunSummary, PipelineError> {
    let files = resolve_input(input)?;
    let output_root = resolve_output(output)?;

    info!(input, files = files.len(), "input resolved");

    let mut scan = LineScan::default();
    for path in &files {
        let bytes = fs::read(path).map_err(|e| PipelineError::read_input(path, e))?;
        // Access logs are not guaranteed to be valid UTF-8; damaged bytes only
        // affect the lines that contain them.
        let text = String::from_utf8_lossy(&bytes);

        let file_scan = text
            .par_lines()
            .fold(LineScan::default, LineScan::observe)
            .reduce(LineScan::default, LineScan::merge);

        scan = scan.merge(file_scan);
    }

    if scan.malformed > 0 {
        warn!(
            malformed = scan.malformed,
            "lines matched the log pattern but had out-of-range numbers"
        );
    }

    let records = scan.tally.records();
    let report: AggregationReport = scan.tally.finish();

    info!(
        lines = scan.lines,
        records,
        unmatched = scan.unmatched,
        malformed = scan.malformed,
        "input parsed"
    );

    let written = write_report(&output_root, &report)?;

    info!(
        output = %output_root.display(),
        status_codes = report.status_counts.len(),
        top_urls = report.top_urls.len(),
        top_ips = report.top_ips.len(),
        "analysis complete"
    );

    Ok(RunSummary {
        input_files: files.len(),
        lines_read: scan.lines,
        records,
        unmatched: scan.unmatched,
        malformed: scan.malformed,
        output_root,
        written,
    })
}
