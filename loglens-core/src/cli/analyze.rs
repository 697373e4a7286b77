use crate::pipeline::run_analysis;
use anyhow::Result;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "loglens",
    version,
    about = "Aggregate web server access logs into status, URL and client address counts",
    override_usage = "loglens <input-path> <output-path>"
)]
pub struct AnalyzeArgs {
    /// Log file, directory of log files, or glob pattern (optionally file://)
    #[arg(value_name = "input-path")]
    pub input: String,

    /// Directory that receives status_counts/, top_urls/ and top_ips/
    #[arg(value_name = "output-path")]
    pub output: String,
}

pub fn run_analyze(args: AnalyzeArgs) -> Result<()> {
    let summary = run_analysis(&args.input, &args.output)?;

    println!(
        "✔ {} records from {} lines in {} files ({} unmatched, {} malformed) → {}",
        summary.records,
        summary.lines_read,
        summary.input_files,
        summary.unmatched,
        summary.malformed,
        summary.output_root.display()
    );

    Ok(())
}
