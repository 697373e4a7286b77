use clap::Parser;
use loglens_core::cli::{ReportArgs, run_report};
use loglens_core::logging::init_logging;

#[tokio::main]
async fn main() {
    let args = ReportArgs::parse();

    init_logging();

    if let Err(e) = run_report(args).await {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
