use clap::Parser;
use loglens_core::cli::{AnalyzeArgs, run_analyze};
use loglens_core::logging::init_logging;

fn main() {
    let args = AnalyzeArgs::parse();

    init_logging();

    if let Err(e) = run_analyze(args) {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
