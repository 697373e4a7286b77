pub mod analyze;
pub mod report;

pub use analyze::{AnalyzeArgs, run_analyze};
pub use report::{
    ReportArgs, ReportFormat, default_report_format, describe_load_error, run_report,
};

#[cfg(test)]
mod tests;
