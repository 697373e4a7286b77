use crate::conf::{ViewerConfig, load_viewer_config};
use crate::consumer::{
    HttpSource, LoadError, LoadedResults, Loader, LocalSource, render_json, render_pretty,
    render_yaml,
};
use crate::model::ResultCategory;
use anyhow::{Result, anyhow};
use std::fmt::Write as _;
use clap::{Parser, ValueEnum};
use std::io::{self, IsTerminal};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Pretty,
    Json,
    Yaml,
}

pub fn default_report_format() -> ReportFormat {
    if io::stdout().is_terminal() {
        ReportFormat::Pretty
    } else {
        ReportFormat::Json
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "loglens-report",
    version,
    about = "Read loglens output back and print a report"
)]
pub struct ReportArgs {
    /// Output directory written by `loglens`, or an http(s):// base URL serving it
    #[arg(value_name = "output-root")]
    pub root: String,

    /// Output format (default: pretty on a terminal, json otherwise)
    #[arg(long, value_enum)]
    pub format: Option<ReportFormat>,

    /// Viewer settings (HCL)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

fn is_http(root: &str) -> bool {
    root.starts_with("http://") || root.starts_with("https://")
}

async fn load(root: &str, cfg: &ViewerConfig) -> Result<LoadedResults, LoadError> {
    if is_http(root) {
        // An invalid base URL is the same as nothing being reachable.
        let source = match HttpSource::new(root, &cfg.base_path, cfg.fetch_timeout()) {
            Ok(source) => source,
            Err(e) => {
                return Err(LoadError::NoUsableData {
                    reasons: ResultCategory::ALL
                        .into_iter()
                        .map(|c| (c, e.to_string()))
                        .collect(),
                });
            }
        };
        Loader::new(source, cfg.discovery()).load().await
    } else {
        let local = root.strip_prefix("file://").unwrap_or(root);
        let source = LocalSource::new(local, cfg.fetch_timeout());
        Loader::new(source, cfg.discovery()).load().await
    }
}

pub async fn run_report(args: ReportArgs) -> Result<()> {
    let cfg = load_viewer_config(args.config.as_deref())?;
    let format = args.format.unwrap_or_else(default_report_format);

    let results = load(&args.root, &cfg)
        .await
        .map_err(|err| anyhow!("{}", describe_load_error(&err)))?;

    let rendered = match format {
        ReportFormat::Pretty => render_pretty(&results),
        ReportFormat::Json => render_json(&results)?,
        ReportFormat::Yaml => render_yaml(&results)?,
    };
    println!("{rendered}");

    Ok(())
}

/// The error line, one line per unavailable category, then remediation.
pub fn describe_load_error(err: &LoadError) -> String {
    let LoadError::NoUsableData { reasons } = err;

    let mut out = err.to_string();
    for (category, reason) in reasons {
        let _ = write!(out, "\n  {category}: {reason}");
    }
    let _ = write!(out, "\n\n{}", err.remediation());
    out
}
