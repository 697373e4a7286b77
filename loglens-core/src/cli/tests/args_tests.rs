use crate::cli::{AnalyzeArgs, ReportArgs, ReportFormat};
use clap::Parser;
use clap::error::ErrorKind;
use std::path::PathBuf;

#[test]
fn analyze_takes_two_positionals() {
    let args = AnalyzeArgs::try_parse_from(["loglens", "logs/*.log", "out"]).unwrap();

    assert_eq!(args.input, "logs/*.log");
    assert_eq!(args.output, "out");
}

#[test]
fn analyze_without_output_is_a_usage_error() {
    let err = AnalyzeArgs::try_parse_from(["loglens", "access.log"]).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    assert_eq!(err.exit_code(), 2);
}

#[test]
fn analyze_rejects_a_third_positional() {
    let err = AnalyzeArgs::try_parse_from(["loglens", "a", "b", "c"]).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::UnknownArgument);
}

#[test]
fn report_flags_parse() {
    let args = ReportArgs::try_parse_from([
        "loglens-report",
        "http://localhost:8080",
        "--format",
        "yaml",
        "--config",
        "viewer.hcl",
    ])
    .unwrap();

    assert_eq!(args.root, "http://localhost:8080");
    assert_eq!(args.format, Some(ReportFormat::Yaml));
    assert_eq!(args.config, Some(PathBuf::from("viewer.hcl")));
}

#[test]
fn report_format_is_optional() {
    let args = ReportArgs::try_parse_from(["loglens-report", "out"]).unwrap();

    assert_eq!(args.format, None);
    assert_eq!(args.config, None);
}

#[test]
fn unknown_report_format_is_rejected() {
    let err = ReportArgs::try_parse_from(["loglens-report", "out", "--format", "xml"]).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::InvalidValue);
}
