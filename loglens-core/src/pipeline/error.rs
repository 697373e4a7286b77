use crate::model::ResultCategory;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    // Input resolution
    #[error("unsupported scheme '{scheme}' in {path} (only local paths and file:// are supported)")]
    UnsupportedScheme { scheme: String, path: String },

    #[error("input path does not exist: {path}")]
    InputNotFound { path: PathBuf },

    #[error("no input files found for {input}")]
    NoInputFiles { input: String },

    #[error("glob pattern error: {pattern}: {source}")]
    Glob {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    // IO
    #[error("failed to read input {path}: {source}")]
    ReadInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write output {path}: {source}")]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize {category} row: {source}")]
    Serialize {
        category: ResultCategory,
        #[source]
        source: serde_json::Error,
    },
}

impl PipelineError {
    pub fn read_input(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ReadInput {
            path: path.into(),
            source,
        }
    }

    pub fn write_output(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::WriteOutput {
            path: path.into(),
            source,
        }
    }
}
