use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse HCL in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: hcl::Error,
    },

    #[error("{path}: at least one discovery strategy is required")]
    NoStrategies { path: PathBuf },

    #[error("{path}: discovery strategy '{strategy}' is listed more than once")]
    DuplicateStrategy { path: PathBuf, strategy: String },

    #[error("{path}: fetch_timeout_ms must be greater than zero")]
    ZeroTimeout { path: PathBuf },

    #[error("{path}: shard_prefix must not be empty")]
    EmptyShardPrefix { path: PathBuf },
}

impl ConfigError {
    pub fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ReadFile {
            path: path.into(),
            source,
        }
    }

    pub fn parse(path: impl Into<PathBuf>, source: hcl::Error) -> Self {
        Self::Parse {
            path: path.into(),
            source,
        }
    }
}
