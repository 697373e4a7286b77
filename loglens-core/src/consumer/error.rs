use crate::model::ResultCategory;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("not found: {location}")]
    NotFound { location: String },

    #[error("timed out reading {location}")]
    Timeout { location: String },

    #[error("failed to read {location}: {source}")]
    Io {
        location: String,
        #[source]
        source: std::io::Error,
    },

    #[error("request to {location} failed: {source}")]
    Http {
        location: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{location} answered with HTTP {status}")]
    Status { location: String, status: u16 },

    #[error("invalid base url '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

impl SourceError {
    pub fn io(location: impl Into<String>, source: std::io::Error) -> Self {
        let location = location.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::NotFound { location }
        } else {
            Self::Io { location, source }
        }
    }

    pub fn http(location: impl Into<String>, source: reqwest::Error) -> Self {
        let location = location.into();
        if source.is_timeout() {
            Self::Timeout { location }
        } else {
            Self::Http { location, source }
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, SourceError::NotFound { .. })
    }
}

#[derive(Debug, Error)]
#[error("no shard files found for {category} under {location}{}", last_error_suffix(.last_error))]
pub struct DiscoveryError {
    pub category: ResultCategory,
    pub location: String,
    pub last_error: Option<SourceError>,
}

fn last_error_suffix(last_error: &Option<SourceError>) -> String {
    last_error
        .as_ref()
        .map(|e| format!(" (last error: {e})"))
        .unwrap_or_default()
}

/// Why one category could not be loaded. Never fatal on its own.
#[derive(Debug, Error)]
pub enum CategoryError {
    #[error(transparent)]
    Discovery(#[from] DiscoveryError),

    #[error("failed to fetch shard {shard}: {source}")]
    Fetch {
        shard: String,
        #[source]
        source: SourceError,
    },
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("no usable data: none of status_counts, top_urls or top_ips could be loaded")]
    NoUsableData {
        reasons: Vec<(ResultCategory, String)>,
    },
}

impl LoadError {
    /// Operator-facing guidance shown alongside the error.
    pub fn remediation(&self) -> &'static str {
        match self {
            LoadError::NoUsableData { .. } => {
                "No analysis results could be read.\n\
                 \n\
                 Check that:\n\
                 \n\
                 - the analyzer ran to completion (`loglens <input-path> <output-path>`)\n\
                 - the report points at the same output path the analyzer wrote to\n\
                 - the output is reachable from here (mounted directory, or served over\n\
                   HTTP under <base>/log_analysis_output/<category>/)"
            }
        }
    }
}
