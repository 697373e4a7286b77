use crate::model::TOP_K;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// One of the three result sets the analyzer produces.
///
/// The snake_case name doubles as the output subdirectory name, so it is part
/// of the on-disk contract between the analyzer and any reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultCategory {
    StatusCounts,
    TopUrls,
    TopIps,
}

impl ResultCategory {
    pub const ALL: [ResultCategory; 3] = [
        ResultCategory::StatusCounts,
        ResultCategory::TopUrls,
        ResultCategory::TopIps,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResultCategory::StatusCounts => "status_counts",
            ResultCategory::TopUrls => "top_urls",
            ResultCategory::TopIps => "top_ips",
        }
    }

    /// Maximum number of rows written for this category. `None` keeps every group.
    pub fn row_limit(&self) -> Option<usize> {
        match self {
            ResultCategory::StatusCounts => None,
            ResultCategory::TopUrls | ResultCategory::TopIps => Some(TOP_K),
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ResultCategory::StatusCounts => "Status codes",
            ResultCategory::TopUrls => "Top URLs",
            ResultCategory::TopIps => "Top client addresses",
        }
    }
}

impl Display for ResultCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown result category '{0}' (expected status_counts, top_urls or top_ips)")]
pub struct UnknownCategory(pub String);

impl FromStr for ResultCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ResultCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}
