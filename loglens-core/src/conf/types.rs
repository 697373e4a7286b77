use crate::consumer::{DiscoveryStrategy, ResultDiscovery};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Settings for reading analyzer output back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ViewerConfig {
    /// Path segment between an HTTP base URL and the category directories.
    #[serde(default = "default_base_path")]
    pub base_path: String,

    #[serde(default = "default_shard_prefix")]
    pub shard_prefix: String,

    /// Names tried, in order, when a category cannot be listed.
    ///
    /// `loglens` writes `part-00000-<uuid>.json`, which no fixed name matches.
    /// When serving output over plain HTTP, publish each category's shard under
    /// one of these names (for example copy it to `data.json`) or list that
    /// name here.
    #[serde(default = "default_probe_names")]
    pub probe_names: Vec<String>,

    #[serde(default = "default_strategies")]
    pub strategies: Vec<DiscoveryStrategy>,

    #[serde(default = "default_fetch_timeout_ms")]
    pub fetch_timeout_ms: u64,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            base_path: default_base_path(),
            shard_prefix: default_shard_prefix(),
            probe_names: default_probe_names(),
            strategies: default_strategies(),
            fetch_timeout_ms: default_fetch_timeout_ms(),
        }
    }
}

impl ViewerConfig {
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.fetch_timeout_ms)
    }

    pub fn discovery(&self) -> ResultDiscovery {
        ResultDiscovery::new(
            self.strategies.clone(),
            self.shard_prefix.clone(),
            self.probe_names.clone(),
        )
    }
}

fn default_base_path() -> String {
    "log_analysis_output".to_string()
}

fn default_shard_prefix() -> String {
    "part-".to_string()
}

fn default_probe_names() -> Vec<String> {
    vec!["part-00000.json".to_string(), "data.json".to_string()]
}

fn default_strategies() -> Vec<DiscoveryStrategy> {
    vec![DiscoveryStrategy::Enumerate, DiscoveryStrategy::Probe]
}

fn default_fetch_timeout_ms() -> u64 {
    5_000
}
