use crate::consumer::{DiscoveryError, ShardSource, SourceError};
use crate::model::ResultCategory;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Last-resort probe name, always tried after the configured ones.
pub const GENERIC_FALLBACK: &str = "data.json";

const SHARD_EXTENSION: &str = ".json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscoveryStrategy {
    /// List the category directory and keep `<prefix>*.json` entries.
    Enumerate,
    /// Check a fixed list of likely names and take the first that exists.
    Probe,
}

impl DiscoveryStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiscoveryStrategy::Enumerate => "enumerate",
            DiscoveryStrategy::Probe => "probe",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiscoveredShards {
    pub strategy: DiscoveryStrategy,
    pub names: Vec<String>,
}

/// Locates shard files for a category without being told their names.
///
/// Strategies run in the configured order and the first one that finds
/// something wins.
#[derive(Debug, Clone)]
pub struct ResultDiscovery {
    strategies: Vec<DiscoveryStrategy>,
    shard_prefix: String,
    probe_names: Vec<String>,
}

impl Default for ResultDiscovery {
    fn default() -> Self {
        Self::new(
            vec![DiscoveryStrategy::Enumerate, DiscoveryStrategy::Probe],
            "part-",
            vec!["part-00000.json".to_string()],
        )
    }
}

impl ResultDiscovery {
    pub fn new(
        strategies: Vec<DiscoveryStrategy>,
        shard_prefix: impl Into<String>,
        probe_names: Vec<String>,
    ) -> Self {
        let mut unique: Vec<String> = Vec::with_capacity(probe_names.len() + 1);
        for name in probe_names {
            if !unique.contains(&name) {
                unique.push(name);
            }
        }

        if !unique.iter().any(|n| n == GENERIC_FALLBACK) {
            unique.push(GENERIC_FALLBACK.to_string());
        }

        Self {
            strategies,
            shard_prefix: shard_prefix.into(),
            probe_names: unique,
        }
    }

    pub fn strategies(&self) -> &[DiscoveryStrategy] {
        &self.strategies
    }

    pub fn probe_names(&self) -> &[String] {
        &self.probe_names
    }

    pub fn is_shard_name(&self, name: &str) -> bool {
        name.starts_with(&self.shard_prefix) && name.ends_with(SHARD_EXTENSION)
    }

    pub async fn discover(
        &self,
        source: &dyn ShardSource,
        category: ResultCategory,
    ) -> Result<DiscoveredShards, DiscoveryError> {
        let mut last_error = None;

        for strategy in &self.strategies {
            let found = match strategy {
                DiscoveryStrategy::Enumerate => self.enumerate(source, category).await,
                DiscoveryStrategy::Probe => self.probe(source, category).await,
            };

            match found {
                Ok(names) if !names.is_empty() => {
                    debug!(
                        category = %category,
                        strategy = strategy.as_str(),
                        shards = ?names,
                        "shards discovered"
                    );
                    return Ok(DiscoveredShards {
                        strategy: *strategy,
                        names,
                    });
                }
                Ok(_) => {
                    debug!(category = %category, strategy = strategy.as_str(), "strategy found nothing");
                }
                Err(e) => {
                    debug!(category = %category, strategy = strategy.as_str(), error = %e, "strategy failed");
                    last_error = Some(e);
                }
            }
        }

        Err(DiscoveryError {
            category,
            location: source.location(category, None),
            last_error,
        })
    }

    async fn enumerate(
        &self,
        source: &dyn ShardSource,
        category: ResultCategory,
    ) -> Result<Vec<String>, SourceError> {
        let Some(entries) = source.list(category).await? else {
            // listing not supported by this source
            return Ok(Vec::new());
        };

        let mut names: Vec<String> = entries
            .into_iter()
            .filter(|n| self.is_shard_name(n))
            .collect();

        names.sort();
        Ok(names)
    }

    async fn probe(
        &self,
        source: &dyn ShardSource,
        category: ResultCategory,
    ) -> Result<Vec<String>, SourceError> {
        let mut last_error = None;

        for name in &self.probe_names {
            match source.exists(category, name).await {
                Ok(true) => return Ok(vec![name.clone()]),
                Ok(false) => {}
                Err(e) => last_error = Some(e),
            }
        }

        match last_error {
            Some(e) => Err(e),
            None => Ok(Vec::new()),
        }
    }
}
