use crate::consumer::{
    CanonicalRow, CategoryError, DiscoveryStrategy, LoadError, ResultDiscovery, ShardSource,
    normalize_body,
};
use crate::model::ResultCategory;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ShardOrigin {
    /// Shard names remembered from this loader's previous load.
    Cache,
    Discovered(DiscoveryStrategy),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadedCategory {
    pub category: ResultCategory,
    pub rows: Vec<CanonicalRow>,
    pub shards: Vec<String>,
    pub origin: ShardOrigin,
    pub malformed_lines: usize,
    pub dropped_rows: usize,
}

/// Whatever could be loaded, plus why the rest could not.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LoadedResults {
    pub categories: BTreeMap<ResultCategory, LoadedCategory>,
    pub unavailable: BTreeMap<ResultCategory, String>,
}

impl LoadedResults {
    pub fn get(&self, category: ResultCategory) -> Option<&LoadedCategory> {
        self.categories.get(&category)
    }

    pub fn is_partial(&self) -> bool {
        !self.unavailable.is_empty()
    }

    pub fn missing(&self) -> Vec<ResultCategory> {
        self.unavailable.keys().copied().collect()
    }
}

/// Loads all three categories through one source.
///
/// Each loader remembers the shard names it found last time and tries them
/// first on the next load. The cache belongs to this instance only.
pub struct Loader<S> {
    source: S,
    discovery: ResultDiscovery,
    shard_cache: HashMap<ResultCategory, Vec<String>>,
}

impl<S: ShardSource> Loader<S> {
    pub fn new(source: S, discovery: ResultDiscovery) -> Self {
        Self {
            source,
            discovery,
            shard_cache: HashMap::new(),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn cached_shards(&self, category: ResultCategory) -> Option<&[String]> {
        self.shard_cache.get(&category).map(Vec::as_slice)
    }

    /// Loads every category concurrently.
    ///
    /// # Errors
    ///
    /// Returns `LoadError::NoUsableData` only when all three categories are
    /// unavailable. Partial results are returned as `Ok`.
    pub async fn load(&mut self) -> Result<LoadedResults, LoadError> {
        let (status_counts, top_urls, top_ips) = tokio::join!(
            self.load_category(ResultCategory::StatusCounts),
            self.load_category(ResultCategory::TopUrls),
            self.load_category(ResultCategory::TopIps),
        );

        let mut results = LoadedResults::default();
        for (category, outcome) in ResultCategory::ALL
            .into_iter()
            .zip([status_counts, top_urls, top_ips])
        {
            match outcome {
                Ok(loaded) => {
                    self.shard_cache.insert(category, loaded.shards.clone());
                    results.categories.insert(category, loaded);
                }
                Err(e) => {
                    warn!(category = %category, error = %e, "category unavailable");
                    self.shard_cache.remove(&category);
                    results.unavailable.insert(category, e.to_string());
                }
            }
        }

        if results.categories.is_empty() {
            return Err(LoadError::NoUsableData {
                reasons: results.unavailable.into_iter().collect(),
            });
        }

        info!(
            loaded = results.categories.len(),
            missing = results.unavailable.len(),
            "results loaded"
        );

        Ok(results)
    }

    async fn load_category(&self, category: ResultCategory) -> Result<LoadedCategory, CategoryError> {
        if let Some(cached) = self.shard_cache.get(&category) {
            match self.fetch_shards(category, cached, ShardOrigin::Cache).await {
                Ok(loaded) => return Ok(loaded),
                Err(e) => {
                    warn!(category = %category, error = %e, "cached shards stale, rediscovering");
                }
            }
        }

        let discovered = self
            .discovery
            .discover(&self.source, category)
            .await?;

        self.fetch_shards(
            category,
            &discovered.names,
            ShardOrigin::Discovered(discovered.strategy),
        )
        .await
    }

    async fn fetch_shards(
        &self,
        category: ResultCategory,
        names: &[String],
        origin: ShardOrigin,
    ) -> Result<LoadedCategory, CategoryError> {
        let mut loaded = LoadedCategory {
            category,
            rows: Vec::new(),
            shards: names.to_vec(),
            origin,
            malformed_lines: 0,
            dropped_rows: 0,
        };

        for name in names {
            let body = self
                .source
                .fetch(category, name)
                .await
                .map_err(|e| CategoryError::Fetch {
                    shard: self.source.location(category, Some(name)),
                    source: e,
                })?;

            let normalized = normalize_body(category, &body);
            loaded.rows.extend(normalized.rows);
            loaded.malformed_lines += normalized.malformed_lines;
            loaded.dropped_rows += normalized.dropped_rows;
        }

        if loaded.rows.is_empty() && loaded.malformed_lines > 0 {
            warn!(
                category = %category,
                malformed = loaded.malformed_lines,
                "every line was malformed, category is empty"
            );
        }

        Ok(loaded)
    }
}
