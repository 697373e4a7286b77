use crate::conf::{ConfigError, ViewerConfig};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    viewer: ViewerConfig,
}

/// Loads viewer settings. Without a file every setting takes its default.
pub fn load_viewer_config(path: Option<&Path>) -> Result<ViewerConfig, ConfigError> {
    let Some(path) = path else {
        return Ok(ViewerConfig::default());
    };

    let s = fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
    parse_viewer_config(path, &s)
}

pub fn parse_viewer_config(path: &Path, s: &str) -> Result<ViewerConfig, ConfigError> {
    let parsed: ConfigFile = hcl::from_str(s).map_err(|e| ConfigError::parse(path, e))?;
    let cfg = parsed.viewer;

    //--------------------------------------------------------------------------
    // Semantic checks
    //--------------------------------------------------------------------------
    if cfg.strategies.is_empty() {
        return Err(ConfigError::NoStrategies {
            path: path.to_path_buf(),
        });
    }

    for (i, strategy) in cfg.strategies.iter().enumerate() {
        if cfg.strategies[..i].contains(strategy) {
            return Err(ConfigError::DuplicateStrategy {
                path: path.to_path_buf(),
                strategy: strategy.as_str().to_string(),
            });
        }
    }

    if cfg.fetch_timeout_ms == 0 {
        return Err(ConfigError::ZeroTimeout {
            path: path.to_path_buf(),
        });
    }

    if cfg.shard_prefix.is_empty() {
        return Err(ConfigError::EmptyShardPrefix {
            path: path.to_path_buf(),
        });
    }

    Ok(cfg)
}
