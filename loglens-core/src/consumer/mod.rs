//! Result Consumer
//!
//! Reads the analyzer's output back without knowing what the shard files are called
//! or which field names the writing version used.
//!
//! For each category the loader asks `ResultDiscovery` for shard names (listing the
//! directory where the source allows it, probing well-known names where it does not),
//! fetches them through a `ShardSource`, and maps every row onto one canonical
//! `{dimension, count}` shape. The three categories load concurrently and fail
//! independently; only losing all three is an error.
//!
//! ResultDiscovery
//! ShardSource::fetch
//! normalize_body
//! LoadedResults
//! render_*
//!

mod discovery;
mod error;
mod loader;
mod normalize;
mod render;
mod source;

#[cfg(test)]
mod tests;

pub use discovery::{DiscoveredShards, DiscoveryStrategy, GENERIC_FALLBACK, ResultDiscovery};
pub use error::{CategoryError, DiscoveryError, LoadError, SourceError};
pub use loader::{LoadedCategory, LoadedResults, Loader, ShardOrigin};
pub use normalize::{
    CanonicalRow, FieldCandidates, FieldKey, NormalizedBody, candidates, normalize_body,
    normalize_row,
};
pub use render::{render_json, render_pretty, render_yaml};
pub use source::{HttpSource, LocalSource, ShardSource};
