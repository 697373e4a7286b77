mod common;

use common::write_access_log;
use loglens_core::consumer::{
    CanonicalRow, DiscoveryStrategy, Loader, LocalSource, ResultDiscovery, ShardOrigin,
};
use loglens_core::model::ResultCategory;
use loglens_core::pipeline::run_analysis;
use pretty_assertions::assert_eq;
use std::time::Duration;
use tempfile::tempdir;

fn row(dimension: &str, count: u64) -> CanonicalRow {
    CanonicalRow {
        dimension: dimension.to_string(),
        count,
    }
}

#[tokio::test]
async fn analysis_output_loads_back_into_canonical_rows() {
    // Arrange
    let dir = tempdir().unwrap();
    let input = write_access_log(dir.path());
    let output = dir.path().join("out");

    // Act
    let summary = run_analysis(&input, output.to_str().unwrap()).unwrap();
    let mut loader = Loader::new(
        LocalSource::new(&output, Duration::from_secs(5)),
        ResultDiscovery::default(),
    );
    let results = loader.load().await.unwrap();

    // Assert
    assert_eq!(summary.records, 3);
    assert_eq!(summary.unmatched, 1);
    assert!(!results.is_partial());

    assert_eq!(
        results.get(ResultCategory::StatusCounts).unwrap().rows,
        vec![row("200", 1), row("302", 1), row("404", 1)]
    );
    assert_eq!(
        results.get(ResultCategory::TopUrls).unwrap().rows,
        vec![row("/index.html", 2), row("/login", 1)]
    );
    assert_eq!(
        results.get(ResultCategory::TopIps).unwrap().rows,
        vec![row("10.0.0.5", 2), row("127.0.0.1", 1)]
    );
    assert_eq!(
        results.get(ResultCategory::TopIps).unwrap().origin,
        ShardOrigin::Discovered(DiscoveryStrategy::Enumerate)
    );
}

#[tokio::test]
async fn rerunning_the_analysis_replaces_previous_output() {
    let dir = tempdir().unwrap();
    let input = write_access_log(dir.path());
    let output = dir.path().join("out");
    let source = || LocalSource::new(&output, Duration::from_secs(5));

    run_analysis(&input, output.to_str().unwrap()).unwrap();
    let first = Loader::new(source(), ResultDiscovery::default())
        .load()
        .await
        .unwrap();

    run_analysis(&input, output.to_str().unwrap()).unwrap();
    let second = Loader::new(source(), ResultDiscovery::default())
        .load()
        .await
        .unwrap();

    for category in ResultCategory::ALL {
        assert_eq!(
            first.get(category).unwrap().rows,
            second.get(category).unwrap().rows
        );
        assert_eq!(second.get(category).unwrap().shards.len(), 1);
    }
}

#[tokio::test]
async fn cached_shard_names_are_replaced_after_a_rerun() {
    let dir = tempdir().unwrap();
    let input = write_access_log(dir.path());
    let output = dir.path().join("out");

    run_analysis(&input, output.to_str().unwrap()).unwrap();
    let mut loader = Loader::new(
        LocalSource::new(&output, Duration::from_secs(5)),
        ResultDiscovery::default(),
    );
    loader.load().await.unwrap();
    let before = loader
        .cached_shards(ResultCategory::TopUrls)
        .unwrap()
        .to_vec();

    // A rerun writes fresh shard names, so the cached ones are gone.
    run_analysis(&input, output.to_str().unwrap()).unwrap();
    let results = loader.load().await.unwrap();

    let after = loader.cached_shards(ResultCategory::TopUrls).unwrap();
    assert_ne!(before.as_slice(), after);
    assert_eq!(
        results.get(ResultCategory::TopUrls).unwrap().rows,
        vec![row("/index.html", 2), row("/login", 1)]
    );
}
