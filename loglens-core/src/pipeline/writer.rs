use crate::model::ResultCategory;
use crate::pipeline::{AggregationReport, PipelineError};
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;
use uuid::Uuid;

/// Empty marker written next to the shards once a category is complete.
pub const SUCCESS_MARKER: &str = "_SUCCESS";

const STAGING_PREFIX: &str = ".staging-";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryWrite {
    pub category: ResultCategory,
    pub rows: usize,
    pub shard: PathBuf,
}

/// Opaque shard name. Readers discover shards; they never compute this.
pub fn shard_file_name(index: usize) -> String {
    format!("part-{index:05}-{}.json", Uuid::new_v4())
}

/// Writes the three categories one after another.
///
/// Each category is replaced atomically on its own; a failure part way through
/// leaves earlier categories at their new contents and later ones untouched.
pub fn write_report(
    output_root: &Path,
    report: &AggregationReport,
) -> Result<Vec<CategoryWrite>, PipelineError> {
    Ok(vec![
        write_category(
            output_root,
            ResultCategory::StatusCounts,
            &report.status_counts,
        )?,
        write_category(output_root, ResultCategory::TopUrls, &report.top_urls)?,
        write_category(output_root, ResultCategory::TopIps, &report.top_ips)?,
    ])
}

/// Writes `rows` as JSON lines to `<output_root>/<category>/`, replacing whatever
/// the directory held before. Nothing is merged with earlier output.
///
/// Rows are staged in a sibling directory which is renamed into place once the
/// shard and the success marker are fully written.
pub fn write_category<R: Serialize>(
    output_root: &Path,
    category: ResultCategory,
    rows: &[R],
) -> Result<CategoryWrite, PipelineError> {
    fs::create_dir_all(output_root).map_err(|e| PipelineError::write_output(output_root, e))?;

    let target = output_root.join(category.as_str());
    let staging = output_root.join(format!("{STAGING_PREFIX}{category}"));

    // leftover from an interrupted run
    remove_path(&staging)?;
    fs::create_dir(&staging).map_err(|e| PipelineError::write_output(&staging, e))?;

    let shard_name = shard_file_name(0);
    write_rows(&staging.join(&shard_name), category, rows)?;

    let marker = staging.join(SUCCESS_MARKER);
    File::create(&marker).map_err(|e| PipelineError::write_output(&marker, e))?;

    remove_path(&target)?;
    fs::rename(&staging, &target).map_err(|e| PipelineError::write_output(&target, e))?;

    debug!(
        category = %category,
        rows = rows.len(),
        shard = %shard_name,
        "category written"
    );

    Ok(CategoryWrite {
        category,
        rows: rows.len(),
        shard: target.join(shard_name),
    })
}

fn write_rows<R: Serialize>(
    path: &Path,
    category: ResultCategory,
    rows: &[R],
) -> Result<(), PipelineError> {
    let file = File::create(path).map_err(|e| PipelineError::write_output(path, e))?;
    let mut out = BufWriter::new(file);

    for row in rows {
        serde_json::to_writer(&mut out, row)
            .map_err(|e| PipelineError::Serialize { category, source: e })?;
        out.write_all(b"\n")
            .map_err(|e| PipelineError::write_output(path, e))?;
    }

    out.flush().map_err(|e| PipelineError::write_output(path, e))
}

fn remove_path(path: &Path) -> Result<(), PipelineError> {
    let removed = if path.is_dir() {
        fs::remove_dir_all(path)
    } else if path.exists() {
        fs::remove_file(path)
    } else {
        return Ok(());
    };

    removed.map_err(|e| PipelineError::write_output(path, e))
}
