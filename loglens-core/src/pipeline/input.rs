use crate::pipeline::PipelineError;
use glob::glob;
use std::fs;
use std::path::{Path, PathBuf};

const FILE_SCHEME: &str = "file://";

/// Strips a `file://` prefix. Any other scheme is rejected: remote storage is
/// expected to be mounted or copied locally before the analyzer runs.
pub fn strip_scheme(path: &str) -> Result<&str, PipelineError> {
    if let Some(local) = path.strip_prefix(FILE_SCHEME) {
        return Ok(local);
    }

    if let Some((scheme, _)) = path.split_once("://") {
        return Err(PipelineError::UnsupportedScheme {
            scheme: scheme.to_string(),
            path: path.to_string(),
        });
    }

    Ok(path)
}

/// Resolves the input argument into the list of text files to read.
///
/// Accepts a single file, a directory (its regular, non-hidden files, not
/// recursive) or a glob pattern. Results are sorted so runs are reproducible.
///
/// # Errors
///
/// Returns `PipelineError::InputNotFound` for a plain path that does not exist and
/// `PipelineError::NoInputFiles` when a directory or pattern yields nothing.
pub fn resolve_input(input: &str) -> Result<Vec<PathBuf>, PipelineError> {
    let local = strip_scheme(input)?;
    let path = Path::new(local);

    let files = if path.is_file() {
        vec![path.to_path_buf()]
    } else if path.is_dir() {
        list_dir(path)?
    } else if is_glob(local) {
        discover(local)?
    } else {
        return Err(PipelineError::InputNotFound {
            path: path.to_path_buf(),
        });
    };

    if files.is_empty() {
        return Err(PipelineError::NoInputFiles {
            input: input.to_string(),
        });
    }

    Ok(files)
}

pub fn resolve_output(output: &str) -> Result<PathBuf, PipelineError> {
    strip_scheme(output).map(PathBuf::from)
}

fn is_glob(path: &str) -> bool {
    path.contains(['*', '?', '['])
}

/// Files starting with `.` or `_` are bookkeeping (`_SUCCESS`, editor swap files)
/// and never log data.
fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with('.') || n.starts_with('_'))
}

fn list_dir(dir: &Path) -> Result<Vec<PathBuf>, PipelineError> {
    let entries = fs::read_dir(dir).map_err(|e| PipelineError::read_input(dir, e))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| PipelineError::read_input(dir, e))?.path();
        if path.is_file() && !is_hidden(&path) {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

fn discover(pattern: &str) -> Result<Vec<PathBuf>, PipelineError> {
    let mut paths: Vec<_> = glob(pattern)
        .map_err(|e| PipelineError::Glob {
            pattern: pattern.to_string(),
            source: e,
        })?
        .filter_map(Result::ok)
        .filter(|p| p.is_file() && !is_hidden(p))
        .collect();

    paths.sort();
    Ok(paths)
}
