use crate::pipeline::{PipelineError, resolve_input, resolve_output, strip_scheme};
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

#[test]
fn single_file_resolves_to_itself() {
    // Arrange
    let dir = tempdir().unwrap();
    let file = dir.path().join("access.log");
    fs::write(&file, "").unwrap();

    // Act
    let files = resolve_input(file.to_str().unwrap()).unwrap();

    // Assert
    assert_eq!(files, vec![file]);
}

#[test]
fn directory_resolves_to_sorted_visible_files() {
    // Arrange
    let dir = tempdir().unwrap();
    let root = dir.path();
    fs::write(root.join("b.log"), "").unwrap();
    fs::write(root.join("a.log"), "").unwrap();
    fs::write(root.join(".swap"), "").unwrap();
    fs::write(root.join("_SUCCESS"), "").unwrap();
    fs::create_dir(root.join("nested")).unwrap();
    fs::write(root.join("nested/c.log"), "").unwrap();

    // Act
    let files = resolve_input(root.to_str().unwrap()).unwrap();

    // Assert
    assert_eq!(files, vec![root.join("a.log"), root.join("b.log")]);
}

#[test]
fn glob_pattern_selects_matching_files() {
    // Arrange
    let dir = tempdir().unwrap();
    let root = dir.path();
    fs::write(root.join("access-1.log"), "").unwrap();
    fs::write(root.join("access-2.log"), "").unwrap();
    fs::write(root.join("error.log"), "").unwrap();

    // Act
    let pattern = format!("{}/access-*.log", root.display());
    let files = resolve_input(&pattern).unwrap();

    // Assert
    assert_eq!(
        files,
        vec![root.join("access-1.log"), root.join("access-2.log")]
    );
}

#[test]
fn file_scheme_is_stripped() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("access.log");
    fs::write(&file, "").unwrap();

    let files = resolve_input(&format!("file://{}", file.display())).unwrap();

    assert_eq!(files, vec![file]);
}

#[test]
fn other_schemes_are_rejected() {
    let err = strip_scheme("hdfs://namenode:9000/logs").unwrap_err();

    match err {
        PipelineError::UnsupportedScheme { scheme, .. } => assert_eq!(scheme, "hdfs"),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn missing_path_is_reported() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("nope.log");

    let err = resolve_input(missing.to_str().unwrap()).unwrap_err();

    assert!(matches!(err, PipelineError::InputNotFound { .. }));
}

#[test]
fn empty_directory_has_no_input_files() {
    let dir = tempdir().unwrap();

    let err = resolve_input(dir.path().to_str().unwrap()).unwrap_err();

    assert!(matches!(err, PipelineError::NoInputFiles { .. }));
}

#[test]
fn output_accepts_plain_and_file_scheme_paths() {
    assert_eq!(
        resolve_output("/tmp/out").unwrap(),
        PathBuf::from("/tmp/out")
    );
    assert_eq!(
        resolve_output("file:///tmp/out").unwrap(),
        PathBuf::from("/tmp/out")
    );
    assert!(resolve_output("s3://bucket/out").is_err());
}
