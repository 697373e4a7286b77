use std::fs;
use std::path::Path;

pub const ACCESS_LOG: &str = "\
127.0.0.1 - - [10/Oct/2023:13:55:36 -0700] \"GET /index.html HTTP/1.1\" 200 2326
10.0.0.5 - - [10/Oct/2023:13:56:00 -0700] \"GET /index.html HTTP/1.1\" 404 -
10.0.0.5 - - [10/Oct/2023:13:56:10 -0700] \"POST /login HTTP/1.1\" 302 512
garbage that is not an access log line
";

/// Writes the sample log under `dir` and returns its path as a string.
pub fn write_access_log(dir: &Path) -> String {
    let path = dir.join("access.log");
    fs::write(&path, ACCESS_LOG).unwrap();
    path.to_str().unwrap().to_string()
}

/// The single shard file the writer produced for a category.
#[allow(dead_code)]
pub fn shard_of(root: &Path, category: &str) -> std::path::PathBuf {
    fs::read_dir(root.join(category))
        .unwrap()
        .map(|e| e.unwrap().path())
        .find(|p| p.extension().is_some_and(|e| e == "json"))
        .unwrap()
}
