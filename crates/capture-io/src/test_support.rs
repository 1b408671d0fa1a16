//! Shared fixtures for reader tests

use std::fs;
use std::path::PathBuf;

/// Write `contents` to a per-process scratch file and return its path.
pub(crate) fn write_capture_file(name: &str, contents: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("capture-io-tests-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}
