use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Recursively finds result files under `root`. The walk is sorted so
/// discovery order (which ranking ties preserve) is stable across runs.
/// Unreadable entries are skipped.
pub fn discover_result_files(root: &Path, suffix: &str) -> Vec<PathBuf> {
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| entry.file_name().to_string_lossy().ends_with(suffix))
        .map(|entry| entry.into_path())
        .collect()
}
