use std::path::{Path, PathBuf};

use glob::Pattern;
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Files found under one resource root.
#[derive(Debug, Default)]
pub struct DiscoveredFiles {
    /// File paths, sorted lexicographically.
    pub files: Vec<PathBuf>,
    /// Files excluded by an ignore pattern.
    pub ignored_count: usize,
    /// Entries that could not be read (permissions, broken links).
    pub skipped_count: usize,
}

/// Recursively list the regular files under `root`.
///
/// A missing root is not an error and yields no files. Patterns in
/// `ignores` are matched against the path relative to `root`, using `/`
/// as separator. Symbolic links are followed and keep their own path
/// under `root`. Paths are sorted so that a run always visits files in
/// the same order.
pub fn discover_files(root: &Path, ignores: &[Pattern]) -> DiscoveredFiles {
    let mut result = DiscoveredFiles::default();

    if !root.is_dir() {
        debug!(root = %root.display(), "resource root does not exist, skipping");
        return result;
    }

    for entry in WalkDir::new(root).follow_links(true).sort_by_file_name() {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                result.skipped_count += 1;
                warn!("cannot access path: {}", e);
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        if is_ignored(root, path, ignores) {
            result.ignored_count += 1;
            continue;
        }
        result.files.push(path.to_path_buf());
    }

    result.files.sort();
    result
}

fn is_ignored(root: &Path, path: &Path, ignores: &[Pattern]) -> bool {
    if ignores.is_empty() {
        return false;
    }
    let relative = path.strip_prefix(root).unwrap_or(path);
    let relative = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");
    ignores.iter().any(|p| p.matches(&relative))
}
