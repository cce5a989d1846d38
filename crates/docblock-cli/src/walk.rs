//! Candidate file discovery

use std::path::{Path, PathBuf};

use docblock_core::GeneratorConfig;
use tracing::warn;
use walkdir::WalkDir;

/// Files to process under `root`, sorted by path.
///
/// A file target is returned as is. A directory is scanned one level deep,
/// or fully when recursion is enabled, keeping files with an accepted
/// extension. Unreadable entries are logged and skipped.
pub fn collect_php_files(root: &Path, config: &GeneratorConfig) -> Vec<PathBuf> {
    if root.is_file() {
        return vec![root.to_path_buf()];
    }

    let mut walker = WalkDir::new(root).min_depth(1).sort_by_file_name();
    if !config.recursive {
        walker = walker.max_depth(1);
    }

    walker
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                warn!(%err, "skipping unreadable entry");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .map(walkdir::DirEntry::into_path)
        .filter(|path| config.accepts_extension(path))
        .collect()
}
