//! Expands user-selected paths into playable media files.

use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::config::LibrarySettings;

fn is_media_file(path: &Path, settings: &LibrarySettings) -> bool {
    let exts: Vec<String> = settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect();

    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

/// Expand `selection` into media files: files are taken directly when they
/// pass the extension allow-list, directories are walked recursively.
pub fn collect_media_files(selection: &[PathBuf], settings: &LibrarySettings) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for picked in selection {
        if picked.is_dir() {
            for entry in WalkDir::new(picked)
                .follow_links(settings.follow_links)
                .into_iter()
                .filter_map(Result::ok)
            {
                let path = entry.path();
                if path.is_file() && is_media_file(path, settings) {
                    debug!(file = %path.display(), "importing media file");
                    files.push(path.to_path_buf());
                }
            }
        } else if is_media_file(picked, settings) {
            files.push(picked.clone());
        }
    }

    files
}
