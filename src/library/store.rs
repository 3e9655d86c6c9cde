//! Flat-file persistence for the library list.
//!
//! Format: UTF-8 text, one filesystem path per line, newline terminated,
//! no header. The store never raises I/O errors to its callers; failures
//! are logged and degrade to empty/no-op results.

use std::fs;
use std::path::PathBuf;

use tracing::warn;

pub struct LibraryStore {
    path: PathBuf,
}

impl LibraryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Read the persisted list, keeping only entries that still resolve to
    /// an existing filesystem resource. A missing file is created empty; an
    /// unreadable one yields an empty list.
    pub fn load(&self) -> Vec<PathBuf> {
        if !self.path.exists() {
            self.save(&[]);
            return Vec::new();
        }

        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) => {
                warn!(file = %self.path.display(), error = %err, "could not read library file");
                return Vec::new();
            }
        };

        contents
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(PathBuf::from)
            // Stale entries are dropped, not surfaced as errors.
            .filter(|path| path.exists())
            .collect()
    }

    /// Overwrite the persisted list, one path per line in list order.
    pub fn save(&self, entries: &[PathBuf]) {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                if let Err(err) = fs::create_dir_all(parent) {
                    warn!(dir = %parent.display(), error = %err, "could not create library directory");
                    return;
                }
            }
        }

        let mut contents = String::new();
        for entry in entries {
            contents.push_str(&entry.to_string_lossy());
            contents.push('\n');
        }

        if let Err(err) = fs::write(&self.path, contents) {
            warn!(file = %self.path.display(), error = %err, "could not write library file");
        }
    }
}
