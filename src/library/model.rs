//! In-memory library list backed by a `LibraryStore`.

use std::path::{Path, PathBuf};

use super::store::LibraryStore;

pub struct Library {
    entries: Vec<PathBuf>,
    store: LibraryStore,
}

impl Library {
    /// Load the persisted list through `store`.
    pub fn open(store: LibraryStore) -> Self {
        let entries = store.load();
        Self { entries, store }
    }

    pub fn entries(&self) -> &[PathBuf] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&Path> {
        self.entries.get(index).map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append entries in order. Duplicates are permitted.
    pub fn add(&mut self, paths: Vec<PathBuf>) {
        self.entries.extend(paths);
    }

    /// Persist the current list.
    pub fn save(&self) {
        self.store.save(&self.entries);
    }

    /// Empty the list and truncate the persisted file.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.store.save(&self.entries);
    }
}
