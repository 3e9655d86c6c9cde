//! The media queue: a snapshot of the displayed track list plus a cursor.

use std::path::{Path, PathBuf};

/// Ordered sequence of track paths with a wrap-around cursor.
///
/// The queue is rebuilt from the currently displayed (possibly filtered)
/// list at the moment a track is selected; it does not follow later edits
/// to the library or the search filter.
#[derive(Debug, Clone, Default)]
pub struct MediaQueue {
    tracks: Vec<PathBuf>,
    cursor: usize,
}

impl MediaQueue {
    /// Snapshot `tracks` and place the cursor on `start`, clamped into
    /// range for non-empty queues.
    pub fn build_from(tracks: Vec<PathBuf>, start: usize) -> Self {
        let cursor = if tracks.is_empty() {
            0
        } else {
            start.min(tracks.len() - 1)
        };
        Self { tracks, cursor }
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// The entry under the cursor.
    pub fn current(&self) -> Option<&Path> {
        self.tracks.get(self.cursor).map(PathBuf::as_path)
    }

    pub fn cursor(&self) -> Option<usize> {
        if self.tracks.is_empty() { None } else { Some(self.cursor) }
    }

    /// Advance the cursor, wrapping at the end. No-op on an empty queue.
    pub fn next(&mut self) -> Option<&Path> {
        if self.tracks.is_empty() {
            return None;
        }
        self.cursor = (self.cursor + 1) % self.tracks.len();
        self.current()
    }

    /// Move the cursor back, wrapping to the last entry at 0. No-op on an
    /// empty queue.
    pub fn previous(&mut self) -> Option<&Path> {
        if self.tracks.is_empty() {
            return None;
        }
        self.cursor = if self.cursor == 0 {
            self.tracks.len() - 1
        } else {
            self.cursor - 1
        };
        self.current()
    }
}
