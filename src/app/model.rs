//! Application view model: library view, search filter and gesture state.
//!
//! This is the state the UI shell reads and mutates. Playback itself lives
//! in the coordinator; the app only mirrors the values shown on screen
//! (slider position, volume percent) so user gestures and the position
//! sync have one place to meet.

use std::path::{Path, PathBuf};

use crate::library::Library;
use crate::player::DragState;

/// Input mode of the UI shell.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum InputMode {
    Browse,
    Search,
    AddEntry,
}

pub struct App {
    pub library: Library,
    /// Position of the selection within the displayed (filtered) list.
    pub selected: usize,
    pub mode: InputMode,
    pub search_query: String,
    pub add_input: String,
    /// Slider value published by the position sync, in display seconds.
    pub slider_secs: u64,
    /// Displayed volume in percent.
    pub volume: u8,
    pub drag: DragState,
    pub status: Option<String>,

    scrub_secs: Option<u64>,
}

impl App {
    pub fn new(library: Library, volume: u8) -> Self {
        Self {
            library,
            selected: 0,
            mode: InputMode::Browse,
            search_query: String::new(),
            add_input: String::new(),
            slider_secs: 0,
            volume: volume.min(100),
            drag: DragState::default(),
            status: None,
            scrub_secs: None,
        }
    }

    /// Library indices matching the current search query, in library order.
    ///
    /// Matching is a case-insensitive substring test against the full path;
    /// an empty query matches everything.
    pub fn display_indices(&self) -> Vec<usize> {
        let query = self.search_query.to_lowercase();
        self.library
            .entries()
            .iter()
            .enumerate()
            .filter(|(_, path)| {
                query.is_empty() || path.to_string_lossy().to_lowercase().contains(&query)
            })
            .map(|(i, _)| i)
            .collect()
    }

    /// Snapshot of the displayed list as owned paths, for queue building.
    pub fn display_paths(&self) -> Vec<PathBuf> {
        self.display_indices()
            .into_iter()
            .filter_map(|i| self.library.get(i).map(Path::to_path_buf))
            .collect()
    }

    pub fn no_media(&self) -> bool {
        self.library.is_empty()
    }

    pub fn no_matches(&self) -> bool {
        !self.library.is_empty() && !self.search_query.is_empty() && self.display_indices().is_empty()
    }

    /// Move the selection down one entry, wrapping at the end of the view.
    pub fn select_next(&mut self) {
        let len = self.display_indices().len();
        if len > 0 {
            self.selected = (self.selected + 1) % len;
        }
    }

    /// Move the selection up one entry, wrapping to the end of the view.
    pub fn select_prev(&mut self) {
        let len = self.display_indices().len();
        if len > 0 {
            self.selected = if self.selected == 0 { len - 1 } else { self.selected - 1 };
        }
    }

    /// Point the selection at `path` when it is visible in the current view.
    pub fn select_display_path(&mut self, path: &Path) {
        if let Some(pos) = self
            .display_indices()
            .iter()
            .position(|&i| self.library.get(i) == Some(path))
        {
            self.selected = pos;
        }
    }

    // --- search ---

    pub fn enter_search(&mut self) {
        self.mode = InputMode::Search;
    }

    /// Leave search mode, keeping the query as the active filter.
    pub fn exit_search(&mut self) {
        self.mode = InputMode::Browse;
    }

    pub fn clear_search(&mut self) {
        self.search_query.clear();
        self.mode = InputMode::Browse;
        self.ensure_selection_visible();
    }

    pub fn push_search_char(&mut self, c: char) {
        self.search_query.push(c);
        self.ensure_selection_visible();
    }

    pub fn pop_search_char(&mut self) {
        self.search_query.pop();
        self.ensure_selection_visible();
    }

    // --- add prompt ---

    pub fn enter_add(&mut self) {
        self.mode = InputMode::AddEntry;
        self.add_input.clear();
    }

    pub fn cancel_add(&mut self) {
        self.mode = InputMode::Browse;
        self.add_input.clear();
    }

    /// Consume the add prompt's text and return to browse mode.
    pub fn take_add_input(&mut self) -> String {
        self.mode = InputMode::Browse;
        std::mem::take(&mut self.add_input)
    }

    // --- seek gesture ---

    /// Begin a seek drag at the currently displayed slider value. The
    /// position sync leaves the slider alone until the drag ends.
    pub fn begin_seek_drag(&mut self) {
        if !self.drag.seek {
            self.drag.seek = true;
            self.scrub_secs = Some(self.slider_secs);
        }
    }

    /// Pending scrub target while a seek drag is active.
    pub fn scrub_secs(&self) -> Option<u64> {
        self.scrub_secs
    }

    /// Move the pending scrub target, clamped into `0..=duration`.
    pub fn scrub_by(&mut self, delta: i64, duration: u64) {
        if let Some(current) = self.scrub_secs {
            let target = (current as i64 + delta).clamp(0, duration as i64);
            self.scrub_secs = Some(target as u64);
        }
    }

    /// End the drag, yielding the value to seek to. Yields at most once
    /// per drag.
    pub fn end_seek_drag(&mut self) -> Option<u64> {
        self.drag.seek = false;
        self.scrub_secs.take()
    }

    pub fn cancel_seek_drag(&mut self) {
        self.drag.seek = false;
        self.scrub_secs = None;
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status = Some(message.into());
    }

    /// Clamp the selection back into the current view after the filter or
    /// the library changed.
    pub fn ensure_selection_visible(&mut self) {
        let len = self.display_indices().len();
        if self.selected >= len {
            self.selected = 0;
        }
    }
}
