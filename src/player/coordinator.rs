//! The playback coordinator: owns the engine handle and the playback flags.

use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{debug, warn};

use super::engine::{EngineFactory, MediaEngine};
use super::types::PlaybackState;

/// Reconciles play/pause/stop intents from the UI shell with a single,
/// exclusively owned engine handle.
///
/// The handle is created lazily on first play, replaced on track change and
/// dropped on stop and shutdown. `is_playing` is true only while a live
/// handle is running. No engine failure escapes this type; they are logged
/// and degrade the state instead.
pub struct Coordinator<F: EngineFactory> {
    factory: F,
    engine: Option<F::Engine>,
    playing: bool,
    current: Option<PathBuf>,
    volume: u8,
    duration_secs: u64,
}

impl<F: EngineFactory> Coordinator<F> {
    pub fn new(factory: F, volume: u8) -> Self {
        Self {
            factory,
            engine: None,
            playing: false,
            current: None,
            volume: volume.min(100),
            duration_secs: 0,
        }
    }

    pub fn state(&self) -> PlaybackState {
        match (&self.engine, self.playing, &self.current) {
            (Some(_), true, _) => PlaybackState::Playing,
            (Some(_), false, _) => PlaybackState::Paused,
            (None, _, Some(_)) => PlaybackState::Stopped,
            (None, _, None) => PlaybackState::Idle,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn current_track(&self) -> Option<&Path> {
        self.current.as_deref()
    }

    /// Duration of the current track in display seconds, 0 when unknown.
    pub fn duration_secs(&self) -> u64 {
        self.duration_secs
    }

    pub fn volume(&self) -> u8 {
        self.volume
    }

    /// Stop and release any current handle, then bind and start a new one.
    ///
    /// On engine failure the error is logged and the coordinator reverts to
    /// `Idle`.
    pub fn select_track(&mut self, path: &Path) {
        // Release the old handle before binding a new one; at most one
        // session is live at any time.
        self.engine = None;
        self.playing = false;
        self.duration_secs = 0;

        match self.factory.open(path) {
            Ok(mut engine) => {
                engine.set_volume(f32::from(self.volume) / 100.0);
                engine.play();
                self.duration_secs = engine.duration().map(|d| d.as_secs()).unwrap_or(0);
                self.engine = Some(engine);
                self.playing = true;
                self.current = Some(path.to_path_buf());
                debug!(track = %path.display(), "started playback");
            }
            Err(err) => {
                warn!(track = %path.display(), error = %err, "could not start playback");
                self.current = None;
            }
        }
    }

    /// Start or resume playback of the current track. A no-op while already
    /// playing or when no track has been selected yet.
    pub fn play(&mut self) {
        if self.playing {
            return;
        }
        let Some(path) = self.current.clone() else {
            return;
        };

        match self.engine.as_mut() {
            Some(engine) => {
                engine.play();
                self.playing = true;
            }
            // Stopped earlier: the handle is gone, bind a fresh one.
            None => self.select_track(&path),
        }
    }

    pub fn pause(&mut self) {
        if let Some(engine) = self.engine.as_mut() {
            engine.pause();
            self.playing = false;
        }
    }

    /// Tear down the engine but keep the current track so `play` can
    /// restart it.
    pub fn stop(&mut self) {
        if self.engine.take().is_some() {
            debug!("stopped playback");
        }
        self.playing = false;
    }

    /// Apply a volume in percent (clamped to 100). The engine call is
    /// skipped when no handle exists; the value still sticks for the next
    /// session.
    pub fn set_volume(&mut self, percent: u8) {
        self.volume = percent.min(100);
        if let Some(engine) = self.engine.as_mut() {
            engine.set_volume(f32::from(self.volume) / 100.0);
        }
    }

    /// Seek to an absolute position in display seconds. Only valid while a
    /// handle exists; failures are logged and playback continues.
    pub fn seek(&mut self, secs: u64) {
        if let Some(engine) = self.engine.as_mut() {
            if let Err(err) = engine.seek(Duration::from_secs(secs)) {
                warn!(secs, error = %err, "seek failed");
            }
        }
    }

    /// Engine position in display seconds, when a handle exists.
    pub fn position_secs(&self) -> Option<u64> {
        self.engine.as_ref().map(|engine| engine.position().as_secs())
    }

    /// Release the engine handle. Called on application exit.
    pub fn shutdown(&mut self) {
        self.engine = None;
        self.playing = false;
    }
}
