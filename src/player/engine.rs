//! Playback engine abstraction and its `rodio` implementation.
//!
//! An engine is one playback session bound to a single media resource. The
//! coordinator owns at most one at a time and opens a fresh one per track;
//! dropping an engine releases the session.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use lofty::prelude::*;
use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink};

use super::types::EngineError;

/// The contract the coordinator depends on. All calls are synchronous and
/// issued from the event-loop thread.
pub trait MediaEngine {
    /// Start or resume playback.
    fn play(&mut self);
    /// Pause playback, keeping the session alive.
    fn pause(&mut self);
    /// Elapsed playback time.
    fn position(&self) -> Duration;
    /// Total length of the bound resource, when known.
    fn duration(&self) -> Option<Duration>;
    /// Apply a gain in the engine's native `0.0..=1.0` range.
    fn set_volume(&mut self, gain: f32);
    /// Jump to an absolute position.
    fn seek(&mut self, to: Duration) -> Result<(), EngineError>;
}

/// Opens engines, each bound to one media resource.
pub trait EngineFactory {
    type Engine: MediaEngine;

    fn open(&self, path: &Path) -> Result<Self::Engine, EngineError>;
}

/// Shared audio output from which `RodioEngine` sessions are opened.
pub struct RodioOutput {
    stream: OutputStream,
}

impl RodioOutput {
    pub fn new() -> Result<Self, EngineError> {
        let mut stream = OutputStreamBuilder::open_default_stream()?;
        // rodio logs to stderr when OutputStream is dropped. That's useful in
        // debugging, but noisy for a TUI app.
        stream.log_on_drop(false);
        Ok(Self { stream })
    }
}

impl EngineFactory for RodioOutput {
    type Engine = RodioEngine;

    fn open(&self, path: &Path) -> Result<RodioEngine, EngineError> {
        let file = File::open(path).map_err(|source| EngineError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let source = Decoder::new(BufReader::new(file)).map_err(|source| EngineError::Decode {
            path: path.to_path_buf(),
            source,
        })?;

        // rodio does not expose a total duration on the sink; read it from
        // the container metadata instead.
        let duration = lofty::read_from_path(path)
            .ok()
            .map(|tagged| tagged.properties().duration());

        let sink = Sink::connect_new(self.stream.mixer());
        sink.append(source);
        sink.pause();

        Ok(RodioEngine { sink, duration })
    }
}

/// One `rodio` playback session. Dropping it stops the sound and frees the
/// mixer slot.
pub struct RodioEngine {
    sink: Sink,
    duration: Option<Duration>,
}

impl MediaEngine for RodioEngine {
    fn play(&mut self) {
        self.sink.play();
    }

    fn pause(&mut self) {
        self.sink.pause();
    }

    fn position(&self) -> Duration {
        self.sink.get_pos()
    }

    fn duration(&self) -> Option<Duration> {
        self.duration
    }

    fn set_volume(&mut self, gain: f32) {
        self.sink.set_volume(gain.clamp(0.0, 1.0));
    }

    fn seek(&mut self, to: Duration) -> Result<(), EngineError> {
        self.sink.try_seek(to).map_err(EngineError::from)
    }
}
