//! Shared types for the playback subsystem.

use std::path::PathBuf;

use thiserror::Error;

/// Lifecycle of the playback coordinator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PlaybackState {
    /// No engine handle and no selected track.
    Idle,
    /// A handle exists and the engine is running.
    Playing,
    /// A handle exists and the engine is paused.
    Paused,
    /// The handle was torn down; the track is kept so playback can restart.
    Stopped,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self::Idle
    }
}

/// Errors crossing the engine boundary.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("could not open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: rodio::decoder::DecoderError,
    },
    #[error("no usable audio output: {0}")]
    Output(#[from] rodio::StreamError),
    #[error("seek failed: {0}")]
    Seek(#[from] rodio::source::SeekError),
}
