//! Playback subsystem: engine abstraction, coordinator, queue and position sync.
//!
//! Everything in here is UI-agnostic. The runtime binds the terminal shell
//! to the `Coordinator`/`MediaQueue`/`PositionSync` capability surface, and
//! tests drive the same surface with a fake engine.

mod coordinator;
mod engine;
mod queue;
mod sync;
mod types;

pub use coordinator::Coordinator;
pub use engine::{EngineFactory, MediaEngine, RodioEngine, RodioOutput};
pub use queue::MediaQueue;
pub use sync::{DragState, PositionSync};
pub use types::{EngineError, PlaybackState};

#[cfg(test)]
mod tests;
