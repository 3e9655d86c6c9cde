//! Periodic sync between the engine position and the displayed slider.

use std::time::{Duration, Instant};

use super::coordinator::Coordinator;
use super::engine::EngineFactory;

/// Transient UI gesture flags.
///
/// While the seek flag is set the periodic sync must not overwrite the
/// position slider; the runtime applies the gesture's final value itself as
/// one explicit seek on release. The volume flag plays the same role for
/// the volume knob, whose only other writer is the user.
#[derive(Debug, Clone, Copy, Default)]
pub struct DragState {
    pub seek: bool,
    pub volume: bool,
}

/// Recurring poll that publishes the engine position to the display.
///
/// Driven from the event-loop thread. `start`/`stop` tie the tick to the
/// coordinator lifecycle instead of keeping an always-on timer.
#[derive(Debug)]
pub struct PositionSync {
    interval: Duration,
    next_due: Option<Instant>,
}

impl PositionSync {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_due: None,
        }
    }

    pub fn start(&mut self, now: Instant) {
        self.next_due = Some(now + self.interval);
    }

    pub fn stop(&mut self) {
        self.next_due = None;
    }

    pub fn is_running(&self) -> bool {
        self.next_due.is_some()
    }

    /// Poll once. Returns the slider value to publish when a tick is due,
    /// playback is running, no seek drag is active and the position lies
    /// within the known duration bound.
    pub fn poll<F: EngineFactory>(
        &mut self,
        now: Instant,
        coordinator: &Coordinator<F>,
        drag: DragState,
    ) -> Option<u64> {
        let due = self.next_due?;
        if now < due {
            return None;
        }
        // Skip missed ticks rather than bursting to catch up.
        let mut next = due + self.interval;
        while next <= now {
            next += self.interval;
        }
        self.next_due = Some(next);

        if !coordinator.is_playing() || drag.seek {
            return None;
        }

        let secs = coordinator.position_secs()?;
        let duration = coordinator.duration_secs();
        (duration > 0 && secs <= duration).then_some(secs)
    }
}
