//=========================================================================
// Session Frame
//=========================================================================
//
// Per-tick output published by the core thread.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::Vec3;

//=== Internal Dependencies ===============================================

use super::{ControlInput, ControlMode, SessionEvent, SessionSnapshot};

//=== SessionFrame ========================================================

/// Everything a renderer, HUD, or physics integration needs from one tick.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionFrame {
    /// Monotonic tick counter, starting at 1.
    pub tick: u64,

    pub snapshot: SessionSnapshot,

    /// Movement intent for the active target.
    pub control: ControlInput,

    /// Set on the tick of an exit; the player body must be moved here.
    pub exit_position: Option<Vec3>,

    /// Session diagnostics raised during this tick.
    pub events: Vec<SessionEvent>,
}

//=== FrameBacklog ========================================================

/// One-shot frame data that has not reached the receiver yet.
///
/// Snapshot and control input are superseded every tick, so a frame that
/// cannot be sent only loses its exit position and events. Those are held
/// here and carried by the next frame that goes out.
#[derive(Debug, Default)]
pub(crate) struct FrameBacklog {
    exit_position: Option<Vec3>,
    events: Vec<SessionEvent>,
}

impl FrameBacklog {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.exit_position.is_none() && self.events.is_empty()
    }

    /// Moves held data into `frame`. Held events come first; a newer exit
    /// position wins, and none is carried into a frame that is driving.
    pub(crate) fn attach(&mut self, mut frame: SessionFrame) -> SessionFrame {
        let held_exit = self.exit_position.take();
        if frame.exit_position.is_none() && frame.snapshot.mode == ControlMode::Player {
            frame.exit_position = held_exit;
        }

        if !self.events.is_empty() {
            let mut events = std::mem::take(&mut self.events);
            events.append(&mut frame.events);
            frame.events = events;
        }
        frame
    }

    /// Keeps the one-shot parts of a frame that could not be sent.
    pub(crate) fn hold(&mut self, frame: SessionFrame) {
        if frame.exit_position.is_some() {
            self.exit_position = frame.exit_position;
        }
        self.events.extend(frame.events);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
