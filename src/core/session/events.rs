//=========================================================================
// Session Events
//=========================================================================
//
// Diagnostic record of what the session did during a tick.
//
// Session operations push events here as they happen. The core loop
// takes the whole queue at the tick boundary and publishes it with the
// frame.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;

use glam::Vec3;

//=== Internal Dependencies ===============================================

use crate::core::world::{RangeProfile, VehicleId};

//=== TransitionError =====================================================

/// Why a control-mode transition was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransitionError {
    /// Enter requested while no vehicle is in range.
    NotEligible,

    /// No registered vehicle could be selected.
    NoCandidate,

    /// Forced enter requested while already driving.
    AlreadyInVehicle,

    /// Exit requested while on foot.
    NotInVehicle,
}

impl fmt::Display for TransitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransitionError::NotEligible => write!(f, "No vehicle in entry range"),
            TransitionError::NoCandidate => write!(f, "No candidate vehicle to enter"),
            TransitionError::AlreadyInVehicle => write!(f, "Player is already in a vehicle"),
            TransitionError::NotInVehicle => write!(f, "Player is not in a vehicle"),
        }
    }
}

impl std::error::Error for TransitionError {}

//=== SessionEvent ========================================================

/// Something observable that happened to the session.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    VehicleRegistered(VehicleId),
    VehicleDeregistered(VehicleId),
    EligibilityChanged(bool),
    RangeProfileChanged(RangeProfile),
    Entered(VehicleId),
    Exited { vehicle: VehicleId, position: Vec3 },
    Rejected(TransitionError),
}

//=== EventQueue ==========================================================

/// Ordered buffer of [`SessionEvent`]s for the current tick.
#[derive(Debug, Default)]
pub struct EventQueue {
    queue: Vec<SessionEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self { queue: Vec::new() }
    }

    pub fn push(&mut self, event: SessionEvent) {
        self.queue.push(event);
    }

    pub fn iter(&self) -> impl Iterator<Item = &SessionEvent> {
        self.queue.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Takes all events, leaving the queue empty.
    pub fn take(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.queue)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_empties_queue_in_order() {
        let mut queue = EventQueue::new();
        queue.push(SessionEvent::EligibilityChanged(true));
        queue.push(SessionEvent::Entered(VehicleId::from("a")));

        let events = queue.take();

        assert_eq!(events.len(), 2);
        assert_eq!(events[0], SessionEvent::EligibilityChanged(true));
        assert!(queue.is_empty());
    }

    #[test]
    fn transition_errors_display() {
        assert_eq!(TransitionError::NotInVehicle.to_string(), "Player is not in a vehicle");
        assert_eq!(TransitionError::NotEligible.to_string(), "No vehicle in entry range");
    }
}
