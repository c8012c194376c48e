//=========================================================================
// Global Context
//=========================================================================
//
// Shared data container for the core thread.
//
// Contains state data that systems read/write:
// - session: The game session aggregate
// - frame_input_events / frame_world_events: This tick's inbound messages
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::input::InputEvent;
use crate::core::session::{GameSession, SessionConfig};
use crate::core::world::WorldEvent;

//=== GlobalContext =======================================================

/// Shared context data mutated by [`GlobalSystems`](super::GlobalSystems).
///
/// # Available Data
///
/// - `session`: The game session (registry, proximity, control mode)
/// - `frame_input_events`: Current tick's key events (internal)
/// - `frame_world_events`: Current tick's host notifications (internal)
pub struct GlobalContext {
    /// The game session owned by the core thread.
    ///
    /// Mutate only through its operations; during [`crate::Engine::init`]
    /// this is where initial vehicles are registered.
    pub session: GameSession,

    /// Input events for the current tick.
    ///
    /// Consumed by InputSystem during the update phase.
    pub(crate) frame_input_events: Vec<Vec<InputEvent>>,

    /// World events for the current tick, in arrival order.
    pub(crate) frame_world_events: Vec<WorldEvent>,

    /// Number of completed ticks.
    pub(crate) tick: u64,
}

impl GlobalContext {
    /// Creates a new context with an empty session.
    pub(crate) fn new(config: SessionConfig) -> Self {
        Self {
            session: GameSession::new(config),
            frame_input_events: Vec::new(),
            frame_world_events: Vec::new(),
            tick: 0,
        }
    }

    /// Number of completed ticks.
    pub fn tick(&self) -> u64 {
        self.tick
    }
}
