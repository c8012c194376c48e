//=========================================================================
// Possession Controller
//=========================================================================
//
// Turns one tick of action state into session transitions and a routed
// control input.
//
// Per tick:
//   1. boost held        → Extended range profile, else Standard
//   2. interact pressed  → enter (on foot) or exit (driving)
//   3. movement actions  → ControlInput for the active target
//
//=========================================================================

//=== External Dependencies ===============================================

use log::trace;

//=== Internal Dependencies ===============================================

use super::{ControlMode, GameSession};
use crate::core::input::{GameAction, InputSystem};
use crate::core::world::{RangeProfile, VehicleId};

//=== ControlTarget =======================================================

/// Entity that receives this tick's movement input.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ControlTarget {
    Player,
    Vehicle(VehicleId),
}

//=== ControlInput ========================================================

/// Movement intent for the active target, read once per tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlInput {
    pub target: ControlTarget,
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    pub sprint: bool,
    pub crouch: bool,
}

impl ControlInput {
    /// No movement, addressed to the player.
    pub fn idle() -> Self {
        Self::idle_for(ControlTarget::Player)
    }

    pub fn idle_for(target: ControlTarget) -> Self {
        Self {
            target,
            forward: false,
            backward: false,
            left: false,
            right: false,
            jump: false,
            sprint: false,
            crouch: false,
        }
    }

    fn read(input: &InputSystem<GameAction>, target: ControlTarget) -> Self {
        Self {
            target,
            forward: input.is_action_held(GameAction::MoveForward),
            backward: input.is_action_held(GameAction::MoveBackward),
            left: input.is_action_held(GameAction::MoveLeft),
            right: input.is_action_held(GameAction::MoveRight),
            jump: input.is_action_held(GameAction::Jump),
            sprint: input.is_action_held(GameAction::Sprint),
            crouch: input.is_action_held(GameAction::Crouch),
        }
    }

    /// Forward minus backward, in [-1, 1].
    pub fn throttle(&self) -> f32 {
        axis(self.forward, self.backward)
    }

    /// Right minus left, in [-1, 1].
    pub fn steer(&self) -> f32 {
        axis(self.right, self.left)
    }
}

impl Default for ControlInput {
    fn default() -> Self {
        Self::idle()
    }
}

fn axis(positive: bool, negative: bool) -> f32 {
    (positive as i8 - negative as i8) as f32
}

//=== PossessionController ================================================

/// Drives enter/exit and range selection from action state.
///
/// # Default Values
///
/// - **Interact**: [`GameAction::Interact`]
/// - **Boost**: [`GameAction::Sprint`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PossessionController {
    interact: GameAction,
    boost: GameAction,
}

impl PossessionController {
    pub fn new() -> Self {
        Self {
            interact: GameAction::Interact,
            boost: GameAction::Sprint,
        }
    }

    /// Action whose press toggles between on foot and driving.
    pub fn with_interact_action(mut self, action: GameAction) -> Self {
        self.interact = action;
        self
    }

    /// Action whose hold selects the extended entry range.
    pub fn with_boost_action(mut self, action: GameAction) -> Self {
        self.boost = action;
        self
    }

    /// Applies one tick of input to the session.
    ///
    /// Must run before the input system clears its edges for the tick.
    pub fn update(
        &self,
        input: &InputSystem<GameAction>,
        session: &mut GameSession,
    ) -> ControlInput {
        let profile = if input.is_action_held(self.boost) {
            RangeProfile::Extended
        } else {
            RangeProfile::Standard
        };
        session.set_range_profile(profile);

        if input.is_action_just_pressed(self.interact) {
            // Rejections are logged and queued by the session itself
            let outcome = match session.control_mode() {
                ControlMode::Player => session.enter_vehicle().map(|_| ()),
                ControlMode::Vehicle => session.exit_vehicle().map(|_| ()),
            };
            trace!("Interact handled: {:?}", outcome);
        }

        let target = match session.possessed_id() {
            Some(id) => ControlTarget::Vehicle(id.clone()),
            None => ControlTarget::Player,
        };
        ControlInput::read(input, target)
    }
}

impl Default for PossessionController {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
