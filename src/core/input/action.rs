//=========================================================================
// Action Trait & Game Actions
//=========================================================================
//
// Game-defined action trait, the built-in closed action set, and the
// per-action state triple derived each tick.
//
// Actions: Opaque identifiers bound to keys by the ActionMapper.
// ActionState: held / just-pressed / just-released, OR-ed across keys.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt::Debug;
use std::hash::Hash;

//=== Internal Dependencies ===============================================

use super::event::KeyCode;

//=== Action Trait ========================================================

/// Marker trait for action enums.
///
/// Actions represent high-level commands (move, jump, interact) mapped
/// from raw keys. The input system routes actions without interpreting them.
///
/// # Requirements
///
/// - `Copy + Eq + Hash`: Efficient passing and map keys
/// - `Debug`: Logging support
/// - `Send + 'static`: Owned by the core thread
pub trait Action: 'static + Send + Copy + Eq + Hash + Debug {}

//=== GameAction ==========================================================

/// The closed set of actions understood by the possession controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameAction {
    MoveForward,
    MoveBackward,
    MoveLeft,
    MoveRight,
    Jump,
    Sprint,
    Crouch,
    Interact,
}

impl Action for GameAction {}

impl GameAction {
    /// Every action, in declaration order.
    pub const ALL: [GameAction; 8] = [
        GameAction::MoveForward,
        GameAction::MoveBackward,
        GameAction::MoveLeft,
        GameAction::MoveRight,
        GameAction::Jump,
        GameAction::Sprint,
        GameAction::Crouch,
        GameAction::Interact,
    ];

    /// Host-facing action name (`"moveForward"`, `"interact"`, ...).
    pub fn name(self) -> &'static str {
        match self {
            GameAction::MoveForward => "moveForward",
            GameAction::MoveBackward => "moveBackward",
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::Jump => "jump",
            GameAction::Sprint => "sprint",
            GameAction::Crouch => "crouch",
            GameAction::Interact => "interact",
        }
    }

    /// Looks up an action by its host-facing name.
    ///
    /// Unknown names return `None`; callers treat that as an inactive action.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|action| action.name() == name)
    }

    /// Default key bindings.
    ///
    /// Movement on WASD and arrows, jump on Space, sprint on Shift,
    /// crouch on Control or C, interact on E or F.
    pub fn default_bindings() -> Vec<(GameAction, Vec<KeyCode>)> {
        vec![
            (GameAction::MoveForward, vec![KeyCode::KeyW, KeyCode::ArrowUp]),
            (GameAction::MoveBackward, vec![KeyCode::KeyS, KeyCode::ArrowDown]),
            (GameAction::MoveLeft, vec![KeyCode::KeyA, KeyCode::ArrowLeft]),
            (GameAction::MoveRight, vec![KeyCode::KeyD, KeyCode::ArrowRight]),
            (GameAction::Jump, vec![KeyCode::Space]),
            (GameAction::Sprint, vec![KeyCode::Shift]),
            (GameAction::Crouch, vec![KeyCode::Control, KeyCode::KeyC]),
            (GameAction::Interact, vec![KeyCode::KeyE, KeyCode::KeyF]),
        ]
    }
}

//=== ActionState =========================================================

/// Per-action state for the current tick.
///
/// `just_pressed` and `just_released` are edges: they are reported for
/// exactly one tick and cleared by `InputSystem::update()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ActionState {
    pub held: bool,
    pub just_pressed: bool,
    pub just_released: bool,
}

impl ActionState {
    /// All flags false.
    pub const INACTIVE: Self = Self {
        held: false,
        just_pressed: false,
        just_released: false,
    };

    /// Combines two states flag-by-flag.
    pub fn or(self, other: Self) -> Self {
        Self {
            held: self.held || other.held,
            just_pressed: self.just_pressed || other.just_pressed,
            just_released: self.just_released || other.just_released,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn names_round_trip_for_every_action() {
        for action in GameAction::ALL {
            assert_eq!(GameAction::from_name(action.name()), Some(action));
        }
    }

    #[test]
    fn unknown_name_is_none() {
        assert_eq!(GameAction::from_name("fly"), None);
        assert_eq!(GameAction::from_name("MoveForward"), None);
    }

    #[test]
    fn default_bindings_cover_every_action_once() {
        let bindings = GameAction::default_bindings();
        let actions: HashSet<_> = bindings.iter().map(|(a, _)| *a).collect();

        assert_eq!(bindings.len(), GameAction::ALL.len());
        assert_eq!(actions.len(), GameAction::ALL.len());
    }

    #[test]
    fn default_interact_keys_are_e_and_f() {
        let bindings = GameAction::default_bindings();
        let (_, keys) = bindings
            .iter()
            .find(|(a, _)| *a == GameAction::Interact)
            .unwrap();

        assert_eq!(keys, &vec![KeyCode::KeyE, KeyCode::KeyF]);
    }

    #[test]
    fn action_state_or_combines_flags() {
        let held = ActionState { held: true, ..ActionState::INACTIVE };
        let released = ActionState { just_released: true, ..ActionState::INACTIVE };

        let combined = held.or(released);

        assert!(combined.held);
        assert!(!combined.just_pressed);
        assert!(combined.just_released);
    }

    #[test]
    fn action_state_default_is_inactive() {
        assert_eq!(ActionState::default(), ActionState::INACTIVE);
    }

    #[test]
    fn action_is_send() {
        fn assert_send<T: Send>() {}
        assert_send::<GameAction>();
    }
}
