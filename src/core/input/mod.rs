//=========================================================================
// Input System
//=========================================================================
//
// High-level interface for keyboard input within the engine.
//
// Architecture:
//   InputEvent batches → StateTracker (per key) → ActionMapper (per action)
//
// Tick lifecycle:
//   process_batches() → queries (same snapshot all tick) → update()
//
// Notes:
// This system is owned by GlobalSystems and lives on the core thread.
// Remapping an action re-initialises the tracked key set.
//
//=========================================================================

//=== Submodules ==========================================================

pub mod action;
pub mod event;
mod action_mapper;
mod state_tracker;

//=== Public API ==========================================================

pub use action::{Action, ActionState, GameAction};
pub use event::{InputEvent, KeyCode};
pub use state_tracker::StateTracker;

//=== External Dependencies ===============================================

use std::collections::HashMap;

use log::debug;

//=== Internal Dependencies ===============================================

use action_mapper::ActionMapper;

//=== InputSystem =========================================================

/// Owns key bindings and per-key state, and answers action queries.
///
/// ```
/// use drivable_world::prelude::*;
///
/// let mut input = InputSystem::<GameAction>::with_default_bindings();
///
/// input.process_events(&[InputEvent::key_down_named("w")]);
/// assert!(input.is_action_held(GameAction::MoveForward));
/// assert!(input.is_action_just_pressed(GameAction::MoveForward));
///
/// input.update();
/// assert!(input.is_action_held(GameAction::MoveForward));
/// assert!(!input.is_action_just_pressed(GameAction::MoveForward));
/// ```
pub struct InputSystem<A: Action> {
    mapper: ActionMapper<A>,
    tracker: StateTracker,
}

impl<A: Action> InputSystem<A> {
    //--- Construction -----------------------------------------------------

    /// Creates a system with no bindings.
    pub fn new() -> Self {
        Self {
            mapper: ActionMapper::new(),
            tracker: StateTracker::new(),
        }
    }

    /// Creates a system from a list of `(action, keys)` bindings.
    pub fn with_bindings<I>(bindings: I) -> Self
    where
        I: IntoIterator<Item = (A, Vec<KeyCode>)>,
    {
        let mut system = Self::new();
        for (action, keys) in bindings {
            system.mapper.remap(action, &keys);
        }
        system.retrack();
        system
    }

    //--- Binding API ------------------------------------------------------

    /// Replaces the key list of an action and resets all tracked key state.
    pub fn remap_action(&mut self, action: A, keys: &[KeyCode]) {
        debug!("Remapping {:?} to {:?}", action, keys);
        self.mapper.remap(action, keys);
        self.retrack();
    }

    /// Removes all keys from an action and resets all tracked key state.
    pub fn unbind_action(&mut self, action: A) {
        debug!("Unbinding {:?}", action);
        self.mapper.unbind(action);
        self.retrack();
    }

    /// Keys bound to an action (empty if unbound).
    pub fn keys_for(&self, action: A) -> &[KeyCode] {
        self.mapper.keys_for(action)
    }

    /// Returns a copy of the current binding table.
    pub fn bindings(&self) -> HashMap<A, Vec<KeyCode>> {
        self.mapper.bindings().clone()
    }

    //--- Tick Processing --------------------------------------------------

    /// Applies a batch of events to key state.
    pub fn process_events(&mut self, events: &[InputEvent]) {
        self.tracker.process_events(events);
    }

    /// Consumes all input batches received during the current tick.
    pub fn process_batches(&mut self, batches: &mut Vec<Vec<InputEvent>>) {
        for batch in batches.drain(..) {
            self.tracker.process_events(&batch);
        }
    }

    /// Ends the tick: clears just-pressed / just-released edges.
    pub fn update(&mut self) {
        self.tracker.clear_edges();
    }

    //--- Query Methods ----------------------------------------------------

    /// Returns the state triple of an action.
    pub fn action_state(&self, action: A) -> ActionState {
        self.mapper.resolve(action, &self.tracker)
    }

    /// Returns `true` while any key of the action is held.
    pub fn is_action_held(&self, action: A) -> bool {
        self.action_state(action).held
    }

    /// Returns `true` if any key of the action was pressed this tick.
    pub fn is_action_just_pressed(&self, action: A) -> bool {
        self.action_state(action).just_pressed
    }

    /// Returns `true` if any key of the action was released this tick.
    pub fn is_action_just_released(&self, action: A) -> bool {
        self.action_state(action).just_released
    }

    /// Low-level key state, independent of bindings.
    pub fn key_state(&self, key: KeyCode) -> ActionState {
        self.tracker.key_state(key)
    }

    //--- Internal Helpers -------------------------------------------------

    fn retrack(&mut self) {
        self.tracker.track_keys(self.mapper.tracked_keys());
    }
}

impl InputSystem<GameAction> {
    /// Creates a system bound to [`GameAction::default_bindings`].
    pub fn with_default_bindings() -> Self {
        Self::with_bindings(GameAction::default_bindings())
    }

    /// Name-based query used by hosts that speak action names.
    ///
    /// Unknown names are inactive.
    pub fn action_state_by_name(&self, name: &str) -> ActionState {
        GameAction::from_name(name)
            .map(|action| self.action_state(action))
            .unwrap_or_default()
    }
}

impl<A: Action> Default for InputSystem<A> {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    //--- Test Helpers -----------------------------------------------------

    fn press(input: &mut InputSystem<GameAction>, name: &str) {
        input.process_events(&[InputEvent::key_down_named(name)]);
    }

    fn release(input: &mut InputSystem<GameAction>, name: &str) {
        input.process_events(&[InputEvent::key_up_named(name)]);
    }

    fn held_pressed(input: &InputSystem<GameAction>, action: GameAction) -> (bool, bool) {
        let state = input.action_state(action);
        (state.held, state.just_pressed)
    }

    //--- Tests ------------------------------------------------------------

    #[test]
    fn press_update_release_cycle() {
        let mut input = InputSystem::with_default_bindings();

        press(&mut input, "w");
        assert_eq!(held_pressed(&input, GameAction::MoveForward), (true, true));

        input.update();
        assert_eq!(held_pressed(&input, GameAction::MoveForward), (true, false));

        release(&mut input, "w");
        assert_eq!(held_pressed(&input, GameAction::MoveForward), (false, false));
        assert!(input.is_action_just_released(GameAction::MoveForward));

        input.update();
        assert!(!input.is_action_just_released(GameAction::MoveForward));
    }

    #[test]
    fn any_bound_key_activates_action() {
        let mut input = InputSystem::with_default_bindings();

        press(&mut input, "ArrowUp");

        assert!(input.is_action_held(GameAction::MoveForward));
        assert!(!input.is_action_held(GameAction::MoveBackward));
    }

    #[test]
    fn action_stays_held_while_one_key_remains() {
        let mut input = InputSystem::with_default_bindings();

        press(&mut input, "e");
        press(&mut input, "f");
        input.update();
        release(&mut input, "e");

        let state = input.action_state(GameAction::Interact);
        assert!(state.held);
        assert!(state.just_released);
    }

    #[test]
    fn remap_replaces_keys_and_resets_state() {
        let mut input = InputSystem::with_default_bindings();
        press(&mut input, "space");
        assert!(input.is_action_held(GameAction::Jump));

        input.remap_action(GameAction::Jump, &[KeyCode::KeyJ]);

        assert!(!input.is_action_held(GameAction::Jump));
        assert_eq!(input.keys_for(GameAction::Jump), &[KeyCode::KeyJ]);

        press(&mut input, " ");
        assert!(!input.is_action_held(GameAction::Jump));

        press(&mut input, "j");
        assert!(input.is_action_just_pressed(GameAction::Jump));
    }

    #[test]
    fn remap_resets_other_actions_too() {
        let mut input = InputSystem::with_default_bindings();
        press(&mut input, "w");

        input.remap_action(GameAction::Jump, &[KeyCode::KeyJ]);

        assert!(!input.is_action_held(GameAction::MoveForward));
    }

    #[test]
    fn unbound_action_is_inactive() {
        let mut input = InputSystem::with_default_bindings();
        input.unbind_action(GameAction::Crouch);

        press(&mut input, "c");

        assert_eq!(input.action_state(GameAction::Crouch), ActionState::INACTIVE);
    }

    #[test]
    fn unknown_key_names_are_ignored() {
        let mut input = InputSystem::with_default_bindings();

        press(&mut input, "hyper");

        for action in GameAction::ALL {
            assert!(!input.is_action_held(action));
        }
    }

    #[test]
    fn name_queries_fall_back_to_inactive() {
        let mut input = InputSystem::with_default_bindings();
        press(&mut input, "shift");

        assert!(input.action_state_by_name("sprint").held);
        assert_eq!(input.action_state_by_name("teleport"), ActionState::INACTIVE);
    }

    #[test]
    fn process_batches_drains_all() {
        let mut input = InputSystem::with_default_bindings();
        let mut batches = vec![
            vec![InputEvent::key_down_named("a")],
            vec![InputEvent::key_down_named("d")],
        ];

        input.process_batches(&mut batches);

        assert!(batches.is_empty());
        assert!(input.is_action_held(GameAction::MoveLeft));
        assert!(input.is_action_held(GameAction::MoveRight));
    }

    #[test]
    fn bindings_returns_table() {
        let input = InputSystem::with_default_bindings();
        let bindings = input.bindings();

        assert_eq!(bindings.len(), GameAction::ALL.len());
        assert_eq!(bindings[&GameAction::Sprint], vec![KeyCode::Shift]);
    }
}
