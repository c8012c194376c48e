//=========================================================================
// State Tracker
//=========================================================================
//
// Per-key input state with single-tick edge detection.
//
// Architecture:
//   InputEvent → process_events() → HashMap<KeyCode, ActionState> → query
//
// Tick lifecycle: process_events() → query → clear_edges()
//
// Only tracked keys (those referenced by a binding) are recorded. Events
// for any other key are dropped.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

use log::trace;

//=== Internal Dependencies ===============================================

use super::action::ActionState;
use super::event::{InputEvent, KeyCode};

//=== StateTracker ========================================================

/// Tracks persistent state (keys held) and per-tick edges (pressed/released).
pub struct StateTracker {
    keys: HashMap<KeyCode, ActionState>,
}

impl StateTracker {
    /// Creates a tracker with no tracked keys.
    pub fn new() -> Self {
        Self {
            keys: HashMap::new(),
        }
    }

    //--- Tracked Key Set --------------------------------------------------

    /// Replaces the tracked key set and resets every tracked key.
    ///
    /// Keys that were held before the call report as released-and-idle
    /// afterwards; no edges are synthesised.
    pub fn track_keys<I>(&mut self, keys: I)
    where
        I: IntoIterator<Item = KeyCode>,
    {
        self.keys.clear();
        for key in keys {
            self.keys.insert(key, ActionState::INACTIVE);
        }
    }

    /// Returns `true` if events for `key` are recorded.
    pub fn is_tracked(&self, key: KeyCode) -> bool {
        self.keys.contains_key(&key)
    }

    //--- Tick Processing --------------------------------------------------

    /// Processes input events, updating internal state.
    pub fn process_events(&mut self, events: &[InputEvent]) {
        for event in events {
            self.process_event(event);
        }
    }

    /// Clears just-pressed / just-released edges once they have been observed.
    pub fn clear_edges(&mut self) {
        for state in self.keys.values_mut() {
            state.just_pressed = false;
            state.just_released = false;
        }
    }

    //--- Internal Helpers -------------------------------------------------

    fn process_event(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::KeyDown { key } => match self.keys.get_mut(&key) {
                Some(state) => {
                    // Auto-repeat must not re-fire the press edge
                    if !state.held {
                        state.just_pressed = true;
                    }
                    state.held = true;
                }
                None => trace!("Ignoring key down for untracked {:?}", key),
            },

            InputEvent::KeyUp { key } => match self.keys.get_mut(&key) {
                Some(state) => {
                    // Only mark as released if it was actually down
                    if state.held {
                        state.held = false;
                        state.just_released = true;
                    }
                }
                None => trace!("Ignoring key up for untracked {:?}", key),
            },

            InputEvent::Unidentified => {}
        }
    }

    //=====================================================================
    // Query API
    //=====================================================================

    /// Returns the state triple for a key (inactive if untracked).
    pub fn key_state(&self, key: KeyCode) -> ActionState {
        self.keys.get(&key).copied().unwrap_or_default()
    }

    /// Returns `true` while key is held.
    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.key_state(key).held
    }

    /// Returns `true` if key transitioned UP → DOWN this tick.
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.key_state(key).just_pressed
    }

    /// Returns `true` if key transitioned DOWN → UP this tick.
    pub fn is_key_released(&self, key: KeyCode) -> bool {
        self.key_state(key).just_released
    }

    /// Returns an iterator over all keys currently held.
    pub fn keys_down(&self) -> impl Iterator<Item = KeyCode> + '_ {
        self.keys
            .iter()
            .filter(|(_, state)| state.held)
            .map(|(key, _)| *key)
    }
}

//--- Trait Implementations -----------------------------------------------

impl Default for StateTracker {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
