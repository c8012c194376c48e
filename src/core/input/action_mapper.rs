//=========================================================================
// Action Mapper
//=========================================================================
//
// Holds the action → keys bindings.
//
// Architecture:
//   Action → HashMap → Vec<KeyCode>
//
// An action is active when any of its keys is. The mapper only owns the
// bindings; per-key state lives in the StateTracker.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::{HashMap, HashSet};

//=== Internal Dependencies ===============================================

use super::{
    action::{Action, ActionState},
    event::KeyCode,
    state_tracker::StateTracker,
};

//=== ActionMapper ========================================================

/// Maps actions to one or more trigger keys.
pub(crate) struct ActionMapper<A: Action> {
    bindings: HashMap<A, Vec<KeyCode>>,
}

impl<A: Action> ActionMapper<A> {
    /// Creates a mapper with no bindings.
    pub(crate) fn new() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    //--- Binding API ------------------------------------------------------

    /// Replaces the key list of an action.
    ///
    /// Duplicate keys in `keys` are collapsed, keeping first occurrence order.
    pub(crate) fn remap(&mut self, action: A, keys: &[KeyCode]) {
        let mut unique = Vec::with_capacity(keys.len());
        for &key in keys {
            if !unique.contains(&key) {
                unique.push(key);
            }
        }
        self.bindings.insert(action, unique);
    }

    /// Removes every key from an action.
    pub(crate) fn unbind(&mut self, action: A) {
        self.bindings.remove(&action);
    }

    //--- Queries ----------------------------------------------------------

    /// Keys bound to an action (empty if unbound).
    pub(crate) fn keys_for(&self, action: A) -> &[KeyCode] {
        self.bindings
            .get(&action)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Every key referenced by at least one binding.
    pub(crate) fn tracked_keys(&self) -> HashSet<KeyCode> {
        self.bindings.values().flatten().copied().collect()
    }

    /// Full binding table.
    pub(crate) fn bindings(&self) -> &HashMap<A, Vec<KeyCode>> {
        &self.bindings
    }

    /// Derives the action state by OR-ing the states of its keys.
    pub(crate) fn resolve(&self, action: A, tracker: &StateTracker) -> ActionState {
        self.keys_for(action)
            .iter()
            .fold(ActionState::INACTIVE, |acc, &key| acc.or(tracker.key_state(key)))
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
