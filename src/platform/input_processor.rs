//=========================================================================
// Input Processor
//=========================================================================
//
// Converts Winit keyboard events into engine InputEvents.
//
// Architecture:
//   Winit KeyEvent → InputProcessor → InputEvent (engine type) → InputBuffer
//
// OS auto-repeat is dropped: a held key is one press until released.
// Left/right Shift and Control fold into single codes; the folded key
// goes down with the first side and up with the last. Unmapped keys
// (F13-F24, exotic keyboards) are filtered (returns None).
//
// Physical keys still held are tracked so a focus loss can release them.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashSet;

use winit::{
    event::{ElementState, KeyEvent},
    keyboard::{KeyCode as WinitKeyCode, PhysicalKey},
};

//=== Internal Dependencies ===============================================

use crate::core::input::{InputEvent, KeyCode};

//=== InputProcessor ======================================================

/// Converts Winit key events to engine InputEvents.
pub(crate) struct InputProcessor {
    held: HashSet<WinitKeyCode>,
}

impl InputProcessor {
    pub(crate) fn new() -> Self {
        Self {
            held: HashSet::new(),
        }
    }

    //--- Event Processing -------------------------------------------------

    /// Converts a Winit KeyEvent (filters repeats and unmapped keys).
    pub(crate) fn process_key_event(&mut self, key_event: &KeyEvent) -> Option<InputEvent> {
        self.convert(key_event.physical_key, key_event.state, key_event.repeat)
    }

    /// Forgets every held key and returns a KeyUp for each engine key.
    ///
    /// Key-ups are not delivered while the window is unfocused.
    pub(crate) fn release_all(&mut self) -> Vec<InputEvent> {
        let mut released: Vec<KeyCode> = Vec::new();
        for code in self.held.drain() {
            let key = KeyCode::from(code);
            if !released.contains(&key) {
                released.push(key);
            }
        }
        released
            .into_iter()
            .map(|key| InputEvent::KeyUp { key })
            .collect()
    }

    //--- Internal Helpers -------------------------------------------------

    pub(crate) fn convert(
        &mut self,
        physical_key: PhysicalKey,
        state: ElementState,
        repeat: bool,
    ) -> Option<InputEvent> {
        if repeat {
            return None;
        }

        let code = match physical_key {
            PhysicalKey::Code(code) => code,
            _ => return None,
        };

        let key = KeyCode::from(code);
        if matches!(key, KeyCode::Unidentified) {
            return None;
        }

        match state {
            ElementState::Pressed => {
                let already_down = self.is_held(key);
                self.held.insert(code);
                (!already_down).then_some(InputEvent::KeyDown { key })
            }
            ElementState::Released => {
                self.held.remove(&code);
                (!self.is_held(key)).then_some(InputEvent::KeyUp { key })
            }
        }
    }

    /// True while any physical key folding into `key` is down.
    fn is_held(&self, key: KeyCode) -> bool {
        self.held.iter().any(|code| KeyCode::from(*code) == key)
    }
}

//=========================================================================
// Winit Conversions
//=========================================================================

/// Converts Winit physical key codes to engine key codes.
///
/// Maps A-Z, 0-9, arrows, Shift, Control, and common special keys.
/// Unmapped keys (F13-F24, numpad, media keys) return `KeyCode::Unidentified`.
impl From<WinitKeyCode> for KeyCode {
    fn from(code: WinitKeyCode) -> Self {
        use WinitKeyCode::*;
        match code {
            //--- Digits -------------------------------------------------------

            Digit0 => KeyCode::Digit0,
            Digit1 => KeyCode::Digit1,
            Digit2 => KeyCode::Digit2,
            Digit3 => KeyCode::Digit3,
            Digit4 => KeyCode::Digit4,
            Digit5 => KeyCode::Digit5,
            Digit6 => KeyCode::Digit6,
            Digit7 => KeyCode::Digit7,
            Digit8 => KeyCode::Digit8,
            Digit9 => KeyCode::Digit9,

            //--- Letters ------------------------------------------------------

            KeyA => KeyCode::KeyA,
            KeyB => KeyCode::KeyB,
            KeyC => KeyCode::KeyC,
            KeyD => KeyCode::KeyD,
            KeyE => KeyCode::KeyE,
            KeyF => KeyCode::KeyF,
            KeyG => KeyCode::KeyG,
            KeyH => KeyCode::KeyH,
            KeyI => KeyCode::KeyI,
            KeyJ => KeyCode::KeyJ,
            KeyK => KeyCode::KeyK,
            KeyL => KeyCode::KeyL,
            KeyM => KeyCode::KeyM,
            KeyN => KeyCode::KeyN,
            KeyO => KeyCode::KeyO,
            KeyP => KeyCode::KeyP,
            KeyQ => KeyCode::KeyQ,
            KeyR => KeyCode::KeyR,
            KeyS => KeyCode::KeyS,
            KeyT => KeyCode::KeyT,
            KeyU => KeyCode::KeyU,
            KeyV => KeyCode::KeyV,
            KeyW => KeyCode::KeyW,
            KeyX => KeyCode::KeyX,
            KeyY => KeyCode::KeyY,
            KeyZ => KeyCode::KeyZ,

            //--- Arrows -------------------------------------------------------

            ArrowUp => KeyCode::ArrowUp,
            ArrowDown => KeyCode::ArrowDown,
            ArrowLeft => KeyCode::ArrowLeft,
            ArrowRight => KeyCode::ArrowRight,

            //--- Modifiers ----------------------------------------------------

            ShiftLeft | ShiftRight => KeyCode::Shift,
            ControlLeft | ControlRight => KeyCode::Control,

            //--- Special ------------------------------------------------------

            Space => KeyCode::Space,
            Enter => KeyCode::Enter,
            Escape => KeyCode::Escape,
            Tab => KeyCode::Tab,
            Backspace => KeyCode::Backspace,
            Delete => KeyCode::Delete,

            _ => KeyCode::Unidentified,
        }
    }
}

//=========================================================================
// Tests
//=========================================================================
