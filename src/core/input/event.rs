//=========================================================================
// Input Event Types
//
// Defines the internal representation of low-level keyboard events.
//
// This module abstracts away host-specific input (Winit physical keys,
// browser-style key-name strings) into a unified, engine-friendly format
// used by the input subsystem.
//
// Responsibilities:
// - Represent keyboard keys in a stable, portable way
// - Parse host key names ("w", "arrowup", " ", "shift") into key codes
// - Provide equality and hashing semantics for deduplication
//
// Event Flow:
// ```text
// Platform Layer (Winit) / HostHandle (key names)
//         ↓
//    InputEvent (this module)
//         ↓
//    StateTracker (per-key held / pressed / released)
//         ↓
//    ActionState (high-level game input)
// ```
//
//=========================================================================

//=== KeyCode =============================================================

/// Physical keyboard key identifier.
///
/// Represents the key location, not the character produced. Left and right
/// variants of Shift and Control are folded into a single code, because
/// bindings never distinguish them.
///
/// Coverage:
/// - Alphanumeric keys (A-Z, 0-9)
/// - Arrow keys
/// - Modifier keys used as plain bindings (Shift, Control)
/// - Common special keys (Space, Enter, Escape, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    //--- Numeric Keys -----------------------------------------------------

    /// Number row: 0-9
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    //--- Alphabetic Keys --------------------------------------------------

    /// Letter keys: A-Z
    KeyA, KeyB, KeyC, KeyD, KeyE, KeyF, KeyG, KeyH, KeyI,
    KeyJ, KeyK, KeyL, KeyM, KeyN, KeyO, KeyP, KeyQ, KeyR,
    KeyS, KeyT, KeyU, KeyV, KeyW, KeyX, KeyY, KeyZ,

    //--- Arrow Keys -------------------------------------------------------

    ArrowDown,
    ArrowLeft,
    ArrowRight,
    ArrowUp,

    //--- Modifier Keys ----------------------------------------------------

    /// Either Shift key.
    Shift,

    /// Either Control key.
    Control,

    //--- Special Keys -----------------------------------------------------

    Space,
    Enter,
    Escape,
    Tab,
    Backspace,
    Delete,

    /// Fallback for keys not explicitly mapped by the input layer.
    Unidentified,
}

impl KeyCode {
    /// Parses a host key name into a key code.
    ///
    /// Names follow the browser `KeyboardEvent.key` convention, compared
    /// case-insensitively: single characters (`"w"`, `"7"`, `" "`), arrow
    /// names (`"arrowup"`), and modifier names (`"shift"`, `"control"`).
    /// `"space"` and `"ctrl"` are accepted as aliases.
    ///
    /// Returns `None` for names the engine does not know.
    ///
    /// ```
    /// use drivable_world::prelude::*;
    ///
    /// assert_eq!(KeyCode::from_key_name("W"), Some(KeyCode::KeyW));
    /// assert_eq!(KeyCode::from_key_name(" "), Some(KeyCode::Space));
    /// assert_eq!(KeyCode::from_key_name("F13"), None);
    /// ```
    pub fn from_key_name(name: &str) -> Option<Self> {
        // Space is the only name that is pure whitespace
        if name == " " {
            return Some(KeyCode::Space);
        }

        let lower = name.trim().to_ascii_lowercase();

        let mut chars = lower.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Self::from_char(c);
        }

        match lower.as_str() {
            "arrowup" => Some(KeyCode::ArrowUp),
            "arrowdown" => Some(KeyCode::ArrowDown),
            "arrowleft" => Some(KeyCode::ArrowLeft),
            "arrowright" => Some(KeyCode::ArrowRight),
            "shift" => Some(KeyCode::Shift),
            "control" | "ctrl" => Some(KeyCode::Control),
            "space" | "spacebar" => Some(KeyCode::Space),
            "enter" => Some(KeyCode::Enter),
            "escape" | "esc" => Some(KeyCode::Escape),
            "tab" => Some(KeyCode::Tab),
            "backspace" => Some(KeyCode::Backspace),
            "delete" => Some(KeyCode::Delete),
            _ => None,
        }
    }

    fn from_char(c: char) -> Option<Self> {
        use KeyCode::*;
        let key = match c {
            '0' => Digit0, '1' => Digit1, '2' => Digit2, '3' => Digit3,
            '4' => Digit4, '5' => Digit5, '6' => Digit6, '7' => Digit7,
            '8' => Digit8, '9' => Digit9,

            'a' => KeyA, 'b' => KeyB, 'c' => KeyC, 'd' => KeyD, 'e' => KeyE,
            'f' => KeyF, 'g' => KeyG, 'h' => KeyH, 'i' => KeyI, 'j' => KeyJ,
            'k' => KeyK, 'l' => KeyL, 'm' => KeyM, 'n' => KeyN, 'o' => KeyO,
            'p' => KeyP, 'q' => KeyQ, 'r' => KeyR, 's' => KeyS, 't' => KeyT,
            'u' => KeyU, 'v' => KeyV, 'w' => KeyW, 'x' => KeyX, 'y' => KeyY,
            'z' => KeyZ,

            _ => return None,
        };
        Some(key)
    }
}

//=== InputEvent ==========================================================

/// Low-level keyboard event from the platform layer or a host handle.
///
/// # Event Types
///
/// - **KeyDown/KeyUp**: Discrete keyboard events
/// - **Unidentified**: Unknown/unsupported input (ignored by the system)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputEvent {
    /// Key pressed down.
    KeyDown { key: KeyCode },

    /// Key released.
    KeyUp { key: KeyCode },

    /// Unrecognized or unsupported input.
    Unidentified,
}

impl InputEvent {
    /// Builds a key-down event from a host key name.
    ///
    /// Unknown names produce [`InputEvent::Unidentified`].
    pub fn key_down_named(name: &str) -> Self {
        match KeyCode::from_key_name(name) {
            Some(key) => Self::KeyDown { key },
            None => Self::Unidentified,
        }
    }

    /// Builds a key-up event from a host key name.
    ///
    /// Unknown names produce [`InputEvent::Unidentified`].
    pub fn key_up_named(name: &str) -> Self {
        match KeyCode::from_key_name(name) {
            Some(key) => Self::KeyUp { key },
            None => Self::Unidentified,
        }
    }

    /// Returns the key carried by this event, if any.
    pub fn key(&self) -> Option<KeyCode> {
        match self {
            Self::KeyDown { key } | Self::KeyUp { key } => Some(*key),
            Self::Unidentified => None,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    //=====================================================================
    // Key Name Parsing
    //=====================================================================

    #[test]
    fn parses_letters_case_insensitively() {
        assert_eq!(KeyCode::from_key_name("w"), Some(KeyCode::KeyW));
        assert_eq!(KeyCode::from_key_name("W"), Some(KeyCode::KeyW));
        assert_eq!(KeyCode::from_key_name("e"), Some(KeyCode::KeyE));
    }

    #[test]
    fn parses_digits() {
        assert_eq!(KeyCode::from_key_name("0"), Some(KeyCode::Digit0));
        assert_eq!(KeyCode::from_key_name("9"), Some(KeyCode::Digit9));
    }

    #[test]
    fn parses_arrows() {
        assert_eq!(KeyCode::from_key_name("ArrowUp"), Some(KeyCode::ArrowUp));
        assert_eq!(KeyCode::from_key_name("arrowdown"), Some(KeyCode::ArrowDown));
        assert_eq!(KeyCode::from_key_name("arrowleft"), Some(KeyCode::ArrowLeft));
        assert_eq!(KeyCode::from_key_name("arrowright"), Some(KeyCode::ArrowRight));
    }

    #[test]
    fn parses_space_as_single_blank() {
        assert_eq!(KeyCode::from_key_name(" "), Some(KeyCode::Space));
        assert_eq!(KeyCode::from_key_name("space"), Some(KeyCode::Space));
    }

    #[test]
    fn parses_modifier_names() {
        assert_eq!(KeyCode::from_key_name("Shift"), Some(KeyCode::Shift));
        assert_eq!(KeyCode::from_key_name("control"), Some(KeyCode::Control));
        assert_eq!(KeyCode::from_key_name("ctrl"), Some(KeyCode::Control));
    }

    #[test]
    fn unknown_names_are_none() {
        assert_eq!(KeyCode::from_key_name("f13"), None);
        assert_eq!(KeyCode::from_key_name("?"), None);
        assert_eq!(KeyCode::from_key_name(""), None);
    }

    //=====================================================================
    // InputEvent
    //=====================================================================

    #[test]
    fn named_constructors_build_key_events() {
        assert_eq!(
            InputEvent::key_down_named("e"),
            InputEvent::KeyDown { key: KeyCode::KeyE }
        );
        assert_eq!(
            InputEvent::key_up_named("shift"),
            InputEvent::KeyUp { key: KeyCode::Shift }
        );
    }

    #[test]
    fn named_constructors_fall_back_to_unidentified() {
        assert_eq!(InputEvent::key_down_named("hyper"), InputEvent::Unidentified);
        assert_eq!(InputEvent::key_up_named("hyper"), InputEvent::Unidentified);
    }

    #[test]
    fn key_accessor() {
        assert_eq!(InputEvent::KeyDown { key: KeyCode::KeyA }.key(), Some(KeyCode::KeyA));
        assert_eq!(InputEvent::KeyUp { key: KeyCode::KeyB }.key(), Some(KeyCode::KeyB));
        assert_eq!(InputEvent::Unidentified.key(), None);
    }

    #[test]
    fn key_down_and_key_up_differ() {
        let down = InputEvent::KeyDown { key: KeyCode::KeyA };
        let up = InputEvent::KeyUp { key: KeyCode::KeyA };
        assert_ne!(down, up);
    }
}
