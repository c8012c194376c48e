//=========================================================================
// Platform Bridge Interface
//=========================================================================
//
// Messages and errors exchanged between producer threads (winit platform,
// host integrations) and the core thread.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;

//=== Internal Dependencies ===============================================

use crate::core::input::InputEvent;
use crate::core::world::WorldEvent;

//=== PlatformEvent =======================================================

/// Message sent to the core thread over the bounded channel.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum PlatformEvent {
    /// Key events captured since the last send.
    Inputs(Vec<InputEvent>),

    /// Notification from the physics / scene integration.
    World(WorldEvent),

    /// Window close requested.
    WindowClosed,

    /// Host requested a headless shutdown.
    Shutdown,
}

//=== PlatformError =======================================================

/// Platform initialization and runtime errors.
#[derive(Debug)]
pub(crate) enum PlatformError {
    /// Event loop creation failed (OS-level issue).
    EventLoopCreation(String),

    /// Event loop execution error.
    EventLoopExecution(String),

    /// The window could not be opened.
    WindowCreation(String),
}

impl fmt::Display for PlatformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EventLoopCreation(e) => write!(f, "Event loop creation failed: {}", e),
            Self::EventLoopExecution(e) => write!(f, "Event loop error: {}", e),
            Self::WindowCreation(e) => write!(f, "Window creation failed: {}", e),
        }
    }
}

impl std::error::Error for PlatformError {}
