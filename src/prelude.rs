//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use drivable_world::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Runtime
pub use crate::engine::{Engine, EngineBuilder, HostError, HostHandle};

// Global systems and context
pub use crate::core::globals::{GlobalContext, GlobalSystems};

// Input system
pub use crate::core::input::{Action, ActionState, GameAction, InputEvent, InputSystem, KeyCode};

// Session
pub use crate::core::session::{
    ControlInput, ControlMode, ControlTarget, GameSession, PossessionController, SessionConfig,
    SessionEvent, SessionFrame, SessionSnapshot, TransitionError,
};

// World
pub use crate::core::world::{
    ProximityConfig, ProximityMode, RangeProfile, Vehicle, VehicleId, VehicleKind,
    VehicleRegistry, VehicleTelemetry,
};
