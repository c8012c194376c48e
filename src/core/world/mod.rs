//=========================================================================
// World
//=========================================================================
//
// Vehicles, their registry, and the spatial rules that decide which of
// them the player can enter.
//
//=========================================================================

//=== Submodules ==========================================================

pub mod events;
pub mod proximity;
pub mod registry;
pub mod telemetry;
pub mod vehicle;

//=== Public API ==========================================================

pub use events::WorldEvent;
pub use proximity::{
    ContinuousProximity, ProximityConfig, ProximityEvaluator, ProximityMode, RangeProfile,
    SensorProximity, EXTENDED_ENTRY_RANGE, STANDARD_ENTRY_RANGE,
};
pub use registry::VehicleRegistry;
pub use telemetry::VehicleTelemetry;
pub use vehicle::{Vehicle, VehicleId, VehicleKind};
