//=========================================================================
// World Events
//=========================================================================
//
// Notifications from the physics / scene integration, applied to the
// session once per tick, after that tick's key input, in the order they
// arrived among themselves.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::Vec3;

//=== Internal Dependencies ===============================================

use super::telemetry::VehicleTelemetry;
use super::vehicle::{Vehicle, VehicleId};

//=== WorldEvent ==========================================================

/// A change in the simulated world reported by the host.
#[derive(Debug, Clone, PartialEq)]
pub enum WorldEvent {
    /// A vehicle entered the scene.
    VehicleSpawned(Vehicle),

    /// A vehicle left the scene.
    VehicleDespawned(VehicleId),

    /// Player body position telemetry.
    PlayerMoved(Vec3),

    /// Vehicle body position telemetry.
    VehicleMoved { id: VehicleId, position: Vec3 },

    /// Entry-sensor overlap changed for a vehicle.
    Sensor { vehicle: VehicleId, near: bool },

    /// HUD readout for the possessed vehicle.
    Telemetry(VehicleTelemetry),
}
