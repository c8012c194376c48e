//=========================================================================
// Vehicle Telemetry
//=========================================================================
//
// HUD readout for the possessed vehicle, reported by the physics side.
//
//=========================================================================

/// Full nitro tank.
pub const NITRO_MAX: f32 = 100.0;

/// Latest speed and nitro readout for the HUD.
///
/// Each report replaces the previous one wholesale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VehicleTelemetry {
    pub speed: f32,
    /// 0 to [`NITRO_MAX`].
    pub nitro_level: f32,
    pub nitro_active: bool,
    /// Set while the tank is recharging and boost is unavailable.
    pub nitro_blocked: bool,
}

impl VehicleTelemetry {
    pub fn new(speed: f32, nitro_level: f32) -> Self {
        Self {
            speed,
            nitro_level: nitro_level.clamp(0.0, NITRO_MAX),
            nitro_active: false,
            nitro_blocked: false,
        }
    }

    pub fn with_nitro_active(mut self, active: bool) -> Self {
        self.nitro_active = active;
        self
    }

    pub fn with_nitro_blocked(mut self, blocked: bool) -> Self {
        self.nitro_blocked = blocked;
        self
    }
}

impl Default for VehicleTelemetry {
    fn default() -> Self {
        Self::new(0.0, NITRO_MAX)
    }
}
