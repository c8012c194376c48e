//=========================================================================
// Spatial Proximity
//=========================================================================
//
// Entry-range policy: planar distance, thresholds, nearest-vehicle
// selection, and the two interchangeable near-set evaluators.
//
// Architecture:
//   ProximityConfig ──range(profile)──> threshold
//   ProximityEvaluator (trait)
//     ├─ SensorProximity      near-set from (vehicle, is_near) reports
//     └─ ContinuousProximity  near-set recomputed from distance on refresh
//
// Distances ignore the vertical (Y) axis. "In range" is strict:
// distance < threshold.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashSet;
use std::fmt::Debug;

use glam::{Vec2, Vec3};
use log::trace;

//=== Internal Dependencies ===============================================

use super::registry::VehicleRegistry;
use super::vehicle::{Vehicle, VehicleId};

//=== Constants ===========================================================

/// Entry threshold for normal movement.
pub const STANDARD_ENTRY_RANGE: f32 = 5.0;

/// Entry threshold for high-speed approach.
pub const EXTENDED_ENTRY_RANGE: f32 = 8.0;

//=== RangeProfile ========================================================

/// Which entry threshold applies, chosen by the caller's movement context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RangeProfile {
    /// Normal movement.
    #[default]
    Standard,

    /// High-speed approach.
    Extended,
}

//=== ProximityMode =======================================================

/// How the near-set is maintained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ProximityMode {
    /// Driven by externally reported collision-sensor events.
    #[default]
    Sensor,

    /// Recomputed from raw distance whenever positions change.
    Continuous,
}

//=== ProximityConfig =====================================================

/// Entry thresholds and evaluator selection.
///
/// # Default Values
///
/// - **Standard range**: 5.0
/// - **Extended range**: 8.0
/// - **Mode**: [`ProximityMode::Sensor`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProximityConfig {
    standard_range: f32,
    extended_range: f32,
    mode: ProximityMode,
}

impl ProximityConfig {
    pub fn new() -> Self {
        Self {
            standard_range: STANDARD_ENTRY_RANGE,
            extended_range: EXTENDED_ENTRY_RANGE,
            mode: ProximityMode::Sensor,
        }
    }

    /// Sets the standard entry threshold.
    ///
    /// # Panics
    ///
    /// Panics if `range` is not a positive finite number.
    pub fn with_standard_range(mut self, range: f32) -> Self {
        assert!(range.is_finite() && range > 0.0, "Entry range must be positive, got {}", range);
        self.standard_range = range;
        self
    }

    /// Sets the extended entry threshold.
    ///
    /// # Panics
    ///
    /// Panics if `range` is not a positive finite number.
    pub fn with_extended_range(mut self, range: f32) -> Self {
        assert!(range.is_finite() && range > 0.0, "Entry range must be positive, got {}", range);
        self.extended_range = range;
        self
    }

    pub fn with_mode(mut self, mode: ProximityMode) -> Self {
        self.mode = mode;
        self
    }

    /// Threshold for a range profile.
    pub fn range(&self, profile: RangeProfile) -> f32 {
        match profile {
            RangeProfile::Standard => self.standard_range,
            RangeProfile::Extended => self.extended_range,
        }
    }

    pub fn mode(&self) -> ProximityMode {
        self.mode
    }

    /// Builds the evaluator selected by [`mode`](Self::mode).
    pub fn evaluator(&self) -> Box<dyn ProximityEvaluator> {
        match self.mode {
            ProximityMode::Sensor => Box::new(SensorProximity::new()),
            ProximityMode::Continuous => Box::new(ContinuousProximity::new()),
        }
    }
}

impl Default for ProximityConfig {
    fn default() -> Self {
        Self::new()
    }
}

//=== Distance Helpers ====================================================

/// Euclidean distance on the ground plane (X/Z), ignoring height.
pub fn planar_distance(a: Vec3, b: Vec3) -> f32 {
    Vec2::new(a.x, a.z).distance(Vec2::new(b.x, b.z))
}

/// Returns `true` if `target` is strictly within `range` of `origin`.
pub fn is_in_range(origin: Vec3, target: Vec3, range: f32) -> bool {
    planar_distance(origin, target) < range
}

/// Finds the vehicle nearest to `origin`.
///
/// Ties go to the vehicle encountered first.
pub fn nearest<'a, I>(origin: Vec3, vehicles: I) -> Option<(&'a Vehicle, f32)>
where
    I: IntoIterator<Item = &'a Vehicle>,
{
    let mut best: Option<(&Vehicle, f32)> = None;

    for vehicle in vehicles {
        let distance = planar_distance(origin, vehicle.position);
        // Strict comparison keeps the first of equal candidates
        if best.map_or(true, |(_, d)| distance < d) {
            best = Some((vehicle, distance));
        }
    }

    best
}

/// Finds the nearest vehicle strictly within `range` of `origin`.
pub fn nearest_in_range<'a, I>(origin: Vec3, vehicles: I, range: f32) -> Option<&'a Vehicle>
where
    I: IntoIterator<Item = &'a Vehicle>,
{
    nearest(origin, vehicles)
        .filter(|(_, distance)| *distance < range)
        .map(|(vehicle, _)| vehicle)
}

//=== ProximityEvaluator ==================================================

/// Maintains the set of vehicles the player is near.
///
/// Both implementations answer the same queries; they differ in what
/// feeds them. The session calls [`refresh`](Self::refresh) whenever the
/// player, a vehicle, the registry, or the range profile changes.
pub trait ProximityEvaluator: Send + Debug {
    /// Which policy this evaluator implements.
    fn mode(&self) -> ProximityMode;

    /// Records a sensor report. Returns `false` if the evaluator ignores sensors.
    fn report_sensor(&mut self, vehicle: &VehicleId, near: bool) -> bool;

    /// Re-evaluates the near-set after a position or configuration change.
    fn refresh(&mut self, player: Vec3, vehicles: &VehicleRegistry, range: f32);

    /// Drops any state held for a vehicle.
    fn forget(&mut self, vehicle: &VehicleId);

    /// Returns `true` if the player is near `vehicle`.
    fn is_near(&self, vehicle: &VehicleId) -> bool;

    /// Returns `true` if the player is near at least one vehicle.
    fn any_near(&self) -> bool;
}

//=== SensorProximity =====================================================

/// Near-set driven by per-vehicle collision-sensor reports.
#[derive(Debug, Default)]
pub struct SensorProximity {
    near: HashSet<VehicleId>,
}

impl SensorProximity {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProximityEvaluator for SensorProximity {
    fn mode(&self) -> ProximityMode {
        ProximityMode::Sensor
    }

    fn report_sensor(&mut self, vehicle: &VehicleId, near: bool) -> bool {
        if near {
            self.near.insert(vehicle.clone());
        } else {
            self.near.remove(vehicle);
        }
        true
    }

    fn refresh(&mut self, _player: Vec3, _vehicles: &VehicleRegistry, _range: f32) {}

    fn forget(&mut self, vehicle: &VehicleId) {
        self.near.remove(vehicle);
    }

    fn is_near(&self, vehicle: &VehicleId) -> bool {
        self.near.contains(vehicle)
    }

    fn any_near(&self) -> bool {
        !self.near.is_empty()
    }
}

//=== ContinuousProximity =================================================

/// Near-set recomputed from scratch by scanning every registered vehicle.
#[derive(Debug, Default)]
pub struct ContinuousProximity {
    near: HashSet<VehicleId>,
}

impl ContinuousProximity {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProximityEvaluator for ContinuousProximity {
    fn mode(&self) -> ProximityMode {
        ProximityMode::Continuous
    }

    fn report_sensor(&mut self, vehicle: &VehicleId, near: bool) -> bool {
        trace!("Continuous proximity ignores sensor report {} -> {}", vehicle, near);
        false
    }

    fn refresh(&mut self, player: Vec3, vehicles: &VehicleRegistry, range: f32) {
        self.near = vehicles
            .iter()
            .filter(|v| is_in_range(player, v.position, range))
            .map(|v| v.id.clone())
            .collect();
    }

    fn forget(&mut self, vehicle: &VehicleId) {
        self.near.remove(vehicle);
    }

    fn is_near(&self, vehicle: &VehicleId) -> bool {
        self.near.contains(vehicle)
    }

    fn any_near(&self) -> bool {
        !self.near.is_empty()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
