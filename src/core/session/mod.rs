//=========================================================================
// Game Session
//=========================================================================
//
// Aggregate root for one play session: the vehicle registry, the
// player's position, the proximity evaluator, and the control mode.
//
// Architecture:
//   GameSession
//     ├─ VehicleRegistry          vehicles in registration order
//     ├─ ProximityEvaluator       near-set (sensor or continuous)
//     ├─ possessed: Option<Id>    control mode is derived from this
//     └─ EventQueue               diagnostics for the current tick
//
// Invariants:
//   - Mode is Vehicle iff a vehicle is possessed (held by construction).
//   - A possessed vehicle is always registered; deregistering it ejects
//     the player.
//   - Eligibility is false in Vehicle mode.
//
// Rejected operations never panic: they return an error or `false`,
// log at warn/debug, and leave the session unchanged.
//
//=========================================================================

//=== Submodules ==========================================================

pub mod controller;
pub mod events;
pub mod frame;

//=== Public API ==========================================================

pub use controller::{ControlInput, ControlTarget, PossessionController};
pub use events::{EventQueue, SessionEvent, TransitionError};
pub use frame::SessionFrame;

//=== External Dependencies ===============================================

use glam::Vec3;
use log::{debug, info, warn};

//=== Internal Dependencies ===============================================

use crate::core::world::{
    proximity, ProximityConfig, ProximityEvaluator, RangeProfile, Vehicle, VehicleId,
    VehicleRegistry, VehicleTelemetry, WorldEvent,
};

//=== Constants ===========================================================

/// Lateral distance from the vehicle at which the player reappears on exit.
pub const DEFAULT_EXIT_OFFSET: f32 = 3.0;

//=== SessionConfig =======================================================

/// Tunables for a [`GameSession`].
///
/// # Default Values
///
/// - **Proximity**: [`ProximityConfig::default`]
/// - **Exit offset**: 3.0 along +X
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionConfig {
    proximity: ProximityConfig,
    exit_offset: f32,
}

impl SessionConfig {
    pub fn new() -> Self {
        Self {
            proximity: ProximityConfig::default(),
            exit_offset: DEFAULT_EXIT_OFFSET,
        }
    }

    pub fn with_proximity(mut self, proximity: ProximityConfig) -> Self {
        self.proximity = proximity;
        self
    }

    /// Sets the +X offset applied to the vehicle position on exit.
    ///
    /// # Panics
    ///
    /// Panics if `offset` is not finite.
    pub fn with_exit_offset(mut self, offset: f32) -> Self {
        assert!(offset.is_finite(), "Exit offset must be finite, got {}", offset);
        self.exit_offset = offset;
        self
    }

    pub fn proximity(&self) -> &ProximityConfig {
        &self.proximity
    }

    pub fn exit_offset(&self) -> f32 {
        self.exit_offset
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::new()
    }
}

//=== ControlMode =========================================================

/// Which entity receives movement input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ControlMode {
    #[default]
    Player,
    Vehicle,
}

//=== SessionSnapshot =====================================================

/// Read-only view of the session published to renderers and HUDs.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub mode: ControlMode,
    pub possessed: Option<VehicleId>,
    pub player_position: Vec3,
    /// Drives the "press E to enter" affordance.
    pub can_enter: bool,
    /// The player mesh is hidden while driving.
    pub player_visible: bool,
    pub range_profile: RangeProfile,
    pub telemetry: VehicleTelemetry,
}

//=== GameSession =========================================================

/// Owns all mutable gameplay state for one session.
///
/// ```
/// use drivable_world::prelude::*;
/// use glam::Vec3;
///
/// let mut session = GameSession::new(SessionConfig::default());
/// session.register_vehicle(Vehicle::at("car-1", Vec3::new(4.0, 0.0, 0.0)));
/// session.set_player_near_vehicle(&VehicleId::from("car-1"), true);
///
/// assert!(session.can_enter_vehicle());
/// assert_eq!(session.enter_vehicle(), Ok(VehicleId::from("car-1")));
/// assert_eq!(session.control_mode(), ControlMode::Vehicle);
///
/// let exit = session.exit_vehicle().unwrap();
/// assert_eq!(exit, Vec3::new(7.0, 0.0, 0.0));
/// assert_eq!(session.take_exit_position(), Some(exit));
/// assert_eq!(session.take_exit_position(), None);
/// ```
#[derive(Debug)]
pub struct GameSession {
    config: SessionConfig,
    registry: VehicleRegistry,
    proximity: Box<dyn ProximityEvaluator>,
    possessed: Option<VehicleId>,
    player_position: Vec3,
    range_profile: RangeProfile,
    pending_exit: Option<Vec3>,
    telemetry: VehicleTelemetry,
    events: EventQueue,

    // Last published eligibility, for change notifications
    eligible: bool,
}

impl GameSession {
    pub fn new(config: SessionConfig) -> Self {
        info!("Session created with {:?} proximity", config.proximity().mode());
        Self {
            proximity: config.proximity().evaluator(),
            config,
            registry: VehicleRegistry::new(),
            possessed: None,
            player_position: Vec3::ZERO,
            range_profile: RangeProfile::default(),
            pending_exit: None,
            telemetry: VehicleTelemetry::default(),
            events: EventQueue::new(),
            eligible: false,
        }
    }

    //--- Registry Operations ----------------------------------------------

    /// Adds a vehicle. Duplicate ids are ignored and return `false`.
    pub fn register_vehicle(&mut self, vehicle: Vehicle) -> bool {
        let id = vehicle.id.clone();
        if !self.registry.register(vehicle) {
            return false;
        }

        self.events.push(SessionEvent::VehicleRegistered(id));
        self.refresh_proximity();
        true
    }

    /// Removes a vehicle, ejecting the player if it was possessed.
    pub fn deregister_vehicle(&mut self, id: &VehicleId) -> Option<Vehicle> {
        let removed = self.registry.deregister(id)?;
        self.proximity.forget(id);

        if self.possessed.as_ref() == Some(id) {
            let exit = self.exit_point(removed.position);
            info!("Possessed vehicle {} removed, ejecting player at {}", id, exit);
            self.release(id.clone(), exit);
        }

        self.events.push(SessionEvent::VehicleDeregistered(id.clone()));
        self.refresh_proximity();
        Some(removed)
    }

    /// Replaces a vehicle's position. Unknown ids return `false`.
    pub fn update_vehicle_position(&mut self, id: &VehicleId, position: Vec3) -> bool {
        if !self.registry.update_position(id, position) {
            return false;
        }

        self.refresh_proximity();
        true
    }

    //--- Player & Proximity -----------------------------------------------

    /// Moves the player. Ignored while driving, since the vehicle owns
    /// the position then.
    pub fn update_player_position(&mut self, position: Vec3) -> bool {
        if self.is_in_vehicle() {
            debug!("Player position update ignored while in vehicle");
            return false;
        }

        self.player_position = position;
        self.refresh_proximity();
        true
    }

    /// Records an entry-sensor report for a vehicle.
    ///
    /// Returns `false` if the vehicle is unknown or the active evaluator
    /// does not use sensors.
    pub fn set_player_near_vehicle(&mut self, id: &VehicleId, near: bool) -> bool {
        if !self.registry.contains(id) {
            warn!("Sensor report for unknown vehicle {} rejected", id);
            return false;
        }

        let accepted = self.proximity.report_sensor(id, near);
        self.sync_eligibility();
        accepted
    }

    /// Switches the entry threshold.
    pub fn set_range_profile(&mut self, profile: RangeProfile) {
        if self.range_profile == profile {
            return;
        }

        debug!("Range profile {:?} -> {:?}", self.range_profile, profile);
        self.range_profile = profile;
        self.events.push(SessionEvent::RangeProfileChanged(profile));
        self.refresh_proximity();
    }

    //--- Transitions ------------------------------------------------------

    /// Enters the nearest vehicle the player is near.
    ///
    /// Ties go to the vehicle registered first.
    pub fn enter_vehicle(&mut self) -> Result<VehicleId, TransitionError> {
        if !self.can_enter_vehicle() {
            return self.reject(TransitionError::NotEligible);
        }

        let candidate = proximity::nearest(
            self.player_position,
            self.registry.iter().filter(|v| self.proximity.is_near(&v.id)),
        )
        .map(|(vehicle, _)| vehicle.id.clone());

        match candidate {
            Some(id) => Ok(self.possess(id)),
            None => self.reject(TransitionError::NoCandidate),
        }
    }

    /// Enters the nearest registered vehicle regardless of range.
    pub fn force_enter_vehicle(&mut self) -> Result<VehicleId, TransitionError> {
        if self.is_in_vehicle() {
            return self.reject(TransitionError::AlreadyInVehicle);
        }

        let candidate = proximity::nearest(self.player_position, self.registry.iter())
            .map(|(vehicle, _)| vehicle.id.clone());

        match candidate {
            Some(id) => Ok(self.possess(id)),
            None => self.reject(TransitionError::NoCandidate),
        }
    }

    /// Leaves the possessed vehicle, returning the player's new position.
    pub fn exit_vehicle(&mut self) -> Result<Vec3, TransitionError> {
        let Some(id) = self.possessed.clone() else {
            return self.reject(TransitionError::NotInVehicle);
        };

        let origin = self
            .registry
            .get(&id)
            .map_or(self.player_position, |vehicle| vehicle.position);
        let exit = self.exit_point(origin);

        info!("Exited vehicle {} at {}", id, exit);
        self.release(id, exit);
        self.refresh_proximity();
        Ok(exit)
    }

    /// Hands the last exit position to the physics side, once.
    pub fn take_exit_position(&mut self) -> Option<Vec3> {
        self.pending_exit.take()
    }

    //--- Telemetry --------------------------------------------------------

    pub fn update_vehicle_telemetry(&mut self, telemetry: VehicleTelemetry) {
        self.telemetry = telemetry;
    }

    pub fn telemetry(&self) -> &VehicleTelemetry {
        &self.telemetry
    }

    /// Applies one host notification.
    pub fn apply(&mut self, event: WorldEvent) {
        match event {
            WorldEvent::VehicleSpawned(vehicle) => {
                self.register_vehicle(vehicle);
            }
            WorldEvent::VehicleDespawned(id) => {
                if self.deregister_vehicle(&id).is_none() {
                    debug!("Despawn for unknown vehicle {}", id);
                }
            }
            WorldEvent::PlayerMoved(position) => {
                self.update_player_position(position);
            }
            WorldEvent::VehicleMoved { id, position } => {
                self.update_vehicle_position(&id, position);
            }
            WorldEvent::Sensor { vehicle, near } => {
                self.set_player_near_vehicle(&vehicle, near);
            }
            WorldEvent::Telemetry(telemetry) => self.update_vehicle_telemetry(telemetry),
        }
    }

    //--- Derived Views ----------------------------------------------------

    pub fn control_mode(&self) -> ControlMode {
        match self.possessed {
            Some(_) => ControlMode::Vehicle,
            None => ControlMode::Player,
        }
    }

    pub fn is_in_vehicle(&self) -> bool {
        self.possessed.is_some()
    }

    pub fn player_visible(&self) -> bool {
        !self.is_in_vehicle()
    }

    /// True on foot with at least one vehicle in entry range.
    pub fn can_enter_vehicle(&self) -> bool {
        !self.is_in_vehicle() && self.proximity.any_near()
    }

    pub fn possessed_id(&self) -> Option<&VehicleId> {
        self.possessed.as_ref()
    }

    pub fn possessed_vehicle(&self) -> Option<&Vehicle> {
        self.possessed.as_ref().and_then(|id| self.registry.get(id))
    }

    pub fn player_position(&self) -> Vec3 {
        self.player_position
    }

    pub fn range_profile(&self) -> RangeProfile {
        self.range_profile
    }

    /// Entry threshold for the active range profile.
    pub fn entry_range(&self) -> f32 {
        self.config.proximity().range(self.range_profile)
    }

    pub fn registry(&self) -> &VehicleRegistry {
        &self.registry
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            mode: self.control_mode(),
            possessed: self.possessed.clone(),
            player_position: self.player_position,
            can_enter: self.can_enter_vehicle(),
            player_visible: self.player_visible(),
            range_profile: self.range_profile,
            telemetry: self.telemetry,
        }
    }

    /// Takes the diagnostics recorded since the last drain.
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        self.events.take()
    }

    //--- Internal Helpers -------------------------------------------------

    fn possess(&mut self, id: VehicleId) -> VehicleId {
        info!("Entered vehicle {}", id);
        self.possessed = Some(id.clone());
        self.pending_exit = None;
        self.events.push(SessionEvent::Entered(id.clone()));
        self.sync_eligibility();
        id
    }

    fn release(&mut self, vehicle: VehicleId, exit: Vec3) {
        self.possessed = None;
        self.player_position = exit;
        self.pending_exit = Some(exit);
        self.events.push(SessionEvent::Exited { vehicle, position: exit });
    }

    fn exit_point(&self, origin: Vec3) -> Vec3 {
        origin + Vec3::new(self.config.exit_offset(), 0.0, 0.0)
    }

    fn reject<T>(&mut self, reason: TransitionError) -> Result<T, TransitionError> {
        warn!("Transition rejected: {}", reason);
        self.events.push(SessionEvent::Rejected(reason));
        Err(reason)
    }

    fn refresh_proximity(&mut self) {
        let range = self.entry_range();
        self.proximity
            .refresh(self.player_position, &self.registry, range);
        self.sync_eligibility();
    }

    fn sync_eligibility(&mut self) {
        let eligible = self.can_enter_vehicle();
        if eligible != self.eligible {
            info!("Vehicle entry {}", if eligible { "available" } else { "unavailable" });
            self.eligible = eligible;
            self.events.push(SessionEvent::EligibilityChanged(eligible));
        }
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::world::ProximityMode;
    use proptest::prelude::*;

    //--- Test Helpers -----------------------------------------------------

    fn id(name: &str) -> VehicleId {
        VehicleId::from(name)
    }

    fn session_with(vehicles: &[(&str, Vec3)]) -> GameSession {
        let mut session = GameSession::default();
        for (name, position) in vehicles {
            session.register_vehicle(Vehicle::at(*name, *position));
        }
        session
    }

    fn continuous_session() -> GameSession {
        let proximity = ProximityConfig::new().with_mode(ProximityMode::Continuous);
        GameSession::new(SessionConfig::new().with_proximity(proximity))
    }

    fn assert_mode_invariant(session: &GameSession) {
        assert_eq!(
            session.possessed_id().is_some(),
            session.control_mode() == ControlMode::Vehicle
        );
        if session.is_in_vehicle() {
            assert!(!session.can_enter_vehicle());
            assert!(session.possessed_vehicle().is_some());
        }
    }

    //=====================================================================
    // Initial State
    //=====================================================================

    #[test]
    fn starts_on_foot() {
        let session = GameSession::default();

        assert_eq!(session.control_mode(), ControlMode::Player);
        assert!(session.player_visible());
        assert!(!session.can_enter_vehicle());
        assert_eq!(session.range_profile(), RangeProfile::Standard);
        assert_eq!(session.entry_range(), 5.0);
        assert_mode_invariant(&session);
    }

    //=====================================================================
    // Enter
    //=====================================================================

    #[test]
    fn enter_without_eligibility_leaves_state_unchanged() {
        let mut session = session_with(&[("a", Vec3::new(1.0, 0.0, 0.0))]);
        let before = session.snapshot();

        assert_eq!(session.enter_vehicle(), Err(TransitionError::NotEligible));

        assert_eq!(session.snapshot(), before);
        assert_eq!(session.take_exit_position(), None);
        assert!(session
            .drain_events()
            .contains(&SessionEvent::Rejected(TransitionError::NotEligible)));
    }

    #[test]
    fn enter_possesses_near_vehicle() {
        let mut session = session_with(&[("a", Vec3::new(2.0, 0.0, 0.0))]);
        session.set_player_near_vehicle(&id("a"), true);

        assert_eq!(session.enter_vehicle(), Ok(id("a")));

        assert_eq!(session.control_mode(), ControlMode::Vehicle);
        assert!(!session.player_visible());
        assert!(!session.can_enter_vehicle());
        assert_eq!(session.possessed_vehicle().map(|v| &v.id), Some(&id("a")));
        assert_mode_invariant(&session);
    }

    #[test]
    fn enter_equidistant_selects_first_registered() {
        let mut session = session_with(&[
            ("first", Vec3::new(3.0, 0.0, 0.0)),
            ("second", Vec3::new(-3.0, 0.0, 0.0)),
        ]);
        session.set_player_near_vehicle(&id("second"), true);
        session.set_player_near_vehicle(&id("first"), true);

        assert_eq!(session.enter_vehicle(), Ok(id("first")));
    }

    #[test]
    fn enter_selects_nearest_of_near_vehicles() {
        let mut session = session_with(&[
            ("far", Vec3::new(4.5, 0.0, 0.0)),
            ("close", Vec3::new(0.0, 0.0, 1.0)),
            ("closest_but_not_near", Vec3::new(0.5, 0.0, 0.0)),
        ]);
        session.set_player_near_vehicle(&id("far"), true);
        session.set_player_near_vehicle(&id("close"), true);

        assert_eq!(session.enter_vehicle(), Ok(id("close")));
    }

    #[test]
    fn enter_while_driving_is_not_eligible() {
        let mut session = session_with(&[("a", Vec3::ZERO)]);
        session.set_player_near_vehicle(&id("a"), true);
        session.enter_vehicle().unwrap();

        assert_eq!(session.enter_vehicle(), Err(TransitionError::NotEligible));
        assert_eq!(session.possessed_id(), Some(&id("a")));
    }

    //=====================================================================
    // Forced Enter
    //=====================================================================

    #[test]
    fn force_enter_ignores_range() {
        let mut session = session_with(&[
            ("far", Vec3::new(100.0, 0.0, 0.0)),
            ("farther", Vec3::new(200.0, 0.0, 0.0)),
        ]);

        assert_eq!(session.force_enter_vehicle(), Ok(id("far")));
        assert_mode_invariant(&session);
    }

    #[test]
    fn force_enter_rejections() {
        let mut empty = GameSession::default();
        assert_eq!(empty.force_enter_vehicle(), Err(TransitionError::NoCandidate));

        let mut session = session_with(&[("a", Vec3::ZERO)]);
        session.force_enter_vehicle().unwrap();
        assert_eq!(
            session.force_enter_vehicle(),
            Err(TransitionError::AlreadyInVehicle)
        );
    }

    //=====================================================================
    // Exit
    //=====================================================================

    #[test]
    fn exit_offsets_from_vehicle_position() {
        let mut session = session_with(&[("a", Vec3::new(1.0, 2.0, 3.0))]);
        session.set_player_near_vehicle(&id("a"), true);
        session.enter_vehicle().unwrap();
        session.update_vehicle_position(&id("a"), Vec3::new(10.0, 1.5, -4.0));

        let exit = session.exit_vehicle().unwrap();

        assert_eq!(exit, Vec3::new(13.0, 1.5, -4.0));
        assert_eq!(session.player_position(), exit);
    }

    #[test]
    fn exit_uses_configured_offset() {
        let config = SessionConfig::new().with_exit_offset(-2.0);
        let mut session = GameSession::new(config);
        session.register_vehicle(Vehicle::at("a", Vec3::new(5.0, 0.0, 0.0)));
        session.force_enter_vehicle().unwrap();

        assert_eq!(session.exit_vehicle(), Ok(Vec3::new(3.0, 0.0, 0.0)));
    }

    #[test]
    fn enter_exit_round_trip() {
        let mut session = session_with(&[("a", Vec3::new(2.0, 0.0, 0.0))]);
        session.set_player_near_vehicle(&id("a"), true);

        session.enter_vehicle().unwrap();
        session.exit_vehicle().unwrap();

        assert_eq!(session.control_mode(), ControlMode::Player);
        assert_eq!(session.possessed_id(), None);
        assert!(session.player_visible());
        assert_mode_invariant(&session);
    }

    #[test]
    fn exit_on_foot_is_rejected() {
        let mut session = GameSession::default();
        let before = session.snapshot();

        assert_eq!(session.exit_vehicle(), Err(TransitionError::NotInVehicle));
        assert_eq!(session.snapshot(), before);
    }

    #[test]
    fn exit_position_is_consumed_once() {
        let mut session = session_with(&[("a", Vec3::ZERO)]);
        session.force_enter_vehicle().unwrap();
        session.exit_vehicle().unwrap();

        assert_eq!(session.take_exit_position(), Some(Vec3::new(3.0, 0.0, 0.0)));
        assert_eq!(session.take_exit_position(), None);
    }

    #[test]
    fn eligibility_after_exit_follows_sensor_state() {
        let mut session = session_with(&[("a", Vec3::ZERO)]);
        session.set_player_near_vehicle(&id("a"), true);
        session.enter_vehicle().unwrap();

        session.exit_vehicle().unwrap();

        assert!(session.can_enter_vehicle());

        session.set_player_near_vehicle(&id("a"), false);
        assert!(!session.can_enter_vehicle());
    }

    //=====================================================================
    // Position Updates
    //=====================================================================

    #[test]
    fn player_position_ignored_while_driving() {
        let mut session = session_with(&[("a", Vec3::ZERO)]);
        assert!(session.update_player_position(Vec3::new(1.0, 0.0, 0.0)));
        session.force_enter_vehicle().unwrap();

        assert!(!session.update_player_position(Vec3::new(50.0, 0.0, 0.0)));
        assert_eq!(session.player_position(), Vec3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn possessed_view_follows_registry_updates() {
        let mut session = session_with(&[("a", Vec3::ZERO)]);
        session.force_enter_vehicle().unwrap();

        session.update_vehicle_position(&id("a"), Vec3::new(9.0, 0.0, 9.0));

        assert_eq!(
            session.possessed_vehicle().map(|v| v.position),
            Some(Vec3::new(9.0, 0.0, 9.0))
        );
    }

    #[test]
    fn unknown_vehicle_position_update_is_noop() {
        let mut session = GameSession::default();
        assert!(!session.update_vehicle_position(&id("ghost"), Vec3::ONE));
    }

    //=====================================================================
    // Registry Through The Session
    //=====================================================================

    #[test]
    fn duplicate_registration_keeps_first() {
        let mut session = session_with(&[("a", Vec3::ZERO)]);

        assert!(!session.register_vehicle(Vehicle::at("a", Vec3::ONE)));

        assert_eq!(session.registry().len(), 1);
        assert_eq!(session.registry().get(&id("a")).unwrap().position, Vec3::ZERO);
    }

    #[test]
    fn deregister_possessed_vehicle_ejects_player() {
        let mut session = session_with(&[("a", Vec3::new(1.0, 0.0, 1.0))]);
        session.set_player_near_vehicle(&id("a"), true);
        session.enter_vehicle().unwrap();

        assert!(session.deregister_vehicle(&id("a")).is_some());

        assert_eq!(session.control_mode(), ControlMode::Player);
        assert_eq!(session.player_position(), Vec3::new(4.0, 0.0, 1.0));
        assert_eq!(session.take_exit_position(), Some(Vec3::new(4.0, 0.0, 1.0)));
        assert!(!session.can_enter_vehicle());
        assert_mode_invariant(&session);
    }

    #[test]
    fn deregister_other_vehicle_keeps_possession() {
        let mut session = session_with(&[("a", Vec3::ZERO), ("b", Vec3::ONE)]);
        session.force_enter_vehicle().unwrap();

        session.deregister_vehicle(&id("b"));

        assert_eq!(session.possessed_id(), Some(&id("a")));
        assert_eq!(session.deregister_vehicle(&id("b")), None);
    }

    #[test]
    fn sensor_for_unknown_vehicle_is_rejected() {
        let mut session = GameSession::default();

        assert!(!session.set_player_near_vehicle(&id("ghost"), true));
        assert!(!session.can_enter_vehicle());
    }

    //=====================================================================
    // Continuous Policy
    //=====================================================================

    #[test]
    fn continuous_policy_tracks_player_movement() {
        let mut session = continuous_session();
        session.register_vehicle(Vehicle::at("a", Vec3::new(6.0, 0.0, 0.0)));
        assert!(!session.can_enter_vehicle());

        session.update_player_position(Vec3::new(2.0, 0.0, 0.0));
        assert!(session.can_enter_vehicle());

        session.update_player_position(Vec3::new(-20.0, 0.0, 0.0));
        assert!(!session.can_enter_vehicle());
    }

    #[test]
    fn continuous_policy_extended_profile_widens_range() {
        let mut session = continuous_session();
        session.register_vehicle(Vehicle::at("a", Vec3::new(6.0, 0.0, 0.0)));

        session.set_range_profile(RangeProfile::Extended);
        assert!(session.can_enter_vehicle());

        session.set_range_profile(RangeProfile::Standard);
        assert!(!session.can_enter_vehicle());
    }

    #[test]
    fn continuous_policy_ignores_sensors() {
        let mut session = continuous_session();
        session.register_vehicle(Vehicle::at("a", Vec3::new(50.0, 0.0, 0.0)));

        assert!(!session.set_player_near_vehicle(&id("a"), true));
        assert!(!session.can_enter_vehicle());
    }

    //=====================================================================
    // Events
    //=====================================================================

    #[test]
    fn events_record_transitions_in_order() {
        let mut session = session_with(&[("a", Vec3::ZERO)]);
        session.drain_events();

        session.set_player_near_vehicle(&id("a"), true);
        session.enter_vehicle().unwrap();

        assert_eq!(
            session.drain_events(),
            vec![
                SessionEvent::EligibilityChanged(true),
                SessionEvent::Entered(id("a")),
                SessionEvent::EligibilityChanged(false),
            ]
        );
        assert!(session.drain_events().is_empty());
    }

    #[test]
    fn apply_routes_world_events() {
        let mut session = GameSession::default();

        session.apply(WorldEvent::VehicleSpawned(Vehicle::at("a", Vec3::ZERO)));
        session.apply(WorldEvent::Sensor { vehicle: id("a"), near: true });
        session.apply(WorldEvent::Telemetry(VehicleTelemetry::new(42.0, 60.0)));

        assert!(session.can_enter_vehicle());
        assert_eq!(session.telemetry().speed, 42.0);

        session.apply(WorldEvent::VehicleDespawned(id("a")));
        assert!(session.registry().is_empty());
        assert!(!session.can_enter_vehicle());
    }

    //=====================================================================
    // Invariant
    //=====================================================================

    #[derive(Debug, Clone)]
    enum Op {
        Register(u8, f32),
        Deregister(u8),
        MovePlayer(f32, f32),
        MoveVehicle(u8, f32),
        Sensor(u8, bool),
        Profile(bool),
        Enter,
        ForceEnter,
        Exit,
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0u8..4, -10.0f32..10.0).prop_map(|(v, x)| Op::Register(v, x)),
            (0u8..4).prop_map(Op::Deregister),
            (-10.0f32..10.0, -10.0f32..10.0).prop_map(|(x, z)| Op::MovePlayer(x, z)),
            (0u8..4, -10.0f32..10.0).prop_map(|(v, x)| Op::MoveVehicle(v, x)),
            (0u8..4, any::<bool>()).prop_map(|(v, near)| Op::Sensor(v, near)),
            any::<bool>().prop_map(Op::Profile),
            Just(Op::Enter),
            Just(Op::ForceEnter),
            Just(Op::Exit),
        ]
    }

    fn run(session: &mut GameSession, op: Op) {
        let name = |v: u8| VehicleId::new(format!("car-{}", v));
        match op {
            Op::Register(v, x) => {
                session.register_vehicle(Vehicle::at(name(v), Vec3::new(x, 0.0, 0.0)));
            }
            Op::Deregister(v) => {
                session.deregister_vehicle(&name(v));
            }
            Op::MovePlayer(x, z) => {
                session.update_player_position(Vec3::new(x, 0.0, z));
            }
            Op::MoveVehicle(v, x) => {
                session.update_vehicle_position(&name(v), Vec3::new(x, 0.0, 0.0));
            }
            Op::Sensor(v, near) => {
                session.set_player_near_vehicle(&name(v), near);
            }
            Op::Profile(extended) => session.set_range_profile(if extended {
                RangeProfile::Extended
            } else {
                RangeProfile::Standard
            }),
            Op::Enter => {
                let before = session.snapshot();
                if session.enter_vehicle().is_err() {
                    assert_eq!(session.snapshot(), before);
                }
            }
            Op::ForceEnter => {
                let _ = session.force_enter_vehicle();
            }
            Op::Exit => {
                let _ = session.exit_vehicle();
            }
        }
    }

    proptest! {
        #[test]
        fn mode_invariant_holds_after_every_operation(
            ops in prop::collection::vec(op(), 1..60),
            continuous in any::<bool>(),
        ) {
            let mut session = if continuous {
                continuous_session()
            } else {
                GameSession::default()
            };

            for op in ops {
                run(&mut session, op);
                assert_mode_invariant(&session);
            }
        }
    }
}
