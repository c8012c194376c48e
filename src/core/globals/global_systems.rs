//=========================================================================
// Global Systems
//=========================================================================
//
// Container for engine-level systems with logic.
//
// Contains the systems that process input and drive the session.
// Systems operate on GlobalContext data.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::GlobalContext;
use crate::core::input::{GameAction, InputSystem};
use crate::core::session::{PossessionController, SessionFrame};

//=== GlobalSystems =======================================================

/// Container for engine-level logic systems.
///
/// # Available Systems
///
/// - `input`: Action mapping and edge detection
/// - `controller`: Enter/exit and range selection from action state
pub struct GlobalSystems {
    /// Key bindings and per-key state.
    pub input: InputSystem<GameAction>,

    /// Translates action state into session transitions.
    pub controller: PossessionController,
}

impl GlobalSystems {
    /// Creates systems with the default key bindings.
    ///
    /// Users should access systems via [`crate::Engine::init`] instead.
    pub(crate) fn new() -> Self {
        Self {
            input: InputSystem::with_default_bindings(),
            controller: PossessionController::new(),
        }
    }

    //--- Update Loop ------------------------------------------------------

    /// Runs one tick and returns the frame to publish.
    ///
    /// # Processing Pipeline
    ///
    /// 1. **Input**: Applies this tick's key events to key state
    /// 2. **World**: Applies host notifications to the session in order
    /// 3. **Control**: Range profile, enter/exit, routed movement
    /// 4. **Frame**: Snapshot, one-shot exit position, diagnostics
    /// 5. **Edges**: Clears just-pressed / just-released
    pub(crate) fn update(&mut self, context: &mut GlobalContext) -> SessionFrame {
        // 1. Key events into key state
        self.input.process_batches(&mut context.frame_input_events);

        // 2. World telemetry
        for event in context.frame_world_events.drain(..) {
            context.session.apply(event);
        }

        // 3. Possession control (reads edges before they are cleared)
        let control = self.controller.update(&self.input, &mut context.session);

        // 4. Publish
        context.tick += 1;
        let frame = SessionFrame {
            tick: context.tick,
            snapshot: context.session.snapshot(),
            control,
            exit_position: context.session.take_exit_position(),
            events: context.session.drain_events(),
        };

        // 5. End of tick
        self.input.update();

        frame
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::InputEvent;
    use crate::core::session::{ControlMode, ControlTarget, SessionConfig, SessionEvent};
    use crate::core::world::{Vehicle, VehicleId, WorldEvent};
    use glam::Vec3;

    fn setup() -> (GlobalSystems, GlobalContext) {
        (GlobalSystems::new(), GlobalContext::new(SessionConfig::default()))
    }

    #[test]
    fn tick_counter_advances() {
        let (mut systems, mut context) = setup();

        assert_eq!(systems.update(&mut context).tick, 1);
        assert_eq!(systems.update(&mut context).tick, 2);
        assert_eq!(context.tick(), 2);
    }

    #[test]
    fn world_then_input_in_one_tick() {
        let (mut systems, mut context) = setup();
        context.frame_world_events = vec![
            WorldEvent::VehicleSpawned(Vehicle::at("car", Vec3::new(2.0, 0.0, 0.0))),
            WorldEvent::Sensor { vehicle: VehicleId::from("car"), near: true },
        ];
        context.frame_input_events = vec![vec![InputEvent::key_down_named("e")]];

        let frame = systems.update(&mut context);

        assert_eq!(frame.snapshot.mode, ControlMode::Vehicle);
        assert_eq!(frame.control.target, ControlTarget::Vehicle(VehicleId::from("car")));
        assert!(frame.events.contains(&SessionEvent::Entered(VehicleId::from("car"))));
        assert!(context.frame_input_events.is_empty());
        assert!(context.frame_world_events.is_empty());
    }

    #[test]
    fn exit_position_published_once() {
        let (mut systems, mut context) = setup();
        context.session.register_vehicle(Vehicle::at("car", Vec3::ZERO));
        context.session.force_enter_vehicle().unwrap();

        context.frame_input_events = vec![vec![InputEvent::key_down_named("e")]];
        let frame = systems.update(&mut context);

        assert_eq!(frame.exit_position, Some(Vec3::new(3.0, 0.0, 0.0)));
        assert!(frame.snapshot.player_visible);

        let frame = systems.update(&mut context);
        assert_eq!(frame.exit_position, None);
    }

    #[test]
    fn edges_cleared_between_ticks() {
        let (mut systems, mut context) = setup();
        context.frame_input_events = vec![vec![InputEvent::key_down_named("w")]];

        systems.update(&mut context);

        assert!(systems.input.is_action_held(GameAction::MoveForward));
        assert!(!systems.input.is_action_just_pressed(GameAction::MoveForward));
    }
}
