//=========================================================================
// Drivable World Engine
//
// Main entry point and coordinator for the runtime.
//
// Architecture:
// ```text
//     EngineBuilder  ──build()──>  Engine  ──run()──────────>  [Runtime]
//         │                          │     ──run_headless()─>
//         ├─ with_tps()              ├─ init()
//         ├─ with_channel_capacity() ├─ host_handle() → HostHandle
//         └─ with_session_config()   └─ frames()      → Receiver<SessionFrame>
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;

use crossbeam_channel::{bounded, Receiver, Sender};
use glam::Vec3;
use log::{error, info};

//=== Internal Dependencies ===============================================

use crate::core::input::InputEvent;
use crate::core::platform_bridge::PlatformEvent;
use crate::core::session::{SessionConfig, SessionFrame};
use crate::core::world::{Vehicle, VehicleId, VehicleTelemetry, WorldEvent};
use crate::core::{CoreSystemsOrchestrator, GlobalContext, GlobalSystems};
use crate::platform::Platform;

//=== EngineBuilder =======================================================

/// Builder for configuring and constructing an [`Engine`].
///
/// # Default Values
///
/// - **TPS**: 60.0 (logic updates per second)
/// - **Channel capacity**: 128 messages (inbound and outbound)
/// - **Session**: [`SessionConfig::default`]
///
/// # Examples
///
/// ```no_run
/// use drivable_world::prelude::*;
///
/// EngineBuilder::new()
///     .with_tps(120.0)
///     .with_channel_capacity(256)
///     .build()
///     .run();
/// ```
pub struct EngineBuilder {
    tps: f64,
    channel_capacity: usize,
    session_config: SessionConfig,
}

impl EngineBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            tps: 60.0,
            channel_capacity: 128,
            session_config: SessionConfig::default(),
        }
    }

    /// Sets the target ticks per second for the logic thread.
    ///
    /// # Panics
    ///
    /// Panics if `tps <= 0.0`.
    pub fn with_tps(mut self, tps: f64) -> Self {
        assert!(tps > 0.0, "TPS must be positive, got {}", tps);
        self.tps = tps;
        self
    }

    /// Sets the capacity of the inbound event and outbound frame channels.
    ///
    /// Inbound senders block when the core thread falls behind. Outbound
    /// frames are skipped when nobody reads them, and their exit position
    /// and events ride on the next frame that is sent.
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Channel capacity must be positive");
        self.channel_capacity = capacity;
        self
    }

    /// Sets entry ranges, proximity policy, and exit offset.
    pub fn with_session_config(mut self, config: SessionConfig) -> Self {
        self.session_config = config;
        self
    }

    /// Builds the engine instance and its channels.
    pub fn build(self) -> Engine {
        info!("Building engine (TPS: {}, channel: {})", self.tps, self.channel_capacity);

        let (event_tx, event_rx) = bounded(self.channel_capacity);
        let (frame_tx, frame_rx) = bounded(self.channel_capacity);

        Engine {
            orchestrator: CoreSystemsOrchestrator::new(self.session_config),
            tps: self.tps,
            channel_capacity: self.channel_capacity,
            event_tx,
            event_rx,
            frame_tx,
            frame_rx,
        }
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== HostError ===========================================================

/// Failure to reach the core thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostError {
    /// The core thread has stopped.
    Disconnected,
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostError::Disconnected => write!(f, "Core thread is not running"),
        }
    }
}

impl std::error::Error for HostError {}

//=== HostHandle ==========================================================

/// Sender used by physics, scene, and input integrations.
///
/// Cheap to clone; every clone feeds the same core thread. Sends block
/// while the inbound channel is full.
#[derive(Debug, Clone)]
pub struct HostHandle {
    sender: Sender<PlatformEvent>,
}

impl HostHandle {
    //--- Input ------------------------------------------------------------

    /// Reports a key press by host key name (`"w"`, `"arrowup"`, `" "`).
    ///
    /// Unknown names are forwarded and ignored by the input system.
    pub fn key_down(&self, name: &str) -> Result<(), HostError> {
        self.send(PlatformEvent::Inputs(vec![InputEvent::key_down_named(name)]))
    }

    /// Reports a key release by host key name.
    pub fn key_up(&self, name: &str) -> Result<(), HostError> {
        self.send(PlatformEvent::Inputs(vec![InputEvent::key_up_named(name)]))
    }

    //--- World ------------------------------------------------------------

    pub fn spawn_vehicle(&self, vehicle: Vehicle) -> Result<(), HostError> {
        self.world(WorldEvent::VehicleSpawned(vehicle))
    }

    pub fn despawn_vehicle(&self, id: impl Into<VehicleId>) -> Result<(), HostError> {
        self.world(WorldEvent::VehicleDespawned(id.into()))
    }

    pub fn player_moved(&self, position: Vec3) -> Result<(), HostError> {
        self.world(WorldEvent::PlayerMoved(position))
    }

    pub fn vehicle_moved(&self, id: impl Into<VehicleId>, position: Vec3) -> Result<(), HostError> {
        self.world(WorldEvent::VehicleMoved {
            id: id.into(),
            position,
        })
    }

    /// Reports an entry-sensor overlap change.
    pub fn sensor(&self, id: impl Into<VehicleId>, near: bool) -> Result<(), HostError> {
        self.world(WorldEvent::Sensor {
            vehicle: id.into(),
            near,
        })
    }

    pub fn vehicle_telemetry(&self, telemetry: VehicleTelemetry) -> Result<(), HostError> {
        self.world(WorldEvent::Telemetry(telemetry))
    }

    //--- Lifecycle --------------------------------------------------------

    /// Asks the core thread to stop after the current tick.
    pub fn shutdown(&self) -> Result<(), HostError> {
        self.send(PlatformEvent::Shutdown)
    }

    //--- Internal Helpers -------------------------------------------------

    fn world(&self, event: WorldEvent) -> Result<(), HostError> {
        self.send(PlatformEvent::World(event))
    }

    fn send(&self, event: PlatformEvent) -> Result<(), HostError> {
        self.sender.send(event).map_err(|_| HostError::Disconnected)
    }
}

//=== Engine ==============================================================

/// Drivable World runtime.
///
/// # Architecture
///
/// ```text
/// Engine (Main Thread)
///   ├─► CoreSystemsOrchestrator (Logic Thread @ TPS)
///   │     └─► InputSystem, PossessionController, GameSession
///   │
///   └─► Platform (Winit event loop, `run` only)
///
/// Inbound:  bounded channel of PlatformEvent (window + HostHandle)
/// Outbound: bounded channel of SessionFrame
/// ```
///
/// # Examples
///
/// ```
/// use drivable_world::prelude::*;
/// use glam::Vec3;
///
/// let engine = EngineBuilder::new()
///     .with_tps(240.0)
///     .build()
///     .init(|_systems, context| {
///         context.session.register_vehicle(Vehicle::at("car-1", Vec3::new(2.0, 0.0, 0.0)));
///     });
///
/// let host = engine.host_handle();
/// let frames = engine.frames();
/// let runtime = std::thread::spawn(move || engine.run_headless());
///
/// host.sensor("car-1", true).unwrap();
/// host.key_down("e").unwrap();
///
/// let entered = frames.iter().take(500).any(|f| f.snapshot.mode == ControlMode::Vehicle);
/// assert!(entered);
///
/// host.shutdown().unwrap();
/// runtime.join().unwrap();
/// ```
pub struct Engine {
    orchestrator: CoreSystemsOrchestrator,
    tps: f64,
    channel_capacity: usize,
    event_tx: Sender<PlatformEvent>,
    event_rx: Receiver<PlatformEvent>,
    frame_tx: Sender<SessionFrame>,
    frame_rx: Receiver<SessionFrame>,
}

impl Engine {
    //--- Initialization ---------------------------------------------------

    /// Configures systems and seeds the session before execution.
    ///
    /// ```no_run
    /// # use drivable_world::prelude::*;
    /// # use glam::Vec3;
    /// EngineBuilder::new()
    ///     .build()
    ///     .init(|systems, context| {
    ///         systems.input.remap_action(GameAction::Interact, &[KeyCode::KeyG]);
    ///         context.session.register_vehicle(Vehicle::at("car-1", Vec3::ZERO));
    ///     })
    ///     .run();
    /// ```
    pub fn init<F>(mut self, init_fn: F) -> Self
    where
        F: FnOnce(&mut GlobalSystems, &mut GlobalContext),
    {
        info!("Initializing engine systems");

        self.orchestrator.init_systems(init_fn);

        info!("Engine initialization complete");
        self
    }

    //--- Channels ---------------------------------------------------------

    /// Returns a sender for host integrations.
    pub fn host_handle(&self) -> HostHandle {
        HostHandle {
            sender: self.event_tx.clone(),
        }
    }

    /// Returns the receiver of per-tick frames.
    pub fn frames(&self) -> Receiver<SessionFrame> {
        self.frame_rx.clone()
    }

    //--- Execution --------------------------------------------------------

    /// Opens the window and blocks until it closes.
    ///
    /// # Lifecycle
    ///
    /// 1. Spawns the logic thread running at the configured TPS
    /// 2. Runs the Winit event loop (blocks here)
    /// 3. On window close: `WindowClosed` is sent, the logic thread stops
    pub fn run(self) {
        info!("Starting engine runtime (TPS: {})", self.tps);

        let Engine {
            orchestrator,
            tps,
            channel_capacity,
            event_tx,
            event_rx,
            frame_tx,
            frame_rx: _,
        } = self;

        //--- 1. Spawn the core logic thread -------------------------------
        let core_handle = orchestrator.spawn_core_thread(event_rx, frame_tx, tps);
        info!("Core logic thread spawned (channel capacity: {})", channel_capacity);

        //--- 2. Launch the platform subsystem -----------------------------
        let platform = Platform::new(event_tx);
        info!("Platform initialized, entering event loop");

        if let Err(e) = platform.run() {
            error!("Platform error: {}", e);
        }

        info!("Platform event loop exited");

        //--- 3. Cleanup ---------------------------------------------------
        Self::join(core_handle);
    }

    /// Runs only the logic thread and blocks until a [`HostHandle::shutdown`]
    /// or until every handle is dropped.
    pub fn run_headless(self) {
        info!("Starting headless runtime (TPS: {})", self.tps);

        let Engine {
            orchestrator,
            tps,
            event_tx,
            event_rx,
            frame_tx,
            ..
        } = self;

        // Only host handles keep the channel alive from here on
        drop(event_tx);

        let core_handle = orchestrator.spawn_core_thread(event_rx, frame_tx, tps);
        Self::join(core_handle);
    }

    fn join(handle: std::thread::JoinHandle<()>) {
        match handle.join() {
            Ok(()) => info!("Core thread terminated cleanly"),
            Err(e) => error!("Core thread panicked: {:?}", e),
        }

        info!("Engine shutdown complete");
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
