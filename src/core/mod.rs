//=========================================================================
// Core Systems Orchestrator
//=========================================================================
//
// Central coordinator for the logic (non-platform) thread.
//
// Responsibilities:
// - Own the GameSession and the systems that drive it
// - Receive platform and host events via a bounded crossbeam channel
// - Maintain pacing using a fixed tick rate (TPS)
// - Publish one SessionFrame per tick
//
// The orchestrator never touches the window. Producers only send
// messages, so every session operation runs on this one thread.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod globals;
pub mod input;
pub mod session;
pub mod world;

pub(crate) mod platform_bridge;

//=== Public API ==========================================================

pub use globals::{GlobalContext, GlobalSystems};

//=== External Dependencies ===============================================

use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, Sender, TrySendError};
use log::{info, trace, warn};

//=== Internal Dependencies ===============================================

use platform_bridge::{EventCollector, PlatformEvent, TickControl};
use session::frame::FrameBacklog;
use session::{SessionConfig, SessionFrame};

//=== CoreSystemsOrchestrator =============================================

/// Owns all core systems and runs them on a dedicated thread.
pub(crate) struct CoreSystemsOrchestrator {
    systems: GlobalSystems,
    context: GlobalContext,
}

impl CoreSystemsOrchestrator {
    //--- Construction -----------------------------------------------------

    /// Initializes all core systems but does not yet start the logic thread.
    pub(crate) fn new(config: SessionConfig) -> Self {
        Self {
            systems: GlobalSystems::new(),
            context: GlobalContext::new(config),
        }
    }

    /// Runs user setup (bindings, initial vehicles) before the thread starts.
    pub(crate) fn init_systems<F>(&mut self, init_fn: F)
    where
        F: FnOnce(&mut GlobalSystems, &mut GlobalContext),
    {
        init_fn(&mut self.systems, &mut self.context);
    }

    //--- spawn_core_thread() ---------------------------------------------

    /// Spawns the logic thread, ticking at `tps` until shutdown.
    ///
    /// Each tick:
    ///  1. Collects platform and host events
    ///  2. Updates systems and builds the frame
    ///  3. Publishes the frame (held back if the receiver is full)
    ///  4. Sleeps to maintain fixed pacing
    pub(crate) fn spawn_core_thread(
        self,
        receiver: Receiver<PlatformEvent>,
        frames: Sender<SessionFrame>,
        tps: f64,
    ) -> thread::JoinHandle<()> {
        let frame_duration = Duration::from_secs_f64(1.0 / tps);

        thread::spawn(move || {
            let mut systems = self.systems;
            let mut context = self.context;
            let mut collector = EventCollector::new(receiver);
            let mut backlog = FrameBacklog::new();

            loop {
                let frame_start = Instant::now();

                //--- Step 1: Gather platform events ------------------------
                if collector.collect_frame() == TickControl::Exit {
                    info!("Core thread exiting after {} ticks", context.tick());
                    break;
                }
                context.frame_input_events = collector.take_batches();
                context.frame_world_events = collector.take_world_events();

                //--- Step 2: Update systems --------------------------------
                let frame = systems.update(&mut context);

                //--- Step 3: Publish ---------------------------------------
                Self::publish(&frames, &mut backlog, frame);

                //--- Step 4: Maintain pacing -------------------------------
                let elapsed = frame_start.elapsed();
                if elapsed < frame_duration {
                    thread::sleep(frame_duration - elapsed);
                }
            }
        })
    }

    /// Sends `frame`, or keeps its exit position and events for the next
    /// tick when the receiver is full.
    fn publish(frames: &Sender<SessionFrame>, backlog: &mut FrameBacklog, frame: SessionFrame) {
        let frame = backlog.attach(frame);
        match frames.try_send(frame) {
            Ok(()) => {}
            Err(TrySendError::Full(frame)) => {
                trace!("Frame {} dropped, receiver is full", frame.tick);
                backlog.hold(frame);
            }
            Err(TrySendError::Disconnected(frame)) => {
                if !frame.events.is_empty() {
                    warn!("Frame {} lost with {} events, no receiver", frame.tick, frame.events.len());
                }
            }
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
