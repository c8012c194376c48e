//=========================================================================
// Drivable World Library Root
//
// Gameplay core for a third-person driving game: vehicle registry,
// entry proximity, player/vehicle control modes, and keyboard action
// mapping, driven by a fixed-rate core thread.
//
// Typical usage:
// ```no_run
// use drivable_world::prelude::*;
//
// fn main() {
//     EngineBuilder::new().build().run();
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds the session, world, and input systems. It is public so
// hosts can drive a `GameSession` directly without the runtime.
//
pub mod core;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `platform` owns the Winit window and event loop and is not part of
// the public API surface.
//
mod engine;
mod platform;

//--- Public Exports ------------------------------------------------------

pub use engine::{Engine, EngineBuilder, HostError, HostHandle};
