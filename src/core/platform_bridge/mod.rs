//=========================================================================
// Platform Bridge
//=========================================================================
//
// Contract between event producers (winit window, host integrations)
// and the core thread.
//
// Components:
// - `interface`: Event types and error definitions
// - `event_collector`: Core-side event collection and buffering
//
//=========================================================================

//=== Module Declarations =================================================

pub(crate) mod event_collector;
pub(crate) mod interface;

//=== Internal API ========================================================

pub(crate) use event_collector::{EventCollector, TickControl};
pub(crate) use interface::{PlatformError, PlatformEvent};
