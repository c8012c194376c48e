//=========================================================================
// Platform Subsystem
//=========================================================================
//
// Bridges Winit (OS-level events) with the core thread via crossbeam.
//
// Architecture:
// ```text
//  Main Thread:                     Core Thread:
//  ┌──────────────────────────┐    ┌──────────────────────┐
//  │  Winit Event Loop        │    │  EventCollector      │
//  │   ↓                      │    │   ↓                  │
//  │  InputProcessor          │    │  InputSystem         │
//  │   └─ KeyEvent → Input    │    │   ↓                  │
//  │   ↓                      │    │  GameSession         │
//  │  InputBuffer             │    │   ↓                  │
//  │   ↓                      │    │  SessionFrame out    │
//  │  RedrawRequested (flush) │    └──────────────────────┘
//  │   ↓                      │             ↑
//  │  Bounded channel ────────┼─────────────┘
//  └──────────────────────────┘    PlatformEvent
// ```
//
// RedrawRequested is the frame boundary: all key events buffered since
// the previous redraw are sent as one batch. Empty buffers are not sent.
//
// If the core thread is gone, the platform logs and keeps running so the
// user can still close the window.
//
//=========================================================================

//=== Submodules ==========================================================

mod input_buffer;
mod input_processor;

//=== External Crates =====================================================

use crossbeam_channel::Sender;
use log::*;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowAttributes, WindowId},
};

//=== Internal Imports ====================================================

use crate::core::platform_bridge::{PlatformError, PlatformEvent};
use input_buffer::InputBuffer;
use input_processor::InputProcessor;

//=== Constants ===========================================================

const WINDOW_TITLE: &str = "Drivable World";

//=== Platform ============================================================

/// Window owner and key event aggregator.
///
/// Runs on the main thread (Winit requirement on macOS/iOS) and sends
/// batched key events to the core thread.
///
/// # Fields
///
/// - `window`: Created lazily in `resumed()`
/// - `buffer`: Accumulates events until `RedrawRequested`
/// - `event_sender`: Channel to core thread
/// - `input_processor`: Converts Winit events → engine events
pub(crate) struct Platform {
    window: Option<Window>,
    buffer: InputBuffer,
    event_sender: Sender<PlatformEvent>,
    input_processor: InputProcessor,
    error: Option<PlatformError>,
}

impl Platform {
    //--- Construction -----------------------------------------------------

    /// Creates a platform; the window is opened later, in `resumed()`.
    pub(crate) fn new(event_sender: Sender<PlatformEvent>) -> Self {
        info!(target: "platform", "Platform subsystem initialized");
        Self {
            window: None,
            buffer: InputBuffer::new(),
            event_sender,
            input_processor: InputProcessor::new(),
            error: None,
        }
    }

    //--- Execution --------------------------------------------------------

    /// Runs the Winit event loop on the calling thread until the window closes.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError`] if the event loop cannot be created or
    /// fails, or if the window cannot be opened.
    pub(crate) fn run(mut self) -> Result<(), PlatformError> {
        debug!(target: "platform", "Starting Winit event loop");

        let event_loop = EventLoop::new()
            .map_err(|e| PlatformError::EventLoopCreation(e.to_string()))?;

        event_loop
            .run_app(&mut self)
            .map_err(|e| PlatformError::EventLoopExecution(e.to_string()))?;

        match self.error.take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    //--- Internal Helpers -------------------------------------------------

    /// Sends buffered key events to the core thread as one batch.
    fn flush_input_buffer(&mut self) {
        let count = self.buffer.len();
        let Some(events) = self.buffer.drain() else {
            return;
        };

        trace!(target: "platform::input", "Flushing {} key events", count);

        if self.event_sender.send(PlatformEvent::Inputs(events)).is_err() {
            warn!(
                target: "platform::input",
                "Channel disconnected, dropping {} events",
                count
            );
        }
    }

    /// Releases every held key and flushes, since key-ups are not
    /// delivered while the window is unfocused.
    fn release_held_keys(&mut self) {
        let released = self.input_processor.release_all();
        if !released.is_empty() {
            debug!(target: "platform::input", "Focus lost, releasing {} keys", released.len());
        }
        for event in released {
            self.buffer.push(event);
        }
        self.flush_input_buffer();
    }

    fn notify_closed(&self) {
        if self.event_sender.send(PlatformEvent::WindowClosed).is_err() {
            debug!(target: "platform", "Core thread already gone");
        }
    }
}

//=== Winit Integration ===================================================

impl ApplicationHandler for Platform {
    /// Creates the window on first resume.
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            debug!(target: "platform", "Window already exists");
            return;
        }

        let attrs = WindowAttributes::default()
            .with_title(WINDOW_TITLE)
            .with_inner_size(LogicalSize::new(1280, 720));

        match event_loop.create_window(attrs) {
            Ok(window) => {
                info!(
                    target: "platform",
                    "Window created: {}x{} @ {}x DPI",
                    window.inner_size().width,
                    window.inner_size().height,
                    window.scale_factor()
                );
                window.request_redraw();
                self.window = Some(window);
            }
            Err(e) => {
                error!(target: "platform", "Window creation failed: {}", e);
                self.error = Some(PlatformError::WindowCreation(e.to_string()));
                self.notify_closed();
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match &event {
            WindowEvent::CloseRequested => {
                info!(target: "platform", "Window close requested");
                self.flush_input_buffer();
                self.notify_closed();
                event_loop.exit();
            }

            WindowEvent::KeyboardInput { event: key_event, .. } => {
                if let Some(event) = self.input_processor.process_key_event(key_event) {
                    self.buffer.push(event);
                } else {
                    trace!(target: "platform::input", "Key event ignored");
                }
            }

            WindowEvent::Focused(false) => {
                self.release_held_keys();
            }

            WindowEvent::RedrawRequested => {
                self.flush_input_buffer();

                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            _ => {}
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
