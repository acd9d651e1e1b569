//! Windowing subsystem
//!
//! Wraps the winit event loop. Events are drained by pumping the loop with a
//! zero timeout, so polling never waits for new input.

use std::time::Duration;

use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::WindowId;

use crate::{translate_window_event, DisplayError, DisplayEvent, HostWindow, WindowSpec};

/// The initialised window system
pub struct Platform {
    event_loop: EventLoop<()>,
}

impl Platform {
    /// Initialise the window system
    pub fn init() -> Result<Self, DisplayError> {
        let event_loop = EventLoop::new().map_err(|e| DisplayError::PlatformInit(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Poll);
        log::debug!("Window system initialised");
        Ok(Self { event_loop })
    }

    /// Create the host window
    pub fn create_window(&self, spec: &WindowSpec) -> Result<HostWindow, DisplayError> {
        // The loop is driven by pumping, so the window is created up front
        // rather than from inside a resumed() callback.
        #[allow(deprecated)]
        let window = self
            .event_loop
            .create_window(spec.attributes())
            .map_err(|e| DisplayError::WindowCreation(e.to_string()))?;
        log::info!("Created window '{}' ({}x{})", spec.title, spec.width, spec.height);
        Ok(HostWindow::new(window, spec.clone()))
    }

    /// Append every event currently queued; never blocks
    pub fn poll_events(&mut self, events: &mut Vec<DisplayEvent>) {
        let mut collector = EventCollector { events };
        let status = self
            .event_loop
            .pump_app_events(Some(Duration::ZERO), &mut collector);
        if let PumpStatus::Exit(code) = status {
            log::info!("Window system exited with status {}", code);
            events.push(DisplayEvent::CloseRequested);
        }
    }
}

/// Collects translated events during one pump
struct EventCollector<'a> {
    events: &'a mut Vec<DisplayEvent>,
}

impl ApplicationHandler for EventCollector<'_> {
    fn resumed(&mut self, _event_loop: &ActiveEventLoop) {}

    fn window_event(&mut self, _event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if let Some(event) = translate_window_event(&event) {
            self.events.push(event);
        }
    }
}
