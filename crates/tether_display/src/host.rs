//! Display host
//!
//! Owns the window system, the window and the host's share of the render
//! context. Field order is the teardown order: context share, then window,
//! then the window system.

use std::rc::Rc;

use crate::{DisplayEvent, HostWindow, Platform, RenderContext};

/// The window side of the display loop
pub struct DisplayHost {
    context: Rc<RenderContext>,
    window: HostWindow,
    platform: Platform,
}

impl DisplayHost {
    pub fn new(platform: Platform, window: HostWindow, context: Rc<RenderContext>) -> Self {
        Self {
            context,
            window,
            platform,
        }
    }

    pub fn window(&self) -> &HostWindow {
        &self.window
    }

    pub fn context(&self) -> &Rc<RenderContext> {
        &self.context
    }

    /// Drain queued events; resizes are applied to the surface before returning
    pub fn poll_events(&mut self, events: &mut Vec<DisplayEvent>) {
        let start = events.len();
        self.platform.poll_events(events);

        for event in &events[start..] {
            if let DisplayEvent::Resized { width, height } = *event {
                log::debug!("Window resized to {}x{}", width, height);
                self.context.resize(width, height);
            }
        }
    }

    /// Present the frame rendered since the last swap
    ///
    /// Returns false when no frame was pending (the renderer skipped it).
    pub fn swap_buffers(&mut self) -> bool {
        self.context.present()
    }
}

impl Drop for DisplayHost {
    fn drop(&mut self) {
        log::debug!("Destroying window '{}'", self.window.spec().title);
    }
}
