//! Display loop system
//!
//! One iteration drains the queued window events, stops on a quit action,
//! and otherwise renders one frame and presents it. There is no frame
//! limiting; pacing comes from the present mode alone.

use std::fmt;

use tether_display::{DisplayError, DisplayEvent, DisplayHost};
use tether_render::{Engine, FrameOutcome, RenderError};

use crate::input::{InputAction, InputMapper};

/// The window side of the loop: event source and presentation target
pub trait WindowBackend {
    /// Append every event queued right now; never blocks
    fn poll_events(&mut self, events: &mut Vec<DisplayEvent>);

    /// Present the most recently rendered frame
    ///
    /// Returns false when there was nothing to present.
    fn swap_buffers(&mut self) -> Result<bool, DisplayError>;
}

/// The engine side of the loop
pub trait FrameRenderer {
    fn render_one_frame(&mut self) -> Result<FrameOutcome, RenderError>;
}

impl WindowBackend for DisplayHost {
    fn poll_events(&mut self, events: &mut Vec<DisplayEvent>) {
        DisplayHost::poll_events(self, events);
    }

    fn swap_buffers(&mut self) -> Result<bool, DisplayError> {
        Ok(DisplayHost::swap_buffers(self))
    }
}

impl FrameRenderer for Engine {
    fn render_one_frame(&mut self) -> Result<FrameOutcome, RenderError> {
        Engine::render_one_frame(self)
    }
}

/// Loop state; the only transition is running to terminated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Terminated,
}

/// Summary returned when the loop ends normally
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopExit {
    /// Iterations whose frame reached the screen
    pub frames: u64,
}

/// A frame could not be rendered or presented
#[derive(Debug)]
pub enum LoopError {
    Render(RenderError),
    Present(DisplayError),
}

impl fmt::Display for LoopError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoopError::Render(e) => write!(f, "Rendering a frame failed: {}", e),
            LoopError::Present(e) => write!(f, "Presenting a frame failed: {}", e),
        }
    }
}

impl std::error::Error for LoopError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoopError::Render(e) => Some(e),
            LoopError::Present(e) => Some(e),
        }
    }
}

impl From<RenderError> for LoopError {
    fn from(e: RenderError) -> Self {
        LoopError::Render(e)
    }
}

impl From<DisplayError> for LoopError {
    fn from(e: DisplayError) -> Self {
        LoopError::Present(e)
    }
}

/// Drives the poll, render, present cycle
///
/// The renderer is declared before the window so it is dropped first.
pub struct DisplayLoop<R, W> {
    renderer: R,
    window: W,
    events: Vec<DisplayEvent>,
    state: LoopState,
    frames: u64,
}

impl<R: FrameRenderer, W: WindowBackend> DisplayLoop<R, W> {
    pub fn new(renderer: R, window: W) -> Self {
        Self {
            renderer,
            window,
            events: Vec::new(),
            state: LoopState::Running,
            frames: 0,
        }
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn window(&self) -> &W {
        &self.window
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Iterations whose frame reached the screen so far
    ///
    /// Iterations where the window had nothing to present are not counted.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Run one iteration
    pub fn step(&mut self) -> Result<LoopState, LoopError> {
        if self.state == LoopState::Terminated {
            return Ok(self.state);
        }

        self.events.clear();
        self.window.poll_events(&mut self.events);

        if let Some(InputAction::Quit) = InputMapper::first_action(&self.events) {
            log::info!("Quit requested after {} frames", self.frames);
            self.state = LoopState::Terminated;
            return Ok(self.state);
        }

        let outcome = self.renderer.render_one_frame()?;
        if let FrameOutcome::Skipped(reason) = outcome {
            log::debug!("Frame {} skipped: {:?}", self.frames, reason);
        }
        if self.window.swap_buffers()? {
            self.frames += 1;
        }

        Ok(self.state)
    }

    /// Iterate until a quit action arrives or a frame fails
    pub fn run(&mut self) -> Result<LoopExit, LoopError> {
        log::info!("Entering display loop");
        while self.step()? == LoopState::Running {}
        Ok(LoopExit { frames: self.frames })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tether_display::Keycode;

    struct CountingRenderer(u32);

    impl FrameRenderer for CountingRenderer {
        fn render_one_frame(&mut self) -> Result<FrameOutcome, RenderError> {
            self.0 += 1;
            Ok(FrameOutcome::Rendered { windows: 1 })
        }
    }

    struct ScriptedWindow {
        batches: Vec<Vec<DisplayEvent>>,
        swaps: u32,
    }

    impl WindowBackend for ScriptedWindow {
        fn poll_events(&mut self, events: &mut Vec<DisplayEvent>) {
            if !self.batches.is_empty() {
                events.extend(self.batches.remove(0));
            }
        }

        fn swap_buffers(&mut self) -> Result<bool, DisplayError> {
            self.swaps += 1;
            Ok(true)
        }
    }

    #[test]
    fn test_step_renders_then_presents() {
        let window = ScriptedWindow { batches: vec![], swaps: 0 };
        let mut display_loop = DisplayLoop::new(CountingRenderer(0), window);
        assert_eq!(display_loop.step().unwrap(), LoopState::Running);
        assert_eq!(display_loop.renderer().0, 1);
        assert_eq!(display_loop.window().swaps, 1);
    }

    #[test]
    fn test_terminated_loop_stays_terminated() {
        let window = ScriptedWindow {
            batches: vec![vec![DisplayEvent::KeyDown { key: Keycode::Char('q'), repeat: false }]],
            swaps: 0,
        };
        let mut display_loop = DisplayLoop::new(CountingRenderer(0), window);
        assert_eq!(display_loop.step().unwrap(), LoopState::Terminated);
        assert_eq!(display_loop.step().unwrap(), LoopState::Terminated);
        assert_eq!(display_loop.renderer().0, 0);
        assert_eq!(display_loop.frames(), 0);
    }
}
