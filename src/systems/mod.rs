//! Application systems
//!
//! The display loop and the traits it drives the engine and window through.

mod display_loop;

pub use display_loop::{
    DisplayLoop, FrameRenderer, LoopError, LoopExit, LoopState, WindowBackend,
};
