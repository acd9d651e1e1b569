//! Window system layer for Tether
//!
//! This crate owns everything that talks to the OS window system:
//!
//! - [`Platform`] - The windowing subsystem (winit event loop) and event draining
//! - [`HostWindow`] / [`NativeWindow`] - The fixed-size window and its native handle
//! - [`RenderContext`] - GPU surface, device and queue bound 1:1 to the window
//! - [`DisplayHost`] - Owns the three above and presents finished frames
//! - [`DisplayEvent`] / [`Keycode`] - Window events in engine terms

mod error;
mod event;
mod platform;
mod window;
pub mod context;
mod host;

pub use error::DisplayError;
pub use event::{
    DisplayEvent, Keycode, translate_key, translate_key_input, translate_window_event, unmodified_key,
};
pub use platform::Platform;
pub use window::{HostWindow, NativeWindow, WindowSpec};
pub use context::{RenderContext, ContextSettings, FrameAcquire, SkipReason};
pub use host::DisplayHost;
