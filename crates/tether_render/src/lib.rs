//! Tether Rendering Library
//!
//! The engine side of Tether. It renders into a surface owned by the window
//! layer and keeps the scene state for it.
//!
//! ## Key Components
//!
//! - [`Engine`] - Engine root: scene managers, resource groups, render windows
//! - [`RenderWindow`] - Render surface bound to an external native window
//! - [`RenderWindowParams`] - Typed handles passed when binding a render window
//! - [`Viewport`] - Camera view into a render window with a background colour
//! - [`FrameStats`] - Frame counters

mod error;
mod engine;
mod render_window;
mod viewport;
mod stats;

pub use error::RenderError;
pub use engine::{Engine, FrameOutcome};
pub use render_window::{RenderWindow, RenderWindowParams};
pub use viewport::Viewport;
pub use stats::FrameStats;

// Re-export scene types for convenience
pub use tether_scene::{SceneManager, ResourceGroupManager, ObjectRef, NodeKey};
pub use tether_math::ColourValue;
