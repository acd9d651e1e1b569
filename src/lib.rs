//! Tether - a window bound to a rendering engine
//!
//! Opens a window, hands its rendering context to the engine, populates a
//! small scene and runs a display loop that quits on close or the `q` key.

pub mod app;
pub mod config;
pub mod input;
pub mod logging;
pub mod scene;
pub mod systems;

pub use app::{App, StartupError};
pub use config::AppConfig;
