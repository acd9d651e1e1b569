//! 01 - Background Colour
//!
//! The smallest Tether program: a window whose engine viewport is cleared to
//! a fixed colour every frame.
//!
//! This example demonstrates:
//! - Binding the engine to a window and context it does not own
//! - One scene manager, one camera on a child node, one viewport
//! - Quitting on window close or the `q` key
//!
//! Run with: `cargo run --example 01_background_colour`

use std::process::ExitCode;

use tether::config::SceneConfig;
use tether::{logging, App, AppConfig};

fn main() -> ExitCode {
    logging::init_logging(None);

    // Camera only, no resources; the default background is magenta
    let mut config = AppConfig::default();
    config.scene = SceneConfig::default();

    let mut app = match App::start(&config) {
        Ok(app) => app,
        Err(e) => {
            log::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    match app.run() {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
