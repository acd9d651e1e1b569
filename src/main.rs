//! Tether binary
//!
//! Startup and frame failures are logged and exit with status 1.

use std::process::ExitCode;

use tether::{logging, App, AppConfig};

fn main() -> ExitCode {
    let (config, load_error) = AppConfig::load_or_default();
    logging::init_logging(Some(&config.debug.log_level));

    if let Some(e) = load_error {
        log::warn!("Failed to load config: {}. Using defaults.", e);
    }

    log::info!("Starting Tether");

    let mut app = match App::start(&config) {
        Ok(app) => app,
        Err(e) => {
            log::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    match app.run() {
        Ok(exit) => {
            log::info!("Exited cleanly after {} frames", exit.frames);
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
