//! 02 - Load Mesh
//!
//! Registers the locations listed in `resources.cfg`, then places a light and
//! a `cube.mesh` entity on a node rotated 45 degrees around (1, 1, 1).
//!
//! This example demonstrates:
//! - Reading a resource configuration file
//! - Initialising resource groups before creating scene objects
//! - Attaching camera and entity to separate scene nodes
//!
//! Run from the repository root with: `cargo run --example 02_load_mesh`

use std::process::ExitCode;

use tether::config::{CameraConfig, LightConfig, MeshConfig, SceneConfig};
use tether::{logging, App, AppConfig};

fn main() -> ExitCode {
    logging::init_logging(None);

    let mut config = AppConfig::default();
    config.scene = SceneConfig {
        resources: Some("resources.cfg".to_string()),
        camera: CameraConfig {
            position: [0.0, 0.0, 5.0],
            // Close enough to see the mesh
            near_clip: Some(0.1),
            ..CameraConfig::default()
        },
        light: Some(LightConfig::default()),
        mesh: Some(MeshConfig::default()),
    };

    let mut app = match App::start(&config) {
        Ok(app) => app,
        Err(e) => {
            log::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Some(entity) = &app.scene().entity {
        log::info!("Showing {}", entity);
    }

    match app.run() {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
