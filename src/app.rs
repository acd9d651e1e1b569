//! Application startup and shutdown
//!
//! [`App::start`] performs the startup sequence in order: window system,
//! window, rendering context, native handle, engine and render window, then
//! scene population and the viewport. Any failure returns early and every
//! resource acquired so far is released in reverse order.

use std::fmt;
use std::rc::Rc;

use tether_display::{DisplayError, DisplayHost, Platform, RenderContext};
use tether_render::{Engine, RenderError, RenderWindowParams, Viewport};
use tether_scene::SceneError;

use crate::config::AppConfig;
use crate::scene::{populate_scene, PopulatedScene};
use crate::systems::{DisplayLoop, LoopError, LoopExit};

/// Name of the engine's render window
pub const RENDER_WINDOW: &str = "view";
/// Name of the only scene manager
pub const SCENE: &str = "main";

/// A startup step failed
#[derive(Debug)]
pub enum StartupError {
    Display(DisplayError),
    Render(RenderError),
    Scene(SceneError),
}

impl fmt::Display for StartupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StartupError::Display(e) => write!(f, "Display setup failed: {}", e),
            StartupError::Render(e) => write!(f, "Engine setup failed: {}", e),
            StartupError::Scene(e) => write!(f, "Scene setup failed: {}", e),
        }
    }
}

impl std::error::Error for StartupError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StartupError::Display(e) => Some(e),
            StartupError::Render(e) => Some(e),
            StartupError::Scene(e) => Some(e),
        }
    }
}

impl From<DisplayError> for StartupError {
    fn from(e: DisplayError) -> Self {
        StartupError::Display(e)
    }
}

impl From<RenderError> for StartupError {
    fn from(e: RenderError) -> Self {
        StartupError::Render(e)
    }
}

impl From<SceneError> for StartupError {
    fn from(e: SceneError) -> Self {
        StartupError::Scene(e)
    }
}

/// The running application
///
/// Dropping it tears everything down: engine, then window and context, then
/// the window system.
pub struct App {
    display_loop: DisplayLoop<Engine, DisplayHost>,
    populated: PopulatedScene,
}

impl App {
    /// Bring up the window, the engine and the scene described by `config`
    pub fn start(config: &AppConfig) -> Result<Self, StartupError> {
        let platform = Platform::init()?;
        let window = platform.create_window(&config.window.to_window_spec())?;

        let settings = config.rendering.to_context_settings(config.window.vsync)?;
        let context = Rc::new(RenderContext::new(&window, &settings)?);

        let params = RenderWindowParams {
            native_window: window.native_window()?,
            context: Rc::clone(&context),
        };

        // Declared after the window so every early return drops it first
        let mut engine = Engine::new();
        let size = (config.window.width, config.window.height);
        engine.create_render_window(RENDER_WINDOW, size, params)?;
        engine.create_scene_manager(SCENE)?;

        let populated = {
            let (scene, resources) = engine
                .scene_and_resources_mut(SCENE)
                .ok_or_else(|| RenderError::UnknownScene(SCENE.to_string()))?;
            let populated = populate_scene(scene, resources, &config.scene)?;
            if let Some(camera) = scene.camera_mut(&populated.camera) {
                camera.set_aspect_ratio(size.0 as f32 / size.1.max(1) as f32);
            }
            populated
        };

        let viewport =
            Viewport::new(SCENE, populated.camera.as_str()).with_background(config.rendering.background());
        engine.add_viewport(RENDER_WINDOW, viewport)?;

        let host = DisplayHost::new(platform, window, context);
        log::info!("Startup complete");

        Ok(Self {
            display_loop: DisplayLoop::new(engine, host),
            populated,
        })
    }

    /// Run the display loop until quit or a frame failure
    pub fn run(&mut self) -> Result<LoopExit, LoopError> {
        let exit = self.display_loop.run()?;
        if let Some(fps) = self.display_loop.renderer().stats().average_fps() {
            log::info!("Average frame rate: {:.1} fps", fps);
        }
        Ok(exit)
    }

    pub fn engine(&self) -> &Engine {
        self.display_loop.renderer()
    }

    pub fn engine_mut(&mut self) -> &mut Engine {
        self.display_loop.renderer_mut()
    }

    pub fn host(&self) -> &DisplayHost {
        self.display_loop.window()
    }

    pub fn scene(&self) -> &PopulatedScene {
        &self.populated
    }
}

impl Drop for App {
    fn drop(&mut self) {
        log::info!("Shutting down");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    use tether_scene::{ResourceError, ResourceGroupManager, SceneManager};

    use crate::config::SceneConfig;

    /// Scene population the way `App::start` runs it, with its error type
    fn populate(config: &SceneConfig) -> Result<PopulatedScene, StartupError> {
        let mut scene = SceneManager::new(SCENE);
        let mut resources = ResourceGroupManager::new();
        Ok(populate_scene(&mut scene, &mut resources, config)?)
    }

    #[test]
    fn test_missing_mesh_is_a_scene_startup_error() {
        let config = SceneConfig {
            mesh: Some(Default::default()),
            ..SceneConfig::default()
        };
        let err = populate(&config).unwrap_err();

        assert!(matches!(
            err,
            StartupError::Scene(SceneError::Resource(ResourceError::NotFound(ref name))) if name == "cube.mesh"
        ));
        assert_eq!(
            err.to_string(),
            "Scene setup failed: Scene resource error: Resource not found: cube.mesh"
        );
        assert!(err.source().is_some());
    }

    #[test]
    fn test_display_error_conversion() {
        let err = StartupError::from(DisplayError::PlatformInit("no display".to_string()));
        assert!(matches!(err, StartupError::Display(DisplayError::PlatformInit(_))));
        assert_eq!(
            err.to_string(),
            "Display setup failed: Couldn't init window system: no display"
        );
        assert_eq!(
            err.source().map(|s| s.to_string()),
            Some("Couldn't init window system: no display".to_string())
        );
    }

    #[test]
    fn test_render_error_conversion() {
        let err = StartupError::from(RenderError::DuplicateWindow(RENDER_WINDOW.to_string()));
        assert!(matches!(err, StartupError::Render(RenderError::DuplicateWindow(_))));
        assert_eq!(
            err.to_string(),
            "Engine setup failed: Render window 'view' already exists"
        );
    }

    #[test]
    fn test_unknown_camera_viewport_fails_startup() {
        let mut engine = Engine::new();
        engine.create_scene_manager(SCENE).unwrap();
        let err: StartupError = engine
            .validate_viewport(&Viewport::new(SCENE, "cam"))
            .unwrap_err()
            .into();
        assert!(matches!(err, StartupError::Render(RenderError::UnknownCamera { .. })));
    }
}
