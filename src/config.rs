//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`TETHER_SECTION__KEY`)

use figment::{Figment, providers::{Format, Toml, Env}};
use serde::{Serialize, Deserialize};
use std::path::Path;

use tether_display::{ContextSettings, DisplayError, WindowSpec};
use tether_math::{ColourValue, Vec3};

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Window configuration
    #[serde(default)]
    pub window: WindowConfig,
    /// Rendering configuration
    #[serde(default)]
    pub rendering: RenderingConfig,
    /// Scene population
    #[serde(default)]
    pub scene: SceneConfig,
    /// Debug configuration
    #[serde(default)]
    pub debug: DebugConfig,
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`TETHER_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // TETHER_WINDOW__TITLE=Test -> window.title = "Test"
        figment = figment.merge(Env::prefixed("TETHER_").split("__"));

        figment.extract().map_err(ConfigError::from)
    }

    /// Load configuration, falling back to defaults when loading fails
    ///
    /// The load error is handed back rather than logged so callers can
    /// report it once logging is set up from the returned configuration.
    pub fn load_or_default() -> (Self, Option<ConfigError>) {
        Self::load_from_or_default("config")
    }

    /// [`load_or_default`](Self::load_or_default) for a specific config directory
    pub fn load_from_or_default<P: AsRef<Path>>(config_dir: P) -> (Self, Option<ConfigError>) {
        match Self::load_from(config_dir) {
            Ok(config) => (config, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }
}

/// Window configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Window width in pixels
    pub width: u32,
    /// Window height in pixels
    pub height: u32,
    /// Allow the user to resize the window
    pub resizable: bool,
    /// Enable VSync
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "SDL Examples".to_string(),
            width: 800,
            height: 600,
            resizable: false,
            vsync: true,
        }
    }
}

impl WindowConfig {
    pub fn to_window_spec(&self) -> WindowSpec {
        WindowSpec {
            title: self.title.clone(),
            width: self.width,
            height: self.height,
            resizable: self.resizable,
        }
    }
}

/// Rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderingConfig {
    /// Graphics backends: "primary", "secondary", "all" or a list like "vulkan,gl"
    pub backends: String,
    /// Adapter power preference: "none", "low-power" or "high-performance"
    pub power_preference: String,
    /// Viewport background colour [r, g, b]
    pub background_colour: [f32; 3],
}

impl Default for RenderingConfig {
    fn default() -> Self {
        Self {
            backends: "primary".to_string(),
            power_preference: "high-performance".to_string(),
            background_colour: [1.0, 0.0, 1.0],
        }
    }
}

impl RenderingConfig {
    /// Context settings for the window's rendering context
    pub fn to_context_settings(&self, vsync: bool) -> Result<ContextSettings, DisplayError> {
        ContextSettings::from_names(&self.backends, &self.power_preference, vsync)
    }

    pub fn background(&self) -> ColourValue {
        ColourValue::from(self.background_colour)
    }
}

/// Scene population
///
/// Without `resources`, `light` and `mesh` this describes the plain
/// background colour scene: one camera and its viewport.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Resource configuration file whose locations are registered at startup
    pub resources: Option<String>,
    pub camera: CameraConfig,
    pub light: Option<LightConfig>,
    pub mesh: Option<MeshConfig>,
}

/// Camera configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub name: String,
    /// Position of the camera's scene node
    pub position: [f32; 3],
    /// Near clipping distance; the camera default applies when unset
    pub near_clip: Option<f32>,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            name: "cam".to_string(),
            position: [0.0, 0.0, 0.0],
            near_clip: None,
        }
    }
}

impl CameraConfig {
    pub fn position(&self) -> Vec3 {
        Vec3::from(self.position)
    }
}

/// Point light configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LightConfig {
    pub name: String,
    pub position: [f32; 3],
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            name: "light".to_string(),
            position: [0.0, 0.0, 5.0],
        }
    }
}

/// Mesh entity configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MeshConfig {
    /// Entity name
    pub entity: String,
    /// Mesh resource name, resolved through the registered resource locations
    pub mesh: String,
    /// Rotation axis of the entity's node
    pub axis: [f32; 3],
    /// Rotation angle in degrees
    pub angle: f32,
}

impl Default for MeshConfig {
    fn default() -> Self {
        Self {
            entity: "cube".to_string(),
            mesh: "cube.mesh".to_string(),
            axis: [1.0, 1.0, 1.0],
            angle: 45.0,
        }
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError {
            message: e.to_string(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.window.title, "SDL Examples");
        assert_eq!(config.window.width, 800);
        assert_eq!(config.window.height, 600);
        assert_eq!(config.rendering.background_colour, [1.0, 0.0, 1.0]);
        assert!(config.scene.mesh.is_none());
        assert!(config.scene.resources.is_none());
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml = toml::to_string(&config).unwrap();
        assert!(toml.contains("title"));
        assert!(toml.contains("background_colour"));
    }

    #[test]
    fn test_partial_section_keeps_defaults() {
        let config: AppConfig = toml::from_str("[window]\ntitle = \"Other\"\n").unwrap();
        assert_eq!(config.window.title, "Other");
        assert_eq!(config.window.width, 800);
        assert!(config.window.vsync);
    }

    #[test]
    fn test_mesh_section() {
        let config: AppConfig =
            toml::from_str("[scene]\nresources = \"resources.cfg\"\n[scene.mesh]\n").unwrap();
        let mesh = config.scene.mesh.unwrap();
        assert_eq!(mesh.mesh, "cube.mesh");
        assert_eq!(mesh.angle, 45.0);
    }

    #[test]
    fn test_window_spec() {
        let spec = WindowConfig::default().to_window_spec();
        assert_eq!(spec, WindowSpec::default());
    }

    #[test]
    fn test_context_settings_reject_unknown_backend() {
        let rendering = RenderingConfig {
            backends: "glide".to_string(),
            ..RenderingConfig::default()
        };
        assert!(rendering.to_context_settings(true).is_err());
    }
}
