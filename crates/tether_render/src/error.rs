//! Render error types

use std::fmt;

use tether_display::DisplayError;

/// Errors raised by the engine
#[derive(Debug)]
pub enum RenderError {
    /// The window layer failed while acquiring or presenting a frame
    Display(DisplayError),
    /// A render window with this name already exists
    DuplicateWindow(String),
    /// A scene manager with this name already exists
    DuplicateScene(String),
    UnknownWindow(String),
    UnknownScene(String),
    /// The viewport's camera does not exist in its scene
    UnknownCamera { scene: String, camera: String },
    /// The render window already has a viewport at this z-order
    DuplicateZOrder { window: String, z_order: i32 },
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::Display(err) => write!(f, "Render error: {}", err),
            RenderError::DuplicateWindow(name) => write!(f, "Render window '{}' already exists", name),
            RenderError::DuplicateScene(name) => write!(f, "Scene manager '{}' already exists", name),
            RenderError::UnknownWindow(name) => write!(f, "Unknown render window '{}'", name),
            RenderError::UnknownScene(name) => write!(f, "Unknown scene manager '{}'", name),
            RenderError::UnknownCamera { scene, camera } => {
                write!(f, "Camera '{}' not found in scene '{}'", camera, scene)
            }
            RenderError::DuplicateZOrder { window, z_order } => {
                write!(f, "Render window '{}' already has a viewport at z-order {}", window, z_order)
            }
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RenderError::Display(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DisplayError> for RenderError {
    fn from(err: DisplayError) -> Self {
        RenderError::Display(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_render_error_display() {
        assert_eq!(
            format!("{}", RenderError::Display(DisplayError::OutOfMemory)),
            "Render error: GPU out of memory"
        );
        assert_eq!(
            format!(
                "{}",
                RenderError::UnknownCamera { scene: "main".to_string(), camera: "cam".to_string() }
            ),
            "Camera 'cam' not found in scene 'main'"
        );
    }

    #[test]
    fn test_display_error_is_source() {
        let err: RenderError = DisplayError::NoAdapter.into();
        assert!(err.source().is_some());
        assert!(RenderError::UnknownWindow("view".to_string()).source().is_none());
    }
}
