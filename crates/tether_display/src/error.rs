//! Display error types

use std::fmt;

/// Errors raised by the window system layer
#[derive(Debug)]
pub enum DisplayError {
    /// The windowing subsystem could not be initialised
    PlatformInit(String),
    /// The OS refused to create the window
    WindowCreation(String),
    /// The native window handle is unavailable
    WindowHandle(String),
    /// Surface creation or presentation failed
    Surface(String),
    /// No GPU adapter can present to the window
    NoAdapter,
    /// The GPU device could not be created
    Device(String),
    /// The GPU ran out of memory
    OutOfMemory,
    /// A context setting could not be parsed
    InvalidSetting { name: &'static str, value: String },
}

impl fmt::Display for DisplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayError::PlatformInit(msg) => write!(f, "Couldn't init window system: {}", msg),
            DisplayError::WindowCreation(msg) => write!(f, "Couldn't create window: {}", msg),
            DisplayError::WindowHandle(msg) => write!(f, "Native window handle unavailable: {}", msg),
            DisplayError::Surface(msg) => write!(f, "Surface error: {}", msg),
            DisplayError::NoAdapter => write!(f, "No GPU adapter compatible with the window"),
            DisplayError::Device(msg) => write!(f, "GPU device request failed: {}", msg),
            DisplayError::OutOfMemory => write!(f, "GPU out of memory"),
            DisplayError::InvalidSetting { name, value } => {
                write!(f, "Invalid {} setting: '{}'", name, value)
            }
        }
    }
}

impl std::error::Error for DisplayError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_error_messages() {
        assert_eq!(
            format!("{}", DisplayError::PlatformInit("no display".to_string())),
            "Couldn't init window system: no display"
        );
        assert_eq!(format!("{}", DisplayError::OutOfMemory), "GPU out of memory");
        assert_eq!(
            format!(
                "{}",
                DisplayError::InvalidSetting { name: "power_preference", value: "max".to_string() }
            ),
            "Invalid power_preference setting: 'max'"
        );
    }
}
