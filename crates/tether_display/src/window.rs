//! Host window
//!
//! The window is created once at startup with a fixed size and destroyed once
//! when its last owner drops it.

use std::fmt;
use std::sync::Arc;

use winit::dpi::LogicalSize;
use winit::raw_window_handle::{HasWindowHandle, RawWindowHandle};
use winit::window::{Window, WindowId};

use crate::DisplayError;

/// Parameters for creating the host window
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WindowSpec {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub resizable: bool,
}

impl Default for WindowSpec {
    fn default() -> Self {
        Self {
            title: "SDL Examples".to_string(),
            width: 800,
            height: 600,
            resizable: false,
        }
    }
}

impl WindowSpec {
    pub(crate) fn attributes(&self) -> winit::window::WindowAttributes {
        Window::default_attributes()
            .with_title(&self.title)
            .with_inner_size(LogicalSize::new(self.width, self.height))
            .with_resizable(self.resizable)
    }
}

/// The application window
pub struct HostWindow {
    window: Arc<Window>,
    spec: WindowSpec,
}

impl HostWindow {
    pub(crate) fn new(window: Window, spec: WindowSpec) -> Self {
        Self {
            window: Arc::new(window),
            spec,
        }
    }

    pub fn id(&self) -> WindowId {
        self.window.id()
    }

    /// Shared handle for GPU surface creation
    pub fn handle(&self) -> &Arc<Window> {
        &self.window
    }

    pub fn spec(&self) -> &WindowSpec {
        &self.spec
    }

    /// Current drawable size in physical pixels
    pub fn inner_size(&self) -> (u32, u32) {
        let size = self.window.inner_size();
        (size.width, size.height)
    }

    pub fn set_title(&self, title: &str) {
        self.window.set_title(title);
    }

    /// Query the platform handle of this window
    pub fn native_window(&self) -> Result<NativeWindow, DisplayError> {
        let handle = self
            .window
            .window_handle()
            .map_err(|e| DisplayError::WindowHandle(e.to_string()))?;
        let (width, height) = self.inner_size();
        Ok(NativeWindow {
            raw: handle.as_raw(),
            width,
            height,
        })
    }
}

/// Platform window handle plus the size it had when queried
#[derive(Clone, Copy, Debug)]
pub struct NativeWindow {
    raw: RawWindowHandle,
    pub width: u32,
    pub height: u32,
}

impl NativeWindow {
    pub fn raw(&self) -> RawWindowHandle {
        self.raw
    }

    /// Short name of the windowing platform behind the handle
    pub fn platform(&self) -> &'static str {
        match self.raw {
            RawWindowHandle::Win32(_) => "win32",
            RawWindowHandle::Xlib(_) => "xlib",
            RawWindowHandle::Xcb(_) => "xcb",
            RawWindowHandle::Wayland(_) => "wayland",
            RawWindowHandle::AppKit(_) => "appkit",
            RawWindowHandle::UiKit(_) => "uikit",
            RawWindowHandle::AndroidNdk(_) => "android",
            RawWindowHandle::Web(_) => "web",
            _ => "other",
        }
    }
}

impl fmt::Display for NativeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} window {}x{}", self.platform(), self.width, self.height)
    }
}
