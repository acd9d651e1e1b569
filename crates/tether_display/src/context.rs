//! GPU rendering context
//!
//! The context is created by the window layer for its window and handed to
//! the engine, which renders into it. The engine never creates a surface of
//! its own. Finished frames stay pending in the context until the host
//! presents them.

use std::cell::RefCell;
use std::sync::Arc;

use winit::window::Window;

use crate::{DisplayError, HostWindow};

/// Settings for creating a [`RenderContext`]
#[derive(Clone, Debug)]
pub struct ContextSettings {
    pub backends: wgpu::Backends,
    pub power_preference: wgpu::PowerPreference,
    pub vsync: bool,
}

impl Default for ContextSettings {
    fn default() -> Self {
        Self {
            backends: wgpu::Backends::PRIMARY,
            power_preference: wgpu::PowerPreference::default(),
            vsync: true,
        }
    }
}

impl ContextSettings {
    /// Build settings from configuration strings
    ///
    /// `backends` is a comma separated list (`vulkan,metal,dx12,gl`) or
    /// `primary` / `all`; `power_preference` is `none`, `low-power` or
    /// `high-performance`.
    pub fn from_names(backends: &str, power_preference: &str, vsync: bool) -> Result<Self, DisplayError> {
        Ok(Self {
            backends: parse_backends(backends)?,
            power_preference: parse_power_preference(power_preference)?,
            vsync,
        })
    }

    fn present_mode(&self) -> wgpu::PresentMode {
        if self.vsync {
            wgpu::PresentMode::Fifo
        } else {
            wgpu::PresentMode::AutoNoVsync
        }
    }
}

fn parse_backends(value: &str) -> Result<wgpu::Backends, DisplayError> {
    let backends = match value.trim().to_ascii_lowercase().as_str() {
        "primary" => wgpu::Backends::PRIMARY,
        "secondary" => wgpu::Backends::SECONDARY,
        "all" => wgpu::Backends::all(),
        list => wgpu::Backends::from_comma_list(list),
    };
    if backends.is_empty() {
        return Err(DisplayError::InvalidSetting {
            name: "backends",
            value: value.to_string(),
        });
    }
    Ok(backends)
}

fn parse_power_preference(value: &str) -> Result<wgpu::PowerPreference, DisplayError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "none" | "" => Ok(wgpu::PowerPreference::None),
        "low-power" | "low_power" => Ok(wgpu::PowerPreference::LowPower),
        "high-performance" | "high_performance" => Ok(wgpu::PowerPreference::HighPerformance),
        _ => Err(DisplayError::InvalidSetting {
            name: "power_preference",
            value: value.to_string(),
        }),
    }
}

/// Why no frame was acquired this iteration
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// Acquire timed out
    Timeout,
    /// Surface no longer matches the window; it was reconfigured
    Outdated,
    /// Surface was lost; it was reconfigured
    Lost,
    /// Window has no drawable area (minimized)
    ZeroSize,
}

/// Result of acquiring the next surface texture
pub enum FrameAcquire {
    Ready(wgpu::SurfaceTexture),
    Skipped(SkipReason),
}

/// GPU device, queue and window surface
pub struct RenderContext {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    adapter_info: wgpu::AdapterInfo,
    config: RefCell<wgpu::SurfaceConfiguration>,
    pending: RefCell<Option<wgpu::SurfaceTexture>>,
    window: Arc<Window>,
}

impl RenderContext {
    /// Create the context for `window`, blocking until the device is ready
    pub fn new(window: &HostWindow, settings: &ContextSettings) -> Result<Self, DisplayError> {
        pollster::block_on(Self::new_async(window.handle().clone(), settings))
    }

    async fn new_async(window: Arc<Window>, settings: &ContextSettings) -> Result<Self, DisplayError> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: settings.backends,
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .map_err(|e| DisplayError::Surface(e.to_string()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: settings.power_preference,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(DisplayError::NoAdapter)?;

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Tether Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: Default::default(),
                },
                None,
            )
            .await
            .map_err(|e| DisplayError::Device(e.to_string()))?;

        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| DisplayError::Surface("surface reports no formats".to_string()))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: settings.present_mode(),
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let adapter_info = adapter.get_info();
        log::info!(
            "Render context on {} ({:?}), {:?} {}x{}",
            adapter_info.name,
            adapter_info.backend,
            format,
            config.width,
            config.height
        );

        Ok(Self {
            surface,
            device,
            queue,
            adapter_info,
            config: RefCell::new(config),
            pending: RefCell::new(None),
            window,
        })
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    pub fn adapter_info(&self) -> &wgpu::AdapterInfo {
        &self.adapter_info
    }

    pub fn format(&self) -> wgpu::TextureFormat {
        self.config.borrow().format
    }

    /// Configured surface size
    pub fn size(&self) -> (u32, u32) {
        let config = self.config.borrow();
        (config.width, config.height)
    }

    /// Resize the surface; zero sizes are ignored
    pub fn resize(&self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        {
            let mut config = self.config.borrow_mut();
            config.width = width;
            config.height = height;
        }
        self.reconfigure();
    }

    /// Reapply the current configuration to the surface
    pub fn reconfigure(&self) {
        self.surface.configure(&self.device, &self.config.borrow());
    }

    /// Acquire the next texture to render into
    ///
    /// Lost and outdated surfaces are reconfigured and the frame is skipped.
    pub fn acquire_frame(&self) -> Result<FrameAcquire, DisplayError> {
        let size = self.window.inner_size();
        if size.width == 0 || size.height == 0 {
            return Ok(FrameAcquire::Skipped(SkipReason::ZeroSize));
        }

        match self.surface.get_current_texture() {
            Ok(frame) => Ok(FrameAcquire::Ready(frame)),
            Err(wgpu::SurfaceError::Timeout) => Ok(FrameAcquire::Skipped(SkipReason::Timeout)),
            Err(wgpu::SurfaceError::Outdated) => {
                self.resize(size.width, size.height);
                Ok(FrameAcquire::Skipped(SkipReason::Outdated))
            }
            Err(wgpu::SurfaceError::Lost) => {
                self.reconfigure();
                Ok(FrameAcquire::Skipped(SkipReason::Lost))
            }
            Err(wgpu::SurfaceError::OutOfMemory) => Err(DisplayError::OutOfMemory),
            Err(e) => Err(DisplayError::Surface(e.to_string())),
        }
    }

    /// Keep a rendered frame until the next [`present`](Self::present)
    pub fn submit_frame(&self, frame: wgpu::SurfaceTexture) {
        if self.pending.replace(Some(frame)).is_some() {
            log::warn!("Rendered frame replaced before it was presented");
        }
    }

    pub fn has_pending_frame(&self) -> bool {
        self.pending.borrow().is_some()
    }

    /// Present the pending frame; returns false when there was none
    pub fn present(&self) -> bool {
        match self.pending.borrow_mut().take() {
            Some(frame) => {
                self.window.pre_present_notify();
                frame.present();
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_names() {
        assert_eq!(parse_backends("primary").unwrap(), wgpu::Backends::PRIMARY);
        assert_eq!(parse_backends("ALL").unwrap(), wgpu::Backends::all());
        assert_eq!(
            parse_backends("vulkan,gl").unwrap(),
            wgpu::Backends::VULKAN | wgpu::Backends::GL
        );
        assert!(parse_backends("voodoo").is_err());
    }

    #[test]
    fn test_power_preference_names() {
        assert_eq!(
            parse_power_preference("high-performance").unwrap(),
            wgpu::PowerPreference::HighPerformance
        );
        assert_eq!(parse_power_preference("low_power").unwrap(), wgpu::PowerPreference::LowPower);
        assert_eq!(parse_power_preference("none").unwrap(), wgpu::PowerPreference::None);
        assert!(parse_power_preference("turbo").is_err());
    }

    #[test]
    fn test_vsync_selects_present_mode() {
        let mut settings = ContextSettings::default();
        assert_eq!(settings.present_mode(), wgpu::PresentMode::Fifo);
        settings.vsync = false;
        assert_eq!(settings.present_mode(), wgpu::PresentMode::AutoNoVsync);
    }
}
