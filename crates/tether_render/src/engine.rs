//! Engine root
//!
//! The engine starts without any window. Render windows are bound later to
//! native windows and contexts created by the window layer.

use std::collections::BTreeMap;
use std::time::Instant;

use tether_display::SkipReason;
use tether_scene::{ResourceGroupManager, SceneManager};

use crate::render_window::WindowFrame;
use crate::{FrameStats, RenderError, RenderWindow, RenderWindowParams, Viewport};

/// Result of one `render_one_frame` call
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Every render window drew a frame that is now waiting to be presented
    Rendered { windows: usize },
    /// At least one window skipped its frame
    Skipped(SkipReason),
    /// No render window exists
    NoTargets,
}

/// The rendering engine
pub struct Engine {
    resources: ResourceGroupManager,
    scenes: BTreeMap<String, SceneManager>,
    windows: Vec<RenderWindow>,
    stats: FrameStats,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// Create an engine with no render window
    pub fn new() -> Self {
        log::info!("Engine initialised without a default window");
        Self {
            resources: ResourceGroupManager::new(),
            scenes: BTreeMap::new(),
            windows: Vec::new(),
            stats: FrameStats::new(),
        }
    }

    // --- Resources ---

    pub fn resources(&self) -> &ResourceGroupManager {
        &self.resources
    }

    pub fn resources_mut(&mut self) -> &mut ResourceGroupManager {
        &mut self.resources
    }

    // --- Render windows ---

    /// Bind a render window to an external native window and context
    pub fn create_render_window(
        &mut self,
        name: &str,
        (width, height): (u32, u32),
        params: RenderWindowParams,
    ) -> Result<&mut RenderWindow, RenderError> {
        if self.windows.iter().any(|w| w.name() == name) {
            return Err(RenderError::DuplicateWindow(name.to_string()));
        }
        log::info!(
            "Render window '{}' ({}x{}) bound to {} on {}",
            name,
            width,
            height,
            params.native_window,
            params.context.adapter_info().name
        );
        self.windows.push(RenderWindow::new(name, width, height, params));
        let index = self.windows.len() - 1;
        Ok(&mut self.windows[index])
    }

    pub fn render_window(&self, name: &str) -> Option<&RenderWindow> {
        self.windows.iter().find(|w| w.name() == name)
    }

    pub fn render_window_count(&self) -> usize {
        self.windows.len()
    }

    // --- Scenes ---

    pub fn create_scene_manager(&mut self, name: &str) -> Result<&mut SceneManager, RenderError> {
        if self.scenes.contains_key(name) {
            return Err(RenderError::DuplicateScene(name.to_string()));
        }
        log::debug!("Created scene manager '{}'", name);
        Ok(self
            .scenes
            .entry(name.to_string())
            .or_insert_with(|| SceneManager::new(name)))
    }

    pub fn scene_manager(&self, name: &str) -> Option<&SceneManager> {
        self.scenes.get(name)
    }

    pub fn scene_manager_mut(&mut self, name: &str) -> Option<&mut SceneManager> {
        self.scenes.get_mut(name)
    }

    /// Scene manager and resource groups borrowed together, for building
    /// entities that resolve resources
    pub fn scene_and_resources_mut(
        &mut self,
        name: &str,
    ) -> Option<(&mut SceneManager, &mut ResourceGroupManager)> {
        let scene = self.scenes.get_mut(name)?;
        Some((scene, &mut self.resources))
    }

    /// Check that a viewport's scene and camera exist
    pub fn validate_viewport(&self, viewport: &Viewport) -> Result<(), RenderError> {
        let scene = self
            .scenes
            .get(viewport.scene())
            .ok_or_else(|| RenderError::UnknownScene(viewport.scene().to_string()))?;
        if scene.camera(viewport.camera()).is_none() {
            return Err(RenderError::UnknownCamera {
                scene: viewport.scene().to_string(),
                camera: viewport.camera().to_string(),
            });
        }
        Ok(())
    }

    /// Add a viewport to a render window
    pub fn add_viewport(&mut self, window: &str, viewport: Viewport) -> Result<(), RenderError> {
        self.validate_viewport(&viewport)?;
        let target = self
            .windows
            .iter_mut()
            .find(|w| w.name() == window)
            .ok_or_else(|| RenderError::UnknownWindow(window.to_string()))?;
        log::debug!(
            "Viewport for camera '{}' added to '{}' at z-order {}",
            viewport.camera(),
            window,
            viewport.z_order()
        );
        target.insert_viewport(viewport)
    }

    // --- Frames ---

    /// Render one frame into every render window
    ///
    /// Scene transforms are refreshed first. Frames stay pending in each
    /// window's context until the window layer presents them.
    pub fn render_one_frame(&mut self) -> Result<FrameOutcome, RenderError> {
        for scene in self.scenes.values_mut() {
            scene.update_transforms();
        }

        if self.windows.is_empty() {
            return Ok(FrameOutcome::NoTargets);
        }

        let mut visible = 0;
        let mut skipped = None;
        for window in &self.windows {
            match window.render(&self.scenes)? {
                WindowFrame::Drawn { visible_entities } => visible += visible_entities,
                WindowFrame::Skipped(reason) => skipped = Some(reason),
            }
        }

        match skipped {
            Some(reason) => {
                self.stats.record_skipped();
                Ok(FrameOutcome::Skipped(reason))
            }
            None => {
                self.stats.record_rendered(visible, Instant::now());
                Ok(FrameOutcome::Rendered { windows: self.windows.len() })
            }
        }
    }

    pub fn stats(&self) -> &FrameStats {
        &self.stats
    }
}

impl Drop for Engine {
    fn drop(&mut self) {
        log::info!(
            "Engine shut down after {} frames ({} skipped)",
            self.stats.frames_rendered,
            self.stats.frames_skipped
        );
    }
}
