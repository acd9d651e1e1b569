//! Render windows
//!
//! A render window is the engine's view of a native window it does not own.
//! It draws through the [`RenderContext`] the window layer created and never
//! creates a context of its own.

use std::collections::BTreeMap;
use std::rc::Rc;

use tether_display::{FrameAcquire, NativeWindow, RenderContext, SkipReason};
use tether_scene::SceneManager;

use crate::{RenderError, Viewport};

/// Handles needed to bind a render window to an external native window
#[derive(Clone)]
pub struct RenderWindowParams {
    /// Platform handle of the host window
    pub native_window: NativeWindow,
    /// Context created by the window layer for that window
    pub context: Rc<RenderContext>,
}

/// Outcome of drawing one render window
pub(crate) enum WindowFrame {
    Drawn { visible_entities: usize },
    Skipped(SkipReason),
}

/// Render surface bound to a native window
pub struct RenderWindow {
    name: String,
    width: u32,
    height: u32,
    native_window: NativeWindow,
    context: Rc<RenderContext>,
    viewports: Vec<Viewport>,
}

impl RenderWindow {
    pub(crate) fn new(name: &str, width: u32, height: u32, params: RenderWindowParams) -> Self {
        Self {
            name: name.to_string(),
            width,
            height,
            native_window: params.native_window,
            context: params.context,
            viewports: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Size requested when the window was created
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn native_window(&self) -> &NativeWindow {
        &self.native_window
    }

    pub fn context(&self) -> &Rc<RenderContext> {
        &self.context
    }

    /// Viewports in drawing order
    pub fn viewports(&self) -> &[Viewport] {
        &self.viewports
    }

    pub fn viewport_count(&self) -> usize {
        self.viewports.len()
    }

    pub(crate) fn insert_viewport(&mut self, viewport: Viewport) -> Result<(), RenderError> {
        insert_by_z_order(&self.name, &mut self.viewports, viewport)
    }

    /// Draw every viewport and leave the frame pending for presentation
    pub(crate) fn render(&self, scenes: &BTreeMap<String, SceneManager>) -> Result<WindowFrame, RenderError> {
        let frame = match self.context.acquire_frame()? {
            FrameAcquire::Ready(frame) => frame,
            FrameAcquire::Skipped(reason) => {
                log::debug!("Render window '{}': frame skipped ({:?})", self.name, reason);
                return Ok(WindowFrame::Skipped(reason));
            }
        };

        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .context
            .device()
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Tether Frame Encoder"),
            });

        // Without viewports the frame is still cleared so nothing stale is shown
        let loads: Vec<_> = if self.viewports.is_empty() {
            vec![wgpu::LoadOp::Clear(wgpu::Color::BLACK)]
        } else {
            self.viewports.iter().map(Viewport::load_op).collect()
        };

        for load in loads {
            let _pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Viewport Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
        }

        self.context.queue().submit(std::iter::once(encoder.finish()));
        self.context.submit_frame(frame);

        let visible_entities = self
            .viewports
            .iter()
            .filter_map(|vp| scenes.get(vp.scene()))
            .map(|scene| scene.visible_entities().count())
            .sum();

        Ok(WindowFrame::Drawn { visible_entities })
    }
}

/// Insert keeping ascending z-order; one viewport per z-order
fn insert_by_z_order(window: &str, viewports: &mut Vec<Viewport>, viewport: Viewport) -> Result<(), RenderError> {
    match viewports.binary_search_by_key(&viewport.z_order(), Viewport::z_order) {
        Ok(_) => Err(RenderError::DuplicateZOrder {
            window: window.to_string(),
            z_order: viewport.z_order(),
        }),
        Err(index) => {
            viewports.insert(index, viewport);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewports_sorted_by_z_order() {
        let mut viewports = Vec::new();
        insert_by_z_order("view", &mut viewports, Viewport::new("main", "a").with_z_order(5)).unwrap();
        insert_by_z_order("view", &mut viewports, Viewport::new("main", "b").with_z_order(-1)).unwrap();
        insert_by_z_order("view", &mut viewports, Viewport::new("main", "c").with_z_order(2)).unwrap();

        let cameras: Vec<_> = viewports.iter().map(Viewport::camera).collect();
        assert_eq!(cameras, vec!["b", "c", "a"]);
    }

    #[test]
    fn test_duplicate_z_order_rejected() {
        let mut viewports = Vec::new();
        insert_by_z_order("view", &mut viewports, Viewport::new("main", "a")).unwrap();
        let err = insert_by_z_order("view", &mut viewports, Viewport::new("main", "b")).unwrap_err();
        assert!(matches!(err, RenderError::DuplicateZOrder { z_order: 0, .. }));
        assert_eq!(viewports.len(), 1);
    }
}
