//! Viewports
//!
//! A viewport shows one camera of one scene inside a render window. Viewports
//! cover the whole window and are drawn in ascending z-order.

use tether_math::ColourValue;

/// Camera view into a render window
#[derive(Clone, Debug, PartialEq)]
pub struct Viewport {
    scene: String,
    camera: String,
    z_order: i32,
    background: ColourValue,
    clear_every_frame: bool,
}

impl Viewport {
    /// Viewport for `camera` in `scene` at z-order 0 with a black background
    pub fn new(scene: impl Into<String>, camera: impl Into<String>) -> Self {
        Self {
            scene: scene.into(),
            camera: camera.into(),
            z_order: 0,
            background: ColourValue::BLACK,
            clear_every_frame: true,
        }
    }

    pub fn with_z_order(mut self, z_order: i32) -> Self {
        self.z_order = z_order;
        self
    }

    pub fn with_background(mut self, colour: ColourValue) -> Self {
        self.background = colour.saturated();
        self
    }

    pub fn with_clear_every_frame(mut self, clear: bool) -> Self {
        self.clear_every_frame = clear;
        self
    }

    pub fn scene(&self) -> &str {
        &self.scene
    }

    pub fn camera(&self) -> &str {
        &self.camera
    }

    pub fn z_order(&self) -> i32 {
        self.z_order
    }

    pub fn background(&self) -> ColourValue {
        self.background
    }

    pub fn set_background(&mut self, colour: ColourValue) {
        self.background = colour.saturated();
    }

    pub fn clear_every_frame(&self) -> bool {
        self.clear_every_frame
    }

    /// Load operation for this viewport's pass
    pub(crate) fn load_op(&self) -> wgpu::LoadOp<wgpu::Color> {
        if self.clear_every_frame {
            let c = self.background;
            wgpu::LoadOp::Clear(wgpu::Color {
                r: c.r as f64,
                g: c.g as f64,
                b: c.b as f64,
                a: c.a as f64,
            })
        } else {
            wgpu::LoadOp::Load
        }
    }
}
