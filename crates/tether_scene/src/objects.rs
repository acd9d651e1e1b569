//! Movable scene objects: cameras, lights and mesh entities

use std::fmt;
use std::path::PathBuf;

use tether_math::{ColourValue, Degree, Vec3};
use crate::node::NodeKey;
use crate::SceneError;

/// The kind of a movable scene object
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    Camera,
    Light,
    Entity,
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ObjectKind::Camera => "camera",
            ObjectKind::Light => "light",
            ObjectKind::Entity => "entity",
        };
        f.write_str(name)
    }
}

/// Names a movable object inside one scene manager
///
/// Names are unique per kind, so a camera and a light may share a name.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ObjectRef {
    pub kind: ObjectKind,
    pub name: String,
}

impl ObjectRef {
    pub fn new(kind: ObjectKind, name: impl Into<String>) -> Self {
        Self { kind, name: name.into() }
    }

    pub fn camera(name: impl Into<String>) -> Self {
        Self::new(ObjectKind::Camera, name)
    }

    pub fn light(name: impl Into<String>) -> Self {
        Self::new(ObjectKind::Light, name)
    }

    pub fn entity(name: impl Into<String>) -> Self {
        Self::new(ObjectKind::Entity, name)
    }
}

impl fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} '{}'", self.kind, self.name)
    }
}

/// Perspective camera
///
/// Defaults mirror a freshly created engine camera: near plane at 100 units,
/// far plane at 100000 units and a 45 degree vertical field of view.
#[derive(Clone, Debug)]
pub struct Camera {
    name: String,
    near_clip: f32,
    far_clip: f32,
    fov_y: Degree,
    /// None means "derive from the viewport"
    aspect_ratio: Option<f32>,
    pub(crate) node: Option<NodeKey>,
}

impl Camera {
    pub const DEFAULT_NEAR_CLIP: f32 = 100.0;
    pub const DEFAULT_FAR_CLIP: f32 = 100_000.0;

    pub(crate) fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            near_clip: Self::DEFAULT_NEAR_CLIP,
            far_clip: Self::DEFAULT_FAR_CLIP,
            fov_y: Degree(45.0),
            aspect_ratio: None,
            node: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn near_clip_distance(&self) -> f32 {
        self.near_clip
    }

    pub fn far_clip_distance(&self) -> f32 {
        self.far_clip
    }

    /// Set the near clip plane; must be positive and closer than the far plane
    pub fn set_near_clip_distance(&mut self, near: f32) -> Result<(), SceneError> {
        if !(near > 0.0) || near >= self.far_clip {
            return Err(SceneError::InvalidClipDistance { near, far: self.far_clip });
        }
        self.near_clip = near;
        Ok(())
    }

    pub fn set_far_clip_distance(&mut self, far: f32) -> Result<(), SceneError> {
        if !(far > self.near_clip) {
            return Err(SceneError::InvalidClipDistance { near: self.near_clip, far });
        }
        self.far_clip = far;
        Ok(())
    }

    pub fn fov_y(&self) -> Degree {
        self.fov_y
    }

    pub fn set_fov_y(&mut self, fov: Degree) {
        self.fov_y = fov;
    }

    pub fn aspect_ratio(&self) -> Option<f32> {
        self.aspect_ratio
    }

    /// Fix the aspect ratio; viewports stop overriding it
    pub fn set_aspect_ratio(&mut self, aspect: f32) {
        self.aspect_ratio = Some(aspect);
    }

    /// Node this camera is attached to
    pub fn node(&self) -> Option<NodeKey> {
        self.node
    }
}

/// Light source type
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LightKind {
    #[default]
    Point,
    Directional,
}

/// Light source
///
/// A light carries its own position which is relative to the node it is
/// attached to, or to the world origin when unattached.
#[derive(Clone, Debug)]
pub struct Light {
    name: String,
    pub kind: LightKind,
    pub position: Vec3,
    pub diffuse: ColourValue,
    pub specular: ColourValue,
    pub(crate) node: Option<NodeKey>,
}

impl Light {
    pub(crate) fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: LightKind::Point,
            position: Vec3::ZERO,
            diffuse: ColourValue::WHITE,
            specular: ColourValue::BLACK,
            node: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    pub fn node(&self) -> Option<NodeKey> {
        self.node
    }
}

/// Visible instance of a mesh resource
#[derive(Clone, Debug)]
pub struct Entity {
    name: String,
    mesh: String,
    source: PathBuf,
    pub visible: bool,
    pub(crate) node: Option<NodeKey>,
}

impl Entity {
    pub(crate) fn new(name: &str, mesh: &str, source: PathBuf) -> Self {
        Self {
            name: name.to_string(),
            mesh: mesh.to_string(),
            source,
            visible: true,
            node: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Mesh resource name this entity was created from
    pub fn mesh(&self) -> &str {
        &self.mesh
    }

    /// Path the mesh resource resolved to
    pub fn source(&self) -> &std::path::Path {
        &self.source
    }

    pub fn node(&self) -> Option<NodeKey> {
        self.node
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camera_defaults() {
        let cam = Camera::new("cam");
        assert_eq!(cam.name(), "cam");
        assert_eq!(cam.near_clip_distance(), Camera::DEFAULT_NEAR_CLIP);
        assert_eq!(cam.far_clip_distance(), Camera::DEFAULT_FAR_CLIP);
        assert_eq!(cam.fov_y(), Degree(45.0));
        assert!(cam.node().is_none());
    }

    #[test]
    fn test_near_clip_validation() {
        let mut cam = Camera::new("cam");
        assert!(cam.set_near_clip_distance(0.1).is_ok());
        assert_eq!(cam.near_clip_distance(), 0.1);

        assert!(cam.set_near_clip_distance(0.0).is_err());
        assert!(cam.set_near_clip_distance(-1.0).is_err());
        assert!(cam.set_near_clip_distance(f32::NAN).is_err());
        assert!(cam.set_near_clip_distance(Camera::DEFAULT_FAR_CLIP).is_err());
        // Rejected values leave the old one in place
        assert_eq!(cam.near_clip_distance(), 0.1);
    }

    #[test]
    fn test_far_clip_must_exceed_near() {
        let mut cam = Camera::new("cam");
        assert!(cam.set_far_clip_distance(50.0).is_err());
        assert!(cam.set_far_clip_distance(500.0).is_ok());
    }

    #[test]
    fn test_light_defaults() {
        let light = Light::new("light");
        assert_eq!(light.kind, LightKind::Point);
        assert_eq!(light.position, Vec3::ZERO);
        assert_eq!(light.diffuse, ColourValue::WHITE);
    }

    #[test]
    fn test_object_ref_display() {
        assert_eq!(ObjectRef::entity("cube").to_string(), "entity 'cube'");
        assert_eq!(ObjectRef::light("sun").to_string(), "light 'sun'");
    }
}
