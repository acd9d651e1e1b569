//! Scene nodes
//!
//! Nodes form a tree rooted at the scene manager's root node. Each node has a
//! local transform relative to its parent and a cached derived (world)
//! transform that the scene manager refreshes on update.

use bitflags::bitflags;
use slotmap::new_key_type;
use tether_math::{Quaternion, Vec3};

use crate::ObjectRef;

new_key_type! {
    /// Generational key to a node in a scene manager
    pub struct NodeKey;
}

bitflags! {
    /// Flags indicating which parts of a node changed since the last update
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct DirtyFlags: u8 {
        /// No changes
        const NONE = 0;
        /// Local position, orientation or scale changed
        const TRANSFORM = 1 << 0;
        /// Objects were attached or detached
        const ATTACHMENTS = 1 << 1;
        const ALL = Self::TRANSFORM.bits() | Self::ATTACHMENTS.bits();
    }
}

/// World-space transform of a node
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DerivedTransform {
    pub position: Vec3,
    pub orientation: Quaternion,
    pub scale: Vec3,
}

impl Default for DerivedTransform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            orientation: Quaternion::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl DerivedTransform {
    /// Combine a parent's derived transform with a child's local transform
    pub fn compose(&self, position: Vec3, orientation: Quaternion, scale: Vec3) -> Self {
        Self {
            position: self.position + self.orientation.rotate(self.scale.component_mul(position)),
            orientation: (self.orientation * orientation).normalized(),
            scale: self.scale.component_mul(scale),
        }
    }
}

/// A positionable node in the scene graph
#[derive(Clone, Debug)]
pub struct SceneNode {
    pub(crate) parent: Option<NodeKey>,
    pub(crate) children: Vec<NodeKey>,
    position: Vec3,
    orientation: Quaternion,
    scale: Vec3,
    pub(crate) attached: Vec<ObjectRef>,
    pub(crate) derived: DerivedTransform,
    pub(crate) dirty: DirtyFlags,
}

impl SceneNode {
    pub(crate) fn new(parent: Option<NodeKey>) -> Self {
        Self {
            parent,
            children: Vec::new(),
            position: Vec3::ZERO,
            orientation: Quaternion::IDENTITY,
            scale: Vec3::ONE,
            attached: Vec::new(),
            derived: DerivedTransform::default(),
            dirty: DirtyFlags::ALL,
        }
    }

    pub fn parent(&self) -> Option<NodeKey> {
        self.parent
    }

    pub fn children(&self) -> &[NodeKey] {
        &self.children
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.dirty |= DirtyFlags::TRANSFORM;
    }

    /// Move relative to the parent
    pub fn translate(&mut self, offset: Vec3) {
        self.position += offset;
        self.dirty |= DirtyFlags::TRANSFORM;
    }

    pub fn orientation(&self) -> Quaternion {
        self.orientation
    }

    /// Set the local orientation; the quaternion is normalized
    pub fn set_orientation(&mut self, orientation: Quaternion) {
        self.orientation = orientation.normalized();
        self.dirty |= DirtyFlags::TRANSFORM;
    }

    /// Rotate relative to the current local orientation
    pub fn rotate(&mut self, rotation: Quaternion) {
        self.orientation = (self.orientation * rotation).normalized();
        self.dirty |= DirtyFlags::TRANSFORM;
    }

    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    pub fn set_scale(&mut self, scale: Vec3) {
        self.scale = scale;
        self.dirty |= DirtyFlags::TRANSFORM;
    }

    /// Objects attached to this node
    pub fn attached_objects(&self) -> &[ObjectRef] {
        &self.attached
    }

    /// World transform as of the last scene update
    pub fn derived(&self) -> &DerivedTransform {
        &self.derived
    }

    pub fn dirty_flags(&self) -> DirtyFlags {
        self.dirty
    }

    pub fn is_dirty(&self) -> bool {
        !self.dirty.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tether_math::Degree;

    #[test]
    fn test_new_node_is_dirty() {
        let node = SceneNode::new(None);
        assert!(node.is_dirty());
        assert_eq!(node.position(), Vec3::ZERO);
        assert_eq!(node.scale(), Vec3::ONE);
    }

    #[test]
    fn test_setters_mark_transform_dirty() {
        let mut node = SceneNode::new(None);
        node.dirty = DirtyFlags::NONE;

        node.set_position(Vec3::new(0.0, 0.0, 5.0));
        assert!(node.dirty_flags().contains(DirtyFlags::TRANSFORM));
        assert!(!node.dirty_flags().contains(DirtyFlags::ATTACHMENTS));
    }

    #[test]
    fn test_set_orientation_normalizes() {
        let mut node = SceneNode::new(None);
        node.set_orientation(Quaternion::new(2.0, 0.0, 0.0, 0.0));
        assert_eq!(node.orientation(), Quaternion::IDENTITY);
    }

    #[test]
    fn test_compose_translates_through_parent_rotation() {
        let parent = DerivedTransform {
            position: Vec3::new(1.0, 0.0, 0.0),
            orientation: Quaternion::from_angle_axis(Degree(90.0), Vec3::Y),
            scale: Vec3::ONE,
        };
        let child = parent.compose(Vec3::X, Quaternion::IDENTITY, Vec3::ONE);
        assert!(child.position.approx_eq(Vec3::new(1.0, 0.0, -1.0), 1e-5));
    }

    #[test]
    fn test_compose_scales_child_offset() {
        let parent = DerivedTransform {
            scale: Vec3::new(2.0, 2.0, 2.0),
            ..DerivedTransform::default()
        };
        let child = parent.compose(Vec3::new(0.0, 1.0, 0.0), Quaternion::IDENTITY, Vec3::ONE);
        assert!(child.position.approx_eq(Vec3::new(0.0, 2.0, 0.0), 1e-6));
        assert_eq!(child.scale, Vec3::new(2.0, 2.0, 2.0));
    }
}
