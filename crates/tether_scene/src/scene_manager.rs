//! Scene manager
//!
//! The SceneManager owns one scene: the node tree and every camera, light
//! and entity in it.
//!
//! # Example
//! ```ignore
//! let mut scene = SceneManager::new("main");
//! let node = scene.create_child_node(scene.root())?;
//! let cam = scene.create_camera("cam")?;
//! scene.attach_object(node, &cam)?;
//! scene.update_transforms();
//! ```

use std::collections::HashMap;

use slotmap::SlotMap;
use tether_math::ColourValue;

use crate::node::{DerivedTransform, DirtyFlags, NodeKey, SceneNode};
use crate::objects::{Camera, Entity, Light, ObjectKind, ObjectRef};
use crate::{ResourceGroupManager, SceneError};

/// Owns a scene graph and its movable objects
pub struct SceneManager {
    name: String,
    nodes: SlotMap<NodeKey, SceneNode>,
    root: NodeKey,
    cameras: HashMap<String, Camera>,
    lights: HashMap<String, Light>,
    entities: HashMap<String, Entity>,
    /// Ambient light colour for the whole scene
    pub ambient_light: ColourValue,
}

impl SceneManager {
    /// Create an empty scene with just a root node
    pub fn new(name: impl Into<String>) -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(SceneNode::new(None));
        Self {
            name: name.into(),
            nodes,
            root,
            cameras: HashMap::new(),
            lights: HashMap::new(),
            entities: HashMap::new(),
            ambient_light: ColourValue::BLACK,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    // --- Nodes ---

    /// Key of the root scene node
    pub fn root(&self) -> NodeKey {
        self.root
    }

    /// Create a node as a child of `parent`
    pub fn create_child_node(&mut self, parent: NodeKey) -> Result<NodeKey, SceneError> {
        if !self.nodes.contains_key(parent) {
            return Err(SceneError::UnknownNode);
        }
        let child = self.nodes.insert(SceneNode::new(Some(parent)));
        self.nodes[parent].children.push(child);
        Ok(child)
    }

    pub fn node(&self, key: NodeKey) -> Option<&SceneNode> {
        self.nodes.get(key)
    }

    pub fn node_mut(&mut self, key: NodeKey) -> Option<&mut SceneNode> {
        self.nodes.get_mut(key)
    }

    /// Number of nodes including the root
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    // --- Objects ---

    /// Create a camera with default settings
    pub fn create_camera(&mut self, name: &str) -> Result<ObjectRef, SceneError> {
        let obj = ObjectRef::camera(name);
        if self.cameras.contains_key(name) {
            return Err(SceneError::DuplicateName(obj));
        }
        self.cameras.insert(name.to_string(), Camera::new(name));
        log::debug!("Scene '{}': created {}", self.name, obj);
        Ok(obj)
    }

    /// Create a point light at the origin
    pub fn create_light(&mut self, name: &str) -> Result<ObjectRef, SceneError> {
        let obj = ObjectRef::light(name);
        if self.lights.contains_key(name) {
            return Err(SceneError::DuplicateName(obj));
        }
        self.lights.insert(name.to_string(), Light::new(name));
        log::debug!("Scene '{}': created {}", self.name, obj);
        Ok(obj)
    }

    /// Create an entity from a mesh resource
    ///
    /// The mesh must resolve through `resources`; a missing or unindexed mesh
    /// fails without creating anything.
    pub fn create_entity(
        &mut self,
        name: &str,
        mesh: &str,
        resources: &ResourceGroupManager,
    ) -> Result<ObjectRef, SceneError> {
        let obj = ObjectRef::entity(name);
        if self.entities.contains_key(name) {
            return Err(SceneError::DuplicateName(obj));
        }
        let source = resources.find_resource(mesh)?.to_path_buf();
        self.entities
            .insert(name.to_string(), Entity::new(name, mesh, source));
        log::debug!("Scene '{}': created {} from '{}'", self.name, obj, mesh);
        Ok(obj)
    }

    pub fn camera(&self, name: &str) -> Option<&Camera> {
        self.cameras.get(name)
    }

    pub fn camera_mut(&mut self, name: &str) -> Option<&mut Camera> {
        self.cameras.get_mut(name)
    }

    pub fn light(&self, name: &str) -> Option<&Light> {
        self.lights.get(name)
    }

    pub fn light_mut(&mut self, name: &str) -> Option<&mut Light> {
        self.lights.get_mut(name)
    }

    pub fn entity(&self, name: &str) -> Option<&Entity> {
        self.entities.get(name)
    }

    pub fn entity_mut(&mut self, name: &str) -> Option<&mut Entity> {
        self.entities.get_mut(name)
    }

    pub fn camera_count(&self) -> usize {
        self.cameras.len()
    }

    pub fn light_count(&self) -> usize {
        self.lights.len()
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    fn object_node_slot(&mut self, obj: &ObjectRef) -> Option<&mut Option<NodeKey>> {
        match obj.kind {
            ObjectKind::Camera => self.cameras.get_mut(&obj.name).map(|c| &mut c.node),
            ObjectKind::Light => self.lights.get_mut(&obj.name).map(|l| &mut l.node),
            ObjectKind::Entity => self.entities.get_mut(&obj.name).map(|e| &mut e.node),
        }
    }

    /// Attach an object to a node; an object lives on at most one node
    pub fn attach_object(&mut self, node: NodeKey, obj: &ObjectRef) -> Result<(), SceneError> {
        if !self.nodes.contains_key(node) {
            return Err(SceneError::UnknownNode);
        }
        let slot = self
            .object_node_slot(obj)
            .ok_or_else(|| SceneError::UnknownObject(obj.clone()))?;
        if slot.is_some() {
            return Err(SceneError::AlreadyAttached(obj.clone()));
        }
        *slot = Some(node);

        let target = &mut self.nodes[node];
        target.attached.push(obj.clone());
        target.dirty |= DirtyFlags::ATTACHMENTS;
        Ok(())
    }

    /// Detach an object from whatever node holds it; returns that node
    pub fn detach_object(&mut self, obj: &ObjectRef) -> Result<Option<NodeKey>, SceneError> {
        let slot = self
            .object_node_slot(obj)
            .ok_or_else(|| SceneError::UnknownObject(obj.clone()))?;
        let Some(node) = slot.take() else {
            return Ok(None);
        };
        if let Some(n) = self.nodes.get_mut(node) {
            n.attached.retain(|o| o != obj);
            n.dirty |= DirtyFlags::ATTACHMENTS;
        }
        Ok(Some(node))
    }

    // --- Update ---

    /// Recompute derived transforms for dirty nodes and their descendants
    ///
    /// Returns the number of nodes whose derived transform was recomputed.
    pub fn update_transforms(&mut self) -> usize {
        let mut updated = 0;
        let mut stack = vec![(self.root, DerivedTransform::default(), false)];

        while let Some((key, parent, parent_changed)) = stack.pop() {
            let node = &mut self.nodes[key];
            let changed = parent_changed || node.dirty.contains(DirtyFlags::TRANSFORM);
            if changed {
                node.derived = parent.compose(node.position(), node.orientation(), node.scale());
                updated += 1;
            }
            node.dirty = DirtyFlags::NONE;

            let derived = node.derived;
            for &child in &node.children {
                stack.push((child, derived, changed));
            }
        }
        updated
    }

    /// Entities that are visible and attached to a node
    pub fn visible_entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities
            .values()
            .filter(|e| e.visible && e.node.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ResourceError;
    use tether_math::{Degree, Quaternion, Vec3};

    #[test]
    fn test_new_scene_has_root_only() {
        let scene = SceneManager::new("main");
        assert_eq!(scene.node_count(), 1);
        assert!(scene.node(scene.root()).unwrap().parent().is_none());
        assert_eq!(scene.camera_count(), 0);
    }

    #[test]
    fn test_child_nodes_link_to_parent() {
        let mut scene = SceneManager::new("main");
        let a = scene.create_child_node(scene.root()).unwrap();
        let b = scene.create_child_node(a).unwrap();

        assert_eq!(scene.node(b).unwrap().parent(), Some(a));
        assert_eq!(scene.node(a).unwrap().children(), &[b]);
        assert_eq!(scene.node_count(), 3);
    }

    #[test]
    fn test_duplicate_names_per_kind() {
        let mut scene = SceneManager::new("main");
        scene.create_camera("main").unwrap();
        assert!(matches!(
            scene.create_camera("main"),
            Err(SceneError::DuplicateName(_))
        ));
        // Different kinds don't collide
        assert!(scene.create_light("main").is_ok());
    }

    #[test]
    fn test_attach_camera_to_node() {
        let mut scene = SceneManager::new("main");
        let node = scene.create_child_node(scene.root()).unwrap();
        let cam = scene.create_camera("cam").unwrap();

        scene.attach_object(node, &cam).unwrap();
        assert_eq!(scene.camera("cam").unwrap().node(), Some(node));
        assert_eq!(scene.node(node).unwrap().attached_objects(), &[cam.clone()]);

        // A second attach is rejected
        let other = scene.create_child_node(scene.root()).unwrap();
        assert!(matches!(
            scene.attach_object(other, &cam),
            Err(SceneError::AlreadyAttached(_))
        ));
    }

    #[test]
    fn test_attach_unknown_object() {
        let mut scene = SceneManager::new("main");
        let root = scene.root();
        let err = scene.attach_object(root, &ObjectRef::light("ghost")).unwrap_err();
        assert!(matches!(err, SceneError::UnknownObject(_)));
    }

    #[test]
    fn test_detach_then_reattach() {
        let mut scene = SceneManager::new("main");
        let a = scene.create_child_node(scene.root()).unwrap();
        let b = scene.create_child_node(scene.root()).unwrap();
        let light = scene.create_light("light").unwrap();

        scene.attach_object(a, &light).unwrap();
        assert_eq!(scene.detach_object(&light).unwrap(), Some(a));
        assert!(scene.node(a).unwrap().attached_objects().is_empty());
        assert_eq!(scene.detach_object(&light).unwrap(), None);

        scene.attach_object(b, &light).unwrap();
        assert_eq!(scene.light("light").unwrap().node(), Some(b));
    }

    #[test]
    fn test_entity_requires_resource() {
        let mut scene = SceneManager::new("main");
        let resources = ResourceGroupManager::new();

        let err = scene.create_entity("cube", "cube.mesh", &resources).unwrap_err();
        assert!(matches!(err, SceneError::Resource(ResourceError::NotFound(_))));
        assert_eq!(scene.entity_count(), 0);
    }

    #[test]
    fn test_derived_transforms_follow_parent() {
        let mut scene = SceneManager::new("main");
        let parent = scene.create_child_node(scene.root()).unwrap();
        let child = scene.create_child_node(parent).unwrap();

        scene.node_mut(parent).unwrap().set_position(Vec3::new(0.0, 0.0, 5.0));
        scene
            .node_mut(parent)
            .unwrap()
            .set_orientation(Quaternion::from_angle_axis(Degree(90.0), Vec3::Y));
        scene.node_mut(child).unwrap().set_position(Vec3::X);

        assert_eq!(scene.update_transforms(), 3);
        let derived = scene.node(child).unwrap().derived();
        assert!(derived.position.approx_eq(Vec3::new(0.0, 0.0, 4.0), 1e-5));
    }

    #[test]
    fn test_update_only_touches_dirty_subtrees() {
        let mut scene = SceneManager::new("main");
        let a = scene.create_child_node(scene.root()).unwrap();
        let _b = scene.create_child_node(scene.root()).unwrap();
        let a_child = scene.create_child_node(a).unwrap();
        scene.update_transforms();

        scene.node_mut(a).unwrap().translate(Vec3::Y);
        // a and its child, not b or the root
        assert_eq!(scene.update_transforms(), 2);
        assert!(!scene.node(a_child).unwrap().is_dirty());
        assert_eq!(scene.update_transforms(), 0);
    }
}
