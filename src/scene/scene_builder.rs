//! SceneBuilder - Scene population from configuration
//!
//! Fills one scene manager with the objects the display loop shows: resource
//! locations first, then the camera on its own node, an optional light and an
//! optional mesh entity on a rotated node.

use tether_math::{Degree, Quaternion, Vec3};
use tether_scene::{
    register_resource_locations, ObjectRef, ResourceConfig, ResourceGroupManager, SceneError,
    SceneManager,
};

use crate::config::{CameraConfig, LightConfig, MeshConfig, SceneConfig};

/// What the builder put into the scene
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopulatedScene {
    /// Camera the viewport should look through
    pub camera: String,
    /// Resource locations registered before any object was created
    pub registered_locations: usize,
    pub light: Option<ObjectRef>,
    pub entity: Option<ObjectRef>,
}

/// Builder for populating a scene manager
///
/// # Example
/// ```ignore
/// let populated = SceneBuilder::new(scene, resources)
///     .with_resource_config(&ResourceConfig::load("resources.cfg")?)?
///     .add_camera(&CameraConfig::default())?
///     .add_light(&LightConfig::default())?
///     .add_mesh(&MeshConfig::default())?
///     .build()?;
/// ```
pub struct SceneBuilder<'a> {
    scene: &'a mut SceneManager,
    resources: &'a mut ResourceGroupManager,
    camera: Option<String>,
    registered_locations: usize,
    light: Option<ObjectRef>,
    entity: Option<ObjectRef>,
}

impl<'a> SceneBuilder<'a> {
    pub fn new(scene: &'a mut SceneManager, resources: &'a mut ResourceGroupManager) -> Self {
        Self {
            scene,
            resources,
            camera: None,
            registered_locations: 0,
            light: None,
            entity: None,
        }
    }

    /// Register every location of `config`, then initialise all groups
    pub fn with_resource_config(mut self, config: &ResourceConfig) -> Result<Self, SceneError> {
        self.registered_locations += register_resource_locations(config, self.resources)?;
        self.resources.initialise_all_groups()?;
        Ok(self)
    }

    /// Create the camera on a child node of the root
    pub fn add_camera(mut self, config: &CameraConfig) -> Result<Self, SceneError> {
        let root = self.scene.root();
        let node = self.scene.create_child_node(root)?;
        if let Some(scene_node) = self.scene.node_mut(node) {
            scene_node.set_position(config.position());
        }

        let camera = self.scene.create_camera(&config.name)?;
        if let Some(near) = config.near_clip {
            if let Some(cam) = self.scene.camera_mut(&config.name) {
                cam.set_near_clip_distance(near)?;
            }
        }
        self.scene.attach_object(node, &camera)?;

        self.camera = Some(config.name.clone());
        Ok(self)
    }

    /// Create an unattached point light
    pub fn add_light(mut self, config: &LightConfig) -> Result<Self, SceneError> {
        let light = self.scene.create_light(&config.name)?;
        if let Some(l) = self.scene.light_mut(&config.name) {
            l.set_position(Vec3::from(config.position));
        }
        self.light = Some(light);
        Ok(self)
    }

    /// Create the mesh entity and attach it to a rotated child node
    ///
    /// The mesh is resolved before the node exists, so a missing mesh leaves
    /// the node graph untouched.
    pub fn add_mesh(mut self, config: &MeshConfig) -> Result<Self, SceneError> {
        let entity = self
            .scene
            .create_entity(&config.entity, &config.mesh, self.resources)?;

        let root = self.scene.root();
        let node = self.scene.create_child_node(root)?;
        if let Some(scene_node) = self.scene.node_mut(node) {
            scene_node.set_orientation(Quaternion::from_angle_axis(
                Degree(config.angle),
                Vec3::from(config.axis),
            ));
        }
        self.scene.attach_object(node, &entity)?;

        self.entity = Some(entity);
        Ok(self)
    }

    /// Finish; a camera is required
    pub fn build(self) -> Result<PopulatedScene, SceneError> {
        let camera = self
            .camera
            .ok_or_else(|| SceneError::UnknownObject(ObjectRef::camera("")))?;
        log::info!(
            "Scene '{}' populated: {} nodes, {} cameras, {} lights, {} entities",
            self.scene.name(),
            self.scene.node_count(),
            self.scene.camera_count(),
            self.scene.light_count(),
            self.scene.entity_count()
        );
        Ok(PopulatedScene {
            camera,
            registered_locations: self.registered_locations,
            light: self.light,
            entity: self.entity,
        })
    }
}

/// Populate a scene the way `config` describes
///
/// `resources` in the configuration is read as a resource configuration file
/// and registered before any scene object is created.
pub fn populate_scene(
    scene: &mut SceneManager,
    resources: &mut ResourceGroupManager,
    config: &SceneConfig,
) -> Result<PopulatedScene, SceneError> {
    let mut builder = SceneBuilder::new(scene, resources);

    if let Some(path) = &config.resources {
        let resource_config = ResourceConfig::load(path)?;
        builder = builder.with_resource_config(&resource_config)?;
    }

    builder = builder.add_camera(&config.camera)?;

    if let Some(light) = &config.light {
        builder = builder.add_light(light)?;
    }
    if let Some(mesh) = &config.mesh {
        builder = builder.add_mesh(mesh)?;
    }

    builder.build()
}
