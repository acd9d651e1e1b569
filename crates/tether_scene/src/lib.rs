//! Scene and resource types for the Tether engine
//!
//! This crate provides the CPU-side half of the engine:
//!
//! - [`SceneManager`] - Owns the scene node graph and every scene object
//! - [`SceneNode`] / [`NodeKey`] - Positionable nodes with derived transforms
//! - [`Camera`], [`Light`], [`Entity`] - Objects attached to scene nodes
//! - [`ResourceGroupManager`] - Named groups of resource search locations
//! - [`ResourceConfig`] - Parser for resource configuration files

mod error;
mod node;
mod objects;
mod scene_manager;
pub mod resource;

pub use error::{SceneError, ResourceError};
pub use node::{SceneNode, NodeKey, DirtyFlags, DerivedTransform};
pub use objects::{Camera, Light, LightKind, Entity, ObjectKind, ObjectRef};
pub use scene_manager::SceneManager;
pub use resource::{
    ResourceConfig, ConfigSection, ResourceGroupManager, ResourceLocation, LocationKind,
    register_resource_locations, DEFAULT_GROUP,
};

// Re-export commonly used types from tether_math for convenience
pub use tether_math::{Vec3, Quaternion, Degree, Radian, ColourValue};
