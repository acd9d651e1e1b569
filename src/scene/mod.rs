//! Scene construction utilities
//!
//! This module fills a scene manager from the `[scene]` configuration.

mod scene_builder;

pub use scene_builder::{populate_scene, PopulatedScene, SceneBuilder};
