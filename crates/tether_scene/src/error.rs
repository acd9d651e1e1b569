//! Scene and resource error types

use std::fmt;
use std::io;
use std::path::PathBuf;

use crate::ObjectRef;

/// Error type for resource location, indexing and lookup
#[derive(Debug)]
pub enum ResourceError {
    /// IO error while reading a configuration file or a location
    Io { path: PathBuf, source: io::Error },
    /// Location type not understood by the resource system
    UnknownLocationType(String),
    /// A file-system location does not exist or is not a directory
    LocationMissing(PathBuf),
    /// Lookup attempted while a group holding locations is not initialised
    NotInitialised(String),
    /// Resource not present in any initialised group
    NotFound(String),
}

impl fmt::Display for ResourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceError::Io { path, source } => {
                write!(f, "Resource IO error at {}: {}", path.display(), source)
            }
            ResourceError::UnknownLocationType(kind) => {
                write!(f, "Unknown resource location type: {}", kind)
            }
            ResourceError::LocationMissing(path) => {
                write!(f, "Resource location not found: {}", path.display())
            }
            ResourceError::NotInitialised(name) => {
                write!(f, "Resource groups not initialised while resolving: {}", name)
            }
            ResourceError::NotFound(name) => write!(f, "Resource not found: {}", name),
        }
    }
}

impl std::error::Error for ResourceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ResourceError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Error type for scene graph operations
#[derive(Debug)]
pub enum SceneError {
    /// An object of the same kind already uses this name
    DuplicateName(ObjectRef),
    /// No object with this kind and name exists
    UnknownObject(ObjectRef),
    /// The node key does not belong to this scene manager
    UnknownNode,
    /// The object is already attached to a node
    AlreadyAttached(ObjectRef),
    /// Camera clip distances must be positive and near < far
    InvalidClipDistance { near: f32, far: f32 },
    /// A resource needed by a scene object could not be resolved
    Resource(ResourceError),
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneError::DuplicateName(obj) => write!(f, "Duplicate {}", obj),
            SceneError::UnknownObject(obj) => write!(f, "Unknown {}", obj),
            SceneError::UnknownNode => write!(f, "Unknown scene node"),
            SceneError::AlreadyAttached(obj) => write!(f, "{} is already attached", obj),
            SceneError::InvalidClipDistance { near, far } => {
                write!(f, "Invalid clip distances: near {} far {}", near, far)
            }
            SceneError::Resource(err) => write!(f, "Scene resource error: {}", err),
        }
    }
}

impl std::error::Error for SceneError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SceneError::Resource(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ResourceError> for SceneError {
    fn from(err: ResourceError) -> Self {
        SceneError::Resource(err)
    }
}
