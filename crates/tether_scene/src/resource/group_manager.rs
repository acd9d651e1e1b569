//! Resource group manager
//!
//! Groups hold search locations. Initialising a group indexes the files found
//! in its locations so resources can later be resolved by plain name.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::ResourceError;

/// Group used for locations registered without an explicit group
pub const DEFAULT_GROUP: &str = "General";

/// Type of a resource location
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LocationKind {
    /// Plain directory; indexed non-recursively
    FileSystem,
    /// Zip archive; registered but not indexed
    Zip,
}

impl FromStr for LocationKind {
    type Err = ResourceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "FileSystem" => Ok(LocationKind::FileSystem),
            "Zip" => Ok(LocationKind::Zip),
            other => Err(ResourceError::UnknownLocationType(other.to_string())),
        }
    }
}

impl fmt::Display for LocationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocationKind::FileSystem => f.write_str("FileSystem"),
            LocationKind::Zip => f.write_str("Zip"),
        }
    }
}

/// A registered search location
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResourceLocation {
    pub path: PathBuf,
    pub kind: LocationKind,
}

#[derive(Debug, Default)]
struct ResourceGroup {
    locations: Vec<ResourceLocation>,
    /// Resource name -> file path, filled on initialisation
    index: BTreeMap<String, PathBuf>,
    initialised: bool,
}

impl ResourceGroup {
    fn initialise(&mut self, name: &str) -> Result<usize, ResourceError> {
        self.index.clear();
        for location in &self.locations {
            match location.kind {
                LocationKind::FileSystem => index_directory(&location.path, &mut self.index)?,
                LocationKind::Zip => {
                    log::warn!(
                        "Group '{}': zip archive {} is registered but not indexed",
                        name,
                        location.path.display()
                    );
                }
            }
        }
        self.initialised = true;
        log::debug!("Group '{}' initialised with {} resources", name, self.index.len());
        Ok(self.index.len())
    }
}

fn index_directory(dir: &Path, index: &mut BTreeMap<String, PathBuf>) -> Result<(), ResourceError> {
    if !dir.is_dir() {
        return Err(ResourceError::LocationMissing(dir.to_path_buf()));
    }
    let io_err = |source| ResourceError::Io { path: dir.to_path_buf(), source };

    for entry in fs::read_dir(dir).map_err(io_err)? {
        let entry = entry.map_err(io_err)?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if index.contains_key(name) {
            log::warn!("Resource '{}' found twice; keeping the first location", name);
            continue;
        }
        index.insert(name.to_string(), path.clone());
    }
    Ok(())
}

/// Owns every resource group of an engine instance
#[derive(Debug, Default)]
pub struct ResourceGroupManager {
    groups: BTreeMap<String, ResourceGroup>,
}

impl ResourceGroupManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a location in `group`, creating the group if needed
    ///
    /// Adding to an initialised group marks it uninitialised again.
    pub fn add_resource_location(&mut self, path: impl Into<PathBuf>, kind: LocationKind, group: &str) {
        let path = path.into();
        log::debug!("Adding {} location {} to group '{}'", kind, path.display(), group);
        let entry = self.groups.entry(group.to_string()).or_default();
        entry.locations.push(ResourceLocation { path, kind });
        entry.initialised = false;
    }

    /// Register a location whose type is given by name (`FileSystem`, `Zip`)
    pub fn add_resource_location_typed(
        &mut self,
        path: impl Into<PathBuf>,
        location_type: &str,
        group: &str,
    ) -> Result<(), ResourceError> {
        let kind = location_type.parse()?;
        self.add_resource_location(path, kind, group);
        Ok(())
    }

    /// Index every group that is not yet initialised
    ///
    /// Returns the number of resources indexed across those groups.
    pub fn initialise_all_groups(&mut self) -> Result<usize, ResourceError> {
        let mut total = 0;
        for (name, group) in self.groups.iter_mut().filter(|(_, g)| !g.initialised) {
            total += group.initialise(name)?;
        }
        log::info!(
            "Initialised {} resource groups ({} new resources)",
            self.groups.len(),
            total
        );
        Ok(total)
    }

    /// Resolve a resource name to the file it was indexed from
    pub fn find_resource(&self, name: &str) -> Result<&Path, ResourceError> {
        let found = self
            .groups
            .values()
            .filter(|g| g.initialised)
            .find_map(|g| g.index.get(name));

        match found {
            Some(path) => Ok(path.as_path()),
            None if self.groups.values().any(|g| !g.initialised) => {
                Err(ResourceError::NotInitialised(name.to_string()))
            }
            None => Err(ResourceError::NotFound(name.to_string())),
        }
    }

    pub fn resource_exists(&self, name: &str) -> bool {
        self.find_resource(name).is_ok()
    }

    /// Whether every group has been initialised (true when there are none)
    pub fn is_initialised(&self) -> bool {
        self.groups.values().all(|g| g.initialised)
    }

    /// Number of registered locations across all groups
    pub fn location_count(&self) -> usize {
        self.groups.values().map(|g| g.locations.len()).sum()
    }

    /// Number of indexed resources across initialised groups
    pub fn resource_count(&self) -> usize {
        self.groups.values().map(|g| g.index.len()).sum()
    }

    /// Group names in sorted order
    pub fn group_names(&self) -> Vec<&str> {
        self.groups.keys().map(String::as_str).collect()
    }

    /// Locations registered in `group`
    pub fn locations(&self, group: &str) -> &[ResourceLocation] {
        self.groups
            .get(group)
            .map(|g| g.locations.as_slice())
            .unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Scratch directory removed on drop
    struct ScratchDir(PathBuf);

    impl ScratchDir {
        fn new(tag: &str) -> Self {
            let dir = std::env::temp_dir()
                .join(format!("tether_resources_{}_{}", tag, std::process::id()));
            let _ = fs::remove_dir_all(&dir);
            fs::create_dir_all(&dir).unwrap();
            Self(dir)
        }

        fn touch(&self, name: &str) {
            fs::write(self.0.join(name), b"").unwrap();
        }
    }

    impl Drop for ScratchDir {
        fn drop(&mut self) {
            let _ = fs::remove_dir_all(&self.0);
        }
    }

    #[test]
    fn test_location_kind_parsing() {
        assert_eq!("FileSystem".parse::<LocationKind>().unwrap(), LocationKind::FileSystem);
        assert_eq!("Zip".parse::<LocationKind>().unwrap(), LocationKind::Zip);
        assert!("filesystem".parse::<LocationKind>().is_err());
    }

    #[test]
    fn test_find_after_initialise() {
        let dir = ScratchDir::new("find");
        dir.touch("cube.mesh");
        dir.touch("cube.material");

        let mut resources = ResourceGroupManager::new();
        resources.add_resource_location(&dir.0, LocationKind::FileSystem, DEFAULT_GROUP);
        assert_eq!(resources.initialise_all_groups().unwrap(), 2);

        let path = resources.find_resource("cube.mesh").unwrap();
        assert_eq!(path, dir.0.join("cube.mesh"));
        assert_eq!(resources.resource_count(), 2);
    }

    #[test]
    fn test_find_before_initialise() {
        let dir = ScratchDir::new("early");
        dir.touch("cube.mesh");

        let mut resources = ResourceGroupManager::new();
        resources.add_resource_location(&dir.0, LocationKind::FileSystem, DEFAULT_GROUP);
        assert!(!resources.is_initialised());

        let err = resources.find_resource("cube.mesh").unwrap_err();
        assert!(matches!(err, ResourceError::NotInitialised(_)));
    }

    #[test]
    fn test_empty_manager_reports_not_found() {
        let resources = ResourceGroupManager::new();
        assert!(resources.is_initialised());
        let err = resources.find_resource("cube.mesh").unwrap_err();
        assert!(matches!(err, ResourceError::NotFound(name) if name == "cube.mesh"));
    }

    #[test]
    fn test_missing_directory_fails_initialise() {
        let mut resources = ResourceGroupManager::new();
        resources.add_resource_location("no/such/dir", LocationKind::FileSystem, DEFAULT_GROUP);
        let err = resources.initialise_all_groups().unwrap_err();
        assert!(matches!(err, ResourceError::LocationMissing(_)));
    }

    #[test]
    fn test_zip_location_is_skipped() {
        let mut resources = ResourceGroupManager::new();
        resources.add_resource_location("packs/extra.zip", LocationKind::Zip, "Packs");
        assert_eq!(resources.initialise_all_groups().unwrap(), 0);
        assert!(resources.is_initialised());
        assert_eq!(resources.locations("Packs").len(), 1);
    }

    #[test]
    fn test_adding_location_resets_initialisation() {
        let dir = ScratchDir::new("reset");
        let mut resources = ResourceGroupManager::new();
        resources.add_resource_location(&dir.0, LocationKind::FileSystem, DEFAULT_GROUP);
        resources.initialise_all_groups().unwrap();
        assert!(resources.is_initialised());

        resources.add_resource_location(&dir.0, LocationKind::FileSystem, DEFAULT_GROUP);
        assert!(!resources.is_initialised());
    }
}
