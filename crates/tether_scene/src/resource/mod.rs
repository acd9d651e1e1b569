//! Resource locations and resource configuration files
//!
//! Resources are found by name inside *locations* (directories or archives)
//! grouped into named *resource groups*. A [`ResourceConfig`] file lists the
//! locations to register.

mod config_file;
mod group_manager;

pub use config_file::{ResourceConfig, ConfigSection};
pub use group_manager::{ResourceGroupManager, ResourceLocation, LocationKind, DEFAULT_GROUP};

/// Register every setting of `config` as a resource location
///
/// Each `type=path` setting becomes one location in [`DEFAULT_GROUP`],
/// whatever section it appears in. Returns the number of locations
/// registered. Stops at the first unknown location type.
pub fn register_resource_locations(
    config: &ResourceConfig,
    resources: &mut ResourceGroupManager,
) -> Result<usize, crate::ResourceError> {
    let mut registered = 0;
    for section in config.sections() {
        log::debug!(
            "Registering {} locations from section '{}'",
            section.len(),
            section.name()
        );
        for (location_type, path) in section.settings() {
            resources.add_resource_location_typed(path, location_type, DEFAULT_GROUP)?;
            registered += 1;
        }
    }
    log::info!("Registered {} resource locations", registered);
    Ok(registered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ResourceError;

    #[test]
    fn test_one_location_per_setting() {
        let config = ResourceConfig::parse(
            "[General]\nFileSystem=media\n[Models]\nFileSystem=media/models\n[Packs]\nZip=packs/extra.zip\n",
        );
        let mut resources = ResourceGroupManager::new();
        let count = register_resource_locations(&config, &mut resources).unwrap();

        assert_eq!(count, 3);
        assert_eq!(resources.location_count(), 3);
        assert_eq!(resources.locations(DEFAULT_GROUP).len(), 3);
    }

    #[test]
    fn test_section_names_do_not_create_groups() {
        let config = ResourceConfig::parse("[Models]\nFileSystem=a\n[Textures]\nFileSystem=b\n");
        let mut resources = ResourceGroupManager::new();
        register_resource_locations(&config, &mut resources).unwrap();

        assert_eq!(resources.group_names(), vec![DEFAULT_GROUP]);
        let paths: Vec<_> = resources
            .locations(DEFAULT_GROUP)
            .iter()
            .map(|l| l.path.to_string_lossy().into_owned())
            .collect();
        assert_eq!(paths, vec!["a", "b"]);
    }

    #[test]
    fn test_unnamed_section_goes_to_default_group() {
        let config = ResourceConfig::parse("FileSystem=media\n");
        let mut resources = ResourceGroupManager::new();
        register_resource_locations(&config, &mut resources).unwrap();

        assert_eq!(resources.group_names(), vec![DEFAULT_GROUP]);
    }

    #[test]
    fn test_empty_config_registers_nothing() {
        let config = ResourceConfig::parse("");
        let mut resources = ResourceGroupManager::new();
        assert_eq!(register_resource_locations(&config, &mut resources).unwrap(), 0);
        assert_eq!(resources.location_count(), 0);
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        let config = ResourceConfig::parse("[General]\nHttp=example.org\n");
        let mut resources = ResourceGroupManager::new();
        let err = register_resource_locations(&config, &mut resources).unwrap_err();
        assert!(matches!(err, ResourceError::UnknownLocationType(t) if t == "Http"));
    }
}
