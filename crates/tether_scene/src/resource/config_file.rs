//! Resource configuration file parser
//!
//! Line format:
//! - blank lines and lines starting with `#` are ignored
//! - `[Name]` starts a section; repeating a header continues that section
//! - anything else is `key<sep>value`, where `<sep>` is the first `=`, `:` or
//!   tab on the line and both sides are trimmed
//!
//! Settings before the first header belong to the unnamed section. Keys may
//! repeat within a section.

use std::fs;
use std::path::Path;

use crate::ResourceError;

const SEPARATORS: &[char] = &['=', ':', '\t'];

/// One `[section]` of a configuration file
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConfigSection {
    name: String,
    settings: Vec<(String, String)>,
}

impl ConfigSection {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Settings in file order as (key, value) pairs
    pub fn settings(&self) -> impl Iterator<Item = (&str, &str)> {
        self.settings.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.settings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.settings.is_empty()
    }

    /// All values stored under `key`
    pub fn values<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.settings
            .iter()
            .filter(move |(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Parsed resource configuration file
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResourceConfig {
    sections: Vec<ConfigSection>,
}

impl ResourceConfig {
    /// Read and parse a configuration file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ResourceError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ResourceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("Loaded resource config {}", path.display());
        Ok(Self::parse(&text))
    }

    /// Parse configuration text
    ///
    /// Malformed setting lines are skipped with a warning.
    pub fn parse(text: &str) -> Self {
        let mut config = Self::default();
        let mut current = String::new();

        for (index, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if line.starts_with('[') && line.ends_with(']') && line.len() >= 2 {
                current = line[1..line.len() - 1].trim().to_string();
                config.section_mut(&current);
                continue;
            }

            match line.split_once(SEPARATORS) {
                Some((key, value)) => {
                    config
                        .section_mut(&current)
                        .settings
                        .push((key.trim().to_string(), value.trim().to_string()));
                }
                None => {
                    log::warn!("Resource config line {}: no separator in '{}'", index + 1, line);
                }
            }
        }

        config
    }

    fn section_mut(&mut self, name: &str) -> &mut ConfigSection {
        let index = match self.sections.iter().position(|s| s.name == name) {
            Some(index) => index,
            None => {
                self.sections.push(ConfigSection {
                    name: name.to_string(),
                    settings: Vec::new(),
                });
                self.sections.len() - 1
            }
        };
        &mut self.sections[index]
    }

    /// Sections in order of first appearance
    pub fn sections(&self) -> &[ConfigSection] {
        &self.sections
    }

    pub fn section(&self, name: &str) -> Option<&ConfigSection> {
        self.sections.iter().find(|s| s.name == name)
    }

    /// Total number of settings across all sections
    pub fn setting_count(&self) -> usize {
        self.sections.iter().map(ConfigSection::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.setting_count() == 0
    }
}
