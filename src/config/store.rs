//! Cascading configuration store
//!
//! Configurations are collected from every ancestor directory containing a
//! `.scaffolder` subdirectory, nearest first, and the user-global directory
//! is always appended as the final entry.

use indexmap::IndexMap;
use std::path::{Path, PathBuf};

use crate::config::types::Configuration;
use crate::constants::{CONFIG_DIR_NAME, CONFIG_FILE_NAME};
use crate::error::{Error, Result};

#[derive(Debug, Default)]
pub struct ConfigStore {
    entries: IndexMap<PathBuf, Configuration>,
}

impl ConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads every configuration participating in the cascade for `dir`.
    ///
    /// Walks upward from `dir` to the filesystem root collecting each
    /// directory that contains a config subdirectory; the subdirectory's
    /// mere existence is sufficient to participate, with or without a
    /// `config.yml`. The global directory is then ensured as an entry,
    /// unless the walk already visited it.
    pub fn load_from_path(&mut self, dir: &Path, global_dir: &Path) -> Result<()> {
        let mut current = Some(dir);
        while let Some(candidate) = current {
            let config_dir = candidate.join(CONFIG_DIR_NAME);
            if config_dir.is_dir() {
                self.load_entry(config_dir)?;
            }
            current = candidate.parent();
        }

        if !self.entries.contains_key(global_dir) {
            self.load_entry(global_dir.to_path_buf())?;
        }

        Ok(())
    }

    /// Loads and validates a single configuration directory.
    ///
    /// A missing `config.yml` is not an error; the entry is stored empty.
    fn load_entry(&mut self, config_dir: PathBuf) -> Result<()> {
        let config_file = config_dir.join(CONFIG_FILE_NAME);
        let configuration = if config_file.is_file() {
            let content = std::fs::read_to_string(&config_file)?;
            // An empty document deserializes as null, which counts as an
            // empty configuration rather than a parse error.
            let configuration = serde_yaml::from_str::<Option<Configuration>>(&content)
                .map_err(|e| Error::ConfigParseError {
                    path: config_file.display().to_string(),
                    message: e.to_string(),
                })?
                .unwrap_or_default();

            for feature in &configuration.features {
                feature.validate().map_err(|message| Error::ConfigValidationError {
                    path: config_file.display().to_string(),
                    message,
                })?;
            }

            configuration
        } else {
            log::debug!(
                "No {CONFIG_FILE_NAME} in '{}', registering empty configuration",
                config_dir.display()
            );
            Configuration::default()
        };

        self.entries.insert(config_dir, configuration);
        Ok(())
    }

    /// All loaded configurations, keyed by config directory, in cascade order.
    pub fn all(&self) -> &IndexMap<PathBuf, Configuration> {
        &self.entries
    }

    /// Projects a value out of every configuration, keeping cascade order
    /// and dropping directories where the projection returns `None`.
    pub fn pluck<'a, T: 'a>(
        &'a self,
        project: impl Fn(&'a Configuration) -> Option<T>,
    ) -> IndexMap<&'a Path, T> {
        self.entries
            .iter()
            .filter_map(|(dir, config)| project(config).map(|v| (dir.as_path(), v)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(dir: &Path, content: &str) {
        let config_dir = dir.join(CONFIG_DIR_NAME);
        std::fs::create_dir_all(&config_dir).unwrap();
        std::fs::write(config_dir.join(CONFIG_FILE_NAME), content).unwrap();
    }

    #[test]
    fn empty_config_dir_participates() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(tmp.path().join(CONFIG_DIR_NAME)).unwrap();
        let global = tmp.path().join("global");
        std::fs::create_dir_all(&global).unwrap();

        let mut store = ConfigStore::new();
        store.load_from_path(tmp.path(), &global).unwrap();

        assert!(store.all().contains_key(&tmp.path().join(CONFIG_DIR_NAME)));
    }

    #[test]
    fn malformed_config_is_fatal() {
        let tmp = tempfile::tempdir().unwrap();
        write_config(tmp.path(), "sources: {not: [a, list]}");
        let global = tmp.path().join("global");

        let mut store = ConfigStore::new();
        let err = store.load_from_path(tmp.path(), &global).unwrap_err();
        assert!(matches!(err, Error::ConfigParseError { .. }));
    }

    #[test]
    fn invalid_embedded_feature_is_fatal() {
        let tmp = tempfile::tempdir().unwrap();
        write_config(tmp.path(), "features:\n  - name: Broken\n    type: repository\n");
        let global = tmp.path().join("global");

        let mut store = ConfigStore::new();
        let err = store.load_from_path(tmp.path(), &global).unwrap_err();
        assert!(matches!(err, Error::ConfigValidationError { .. }));
    }

    #[test]
    fn pluck_projects_in_cascade_order() {
        let tmp = tempfile::tempdir().unwrap();
        let inner = tmp.path().join("outer/inner");
        std::fs::create_dir_all(&inner).unwrap();
        write_config(&inner, "sources: ['./a']");
        write_config(&tmp.path().join("outer"), "sources: ['./b']");
        let global = tmp.path().join("global");

        let mut store = ConfigStore::new();
        store.load_from_path(&inner, &global).unwrap();

        let sources = store.pluck(|c| {
            if c.sources.is_empty() {
                None
            } else {
                Some(&c.sources)
            }
        });
        let keys: Vec<_> = sources.keys().collect();
        assert_eq!(keys.len(), 2);
        assert_eq!(*keys[0], inner.join(CONFIG_DIR_NAME));
        assert_eq!(*keys[1], tmp.path().join("outer").join(CONFIG_DIR_NAME));
    }
}
