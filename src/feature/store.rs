//! Feature aggregation
//!
//! Features arrive from two provenances: arrays embedded in cascaded
//! configuration files, and definition files discovered inside resolved
//! source directories. Both are kept, attributed to the directory that
//! produced them; name collisions are tolerated because selection works on
//! `(source, index)` pairs.

use indexmap::{IndexMap, IndexSet};
use std::path::{Path, PathBuf};

use crate::config::store::ConfigStore;
use crate::config::types::FeatureConfig;
use crate::constants::{CONFIG_DIR_NAME, CONFIG_FILE_NAME};
use crate::error::Result;
use crate::session::Session;
use crate::source::SourceResolver;

#[derive(Debug, Default)]
pub struct FeatureStore {
    entries: IndexMap<PathBuf, Vec<FeatureConfig>>,
}

impl FeatureStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discovers every available feature.
    ///
    /// Remote sources resolve through `resolver`; an unresolvable source is
    /// fatal, while unreadable directories and invalid feature files inside
    /// a resolved source are warnings and get skipped.
    pub fn initialize(
        &mut self,
        session: &Session,
        config_store: &ConfigStore,
        resolver: &SourceResolver<'_>,
    ) -> Result<()> {
        // Features embedded in configuration files were validated at load.
        for (dir, config) in config_store.all() {
            if !config.features.is_empty() {
                self.entries
                    .entry(dir.clone())
                    .or_default()
                    .extend(config.features.iter().cloned());
            }
        }

        let mut source_dirs: IndexSet<PathBuf> = IndexSet::new();
        for (dir, config) in config_store.all() {
            for spec in &config.sources {
                source_dirs.insert(resolver.resolve_to_directory(spec, dir)?);
            }
        }

        // The scaffolder root and global directories are implicit sources.
        if let Some(root) = &session.project_root {
            source_dirs.insert(root.join(CONFIG_DIR_NAME));
        }
        source_dirs.insert(session.global_dir.clone());

        for dir in &source_dirs {
            self.scan_source_dir(dir);
        }
        Ok(())
    }

    /// Scans a source directory's immediate subdirectories for feature
    /// definition files.
    fn scan_source_dir(&mut self, dir: &Path) {
        let entries = match std::fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                log::warn!("Cannot read source directory '{}': {e}", dir.display());
                return;
            }
        };

        for entry in entries.filter_map(|e| e.ok()) {
            let feature_dir = entry.path();
            if !feature_dir.is_dir() {
                continue;
            }
            let config_file = feature_dir.join(CONFIG_FILE_NAME);
            if !config_file.is_file() {
                continue;
            }
            match load_feature_file(&config_file) {
                Ok(feature) => {
                    log::debug!(
                        "Discovered feature '{}' in '{}'",
                        feature.name,
                        feature_dir.display()
                    );
                    self.entries.entry(feature_dir).or_default().push(feature);
                }
                Err(message) => {
                    log::warn!(
                        "Skipping feature definition '{}': {message}",
                        config_file.display()
                    );
                }
            }
        }
    }

    /// All discovered features keyed by the directory that produced them.
    pub fn all(&self) -> &IndexMap<PathBuf, Vec<FeatureConfig>> {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.values().all(|features| features.is_empty())
    }
}

/// Parses and validates a single feature definition file. `type` defaults
/// to `file` when absent.
fn load_feature_file(config_file: &Path) -> Result<FeatureConfig, String> {
    let content = std::fs::read_to_string(config_file).map_err(|e| e.to_string())?;
    let feature: FeatureConfig =
        serde_yaml::from_str(&content).map_err(|e| e.to_string())?;
    feature.validate()?;
    Ok(feature)
}
