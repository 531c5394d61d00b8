//! Feature selection
//!
//! Filtering is a pure function over the store so it can be tested without
//! a terminal; only the many-candidates outcome reaches the prompt.

use std::path::Path;

use crate::config::types::FeatureConfig;
use crate::error::{Error, Result};
use crate::feature::store::FeatureStore;
use crate::generate::InputProvider;

/// A selectable feature, addressed by its source directory and position so
/// name collisions across provenances stay independently selectable.
#[derive(Debug, Clone, Copy)]
pub struct FeatureRef<'a> {
    pub source: &'a Path,
    pub index: usize,
    pub config: &'a FeatureConfig,
}

impl FeatureRef<'_> {
    /// Label shown in the selection list.
    pub fn label(&self) -> String {
        format!("{} ({})", self.config.name, self.source.display())
    }
}

/// Outcome of applying the name filter, before any prompting happens.
#[derive(Debug)]
pub enum Selection<'a> {
    /// Exactly one candidate; selected without a prompt.
    Auto(FeatureRef<'a>),
    /// Several candidates to choose between interactively.
    Prompt(Vec<FeatureRef<'a>>),
}

/// Applies a case-insensitive substring filter across all feature names.
///
/// Zero matches is fatal; one match auto-selects; several go to a prompt.
pub fn filter_features<'a>(
    store: &'a FeatureStore,
    filter: Option<&str>,
) -> Result<Selection<'a>> {
    let needle = filter.unwrap_or("").to_lowercase();
    let mut candidates: Vec<FeatureRef<'a>> = Vec::new();

    for (source, features) in store.all() {
        for (index, config) in features.iter().enumerate() {
            if config.name.to_lowercase().contains(&needle) {
                candidates.push(FeatureRef { source: source.as_path(), index, config });
            }
        }
    }

    match candidates.len() {
        0 => Err(Error::NoFeatureMatchesError {
            filter: filter.unwrap_or("").to_string(),
        }),
        1 => Ok(Selection::Auto(candidates.remove(0))),
        _ => Ok(Selection::Prompt(candidates)),
    }
}

/// Resolves the filter to a single feature, prompting when needed.
pub fn select_feature<'a>(
    store: &'a FeatureStore,
    filter: Option<&str>,
    provider: &dyn InputProvider,
) -> Result<FeatureRef<'a>> {
    match filter_features(store, filter)? {
        Selection::Auto(feature) => {
            log::info!("Using feature '{}'", feature.config.name);
            Ok(feature)
        }
        Selection::Prompt(candidates) => {
            let items: Vec<String> = candidates.iter().map(FeatureRef::label).collect();
            let index = provider.fuzzy_select("Select a feature", &items)?;
            candidates.into_iter().nth(index).ok_or_else(|| {
                Error::Other(anyhow::anyhow!("selection index out of range"))
            })
        }
    }
}
