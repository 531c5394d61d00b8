//! Generator hierarchy
//!
//! One closed sum type covers the four generation strategies, so adding a
//! variant forces every dispatch site to handle it. The factory keyed by
//! the feature's declared `type` is [`Generator::from_config`].

pub mod command;
pub mod composer;
pub mod composite;
pub mod context;
pub mod file;
pub mod input;
pub mod operation;
pub mod repository;

use std::path::{Path, PathBuf};

use crate::config::types::{FeatureConfig, FeatureInput, FeatureType};
use crate::error::{Error, Result};
use crate::ioutils::is_explicit_relative;
use crate::renderer::ExpressionEngine;
use crate::session::Session;

pub use composer::ComposerGenerator;
pub use composite::CompositeGenerator;
pub use file::FileGenerator;
pub use input::{collect_inputs, DialoguerInput, InputProvider, Inputs, ScriptedInput};
pub use repository::RepositoryGenerator;

#[derive(Debug)]
pub enum Generator {
    File(FileGenerator),
    Repository(RepositoryGenerator),
    Composer(ComposerGenerator),
    Composite(CompositeGenerator),
}

impl Generator {
    /// Builds the generator variant owning `config`.
    ///
    /// The payload is guaranteed present by upstream validation; its absence
    /// here is a configuration error surfaced defensively rather than a
    /// reachable state.
    pub fn from_config(config: &FeatureConfig, feature_dir: &Path) -> Result<Self> {
        let missing_payload = |payload: &str| Error::GenerationError {
            feature: config.name.clone(),
            message: format!("missing '{payload}' payload"),
        };

        Ok(match config.feature_type {
            FeatureType::File => Generator::File(FileGenerator {
                feature_name: config.name.clone(),
                use_cwd: config.use_cwd,
                files: config.files.clone().ok_or_else(|| missing_payload("files"))?,
                feature_dir: feature_dir.to_path_buf(),
                inputs: config.inputs.clone(),
            }),
            FeatureType::Repository => Generator::Repository(RepositoryGenerator {
                feature_name: config.name.clone(),
                use_cwd: config.use_cwd,
                spec: config
                    .repository
                    .clone()
                    .ok_or_else(|| missing_payload("repository"))?,
                inputs: config.inputs.clone(),
            }),
            FeatureType::Composer => Generator::Composer(ComposerGenerator {
                feature_name: config.name.clone(),
                use_cwd: config.use_cwd,
                spec: config.composer.clone().ok_or_else(|| missing_payload("composer"))?,
                inputs: config.inputs.clone(),
            }),
            FeatureType::Composite => Generator::Composite(CompositeGenerator {
                feature_name: config.name.clone(),
                features: config
                    .composite
                    .clone()
                    .ok_or_else(|| missing_payload("composite"))?
                    .features,
                feature_dir: feature_dir.to_path_buf(),
                inputs: config.inputs.clone(),
            }),
        })
    }

    pub fn feature_name(&self) -> &str {
        match self {
            Generator::File(g) => &g.feature_name,
            Generator::Repository(g) => &g.feature_name,
            Generator::Composer(g) => &g.feature_name,
            Generator::Composite(g) => &g.feature_name,
        }
    }

    fn declared_inputs(&self) -> &[FeatureInput] {
        match self {
            Generator::File(g) => &g.inputs,
            Generator::Repository(g) => &g.inputs,
            Generator::Composer(g) => &g.inputs,
            Generator::Composite(g) => &g.inputs,
        }
    }

    /// Collects any missing inputs, builds the generator context and
    /// dispatches to the variant.
    pub fn resolve_and_invoke(
        &self,
        session: &Session,
        engine: &ExpressionEngine,
        provider: &dyn InputProvider,
        inputs: &mut Inputs,
    ) -> Result<()> {
        collect_inputs(self.declared_inputs(), provider, inputs)?;
        let context = context::build_context(session, self.feature_name(), inputs);

        match self {
            Generator::File(g) => g.invoke(session, engine, &context),
            Generator::Repository(g) => g.invoke(session, engine, &context),
            Generator::Composer(g) => g.invoke(session, engine, &context),
            Generator::Composite(g) => g.invoke(session, engine, provider, inputs),
        }
    }
}

/// Maps a rendered destination expression to an absolute path.
///
/// The `use_cwd` flag pins resolution to the invoking working directory.
/// Explicitly relative references resolve against the working directory
/// when no project configuration distinct from the global default exists,
/// and against the scaffolder project root otherwise. Anything else is
/// returned unchanged.
pub fn resolve_destination(session: &Session, use_cwd: bool, path: &str) -> PathBuf {
    if use_cwd {
        return session.cwd.join(path);
    }
    if is_explicit_relative(path) {
        let base = match &session.project_root {
            Some(root) if session.has_project_config() => root.clone(),
            _ => session.cwd.clone(),
        };
        return base.join(path);
    }
    PathBuf::from(path)
}
