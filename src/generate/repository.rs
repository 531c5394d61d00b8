//! Repository-clone generator

use crate::config::types::{FeatureInput, RepositorySpec};
use crate::error::{Error, Result};
use crate::generate::command::run_shell;
use crate::generate::resolve_destination;
use crate::ioutils::{self, is_non_empty_dir};
use crate::renderer::ExpressionEngine;
use crate::session::Session;
use crate::source::git;
use crate::source::parse::expand_repository_url;

#[derive(Debug)]
pub struct RepositoryGenerator {
    pub feature_name: String,
    pub use_cwd: bool,
    pub spec: RepositorySpec,
    pub inputs: Vec<FeatureInput>,
}

impl RepositoryGenerator {
    pub fn invoke(
        &self,
        session: &Session,
        engine: &ExpressionEngine,
        context: &serde_json::Value,
    ) -> Result<()> {
        let destination = engine.render(&self.spec.destination, context)?;
        let dest_path = resolve_destination(session, self.use_cwd, &destination);

        let (url, shorthand_ref) = expand_repository_url(&self.spec.url)?;
        let reference = self.spec.reference.clone().or(shorthand_ref);

        if dest_path.is_file() || is_non_empty_dir(&dest_path) {
            return Err(Error::DestinationNotEmptyError {
                destination: dest_path.display().to_string(),
            });
        }

        if session.dry_run {
            log::info!("[DRY RUN] Would clone '{url}' into '{}'", dest_path.display());
            if let Some(reference) = &reference {
                log::info!("[DRY RUN] Would check out '{reference}'");
            }
            if let Some(command) = &self.spec.post_command {
                log::info!("[DRY RUN] Would run '{command}'");
            }
            return Ok(());
        }

        ioutils::create_dir_all(&dest_path)?;
        log::info!("Cloning '{url}' into '{}'", dest_path.display());
        let repository = git::clone(&url, &dest_path)?;
        if let Some(reference) = &reference {
            git::checkout_reference(&repository, reference)?;
        }

        if let Some(command) = &self.spec.post_command {
            run_shell(command, &dest_path)?;
        }
        Ok(())
    }
}
