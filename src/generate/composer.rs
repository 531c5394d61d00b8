//! Composer create-project generator

use crate::config::types::{ComposerSpec, FeatureInput};
use crate::error::Result;
use crate::generate::command::{run_program, run_shell};
use crate::generate::resolve_destination;
use crate::renderer::ExpressionEngine;
use crate::session::Session;

#[derive(Debug)]
pub struct ComposerGenerator {
    pub feature_name: String,
    pub use_cwd: bool,
    pub spec: ComposerSpec,
    pub inputs: Vec<FeatureInput>,
}

impl ComposerGenerator {
    pub fn invoke(
        &self,
        session: &Session,
        engine: &ExpressionEngine,
        context: &serde_json::Value,
    ) -> Result<()> {
        let destination = engine.render(&self.spec.destination, context)?;
        let dest_path = resolve_destination(session, self.use_cwd, &destination);

        let package = engine.render(&self.spec.package, context)?;
        let package_arg = match &self.spec.version {
            Some(version) => format!("{package}:{version}"),
            None => package,
        };

        let mut args = vec!["create-project".to_string(), package_arg];
        args.push(dest_path.display().to_string());
        for arg in &self.spec.args {
            args.push(engine.render(arg, context)?);
        }

        if session.dry_run {
            log::info!("[DRY RUN] Would run 'composer {}'", args.join(" "));
            if let Some(command) = &self.spec.post_command {
                log::info!("[DRY RUN] Would run '{command}'");
            }
            return Ok(());
        }

        run_program("composer", &args, &session.cwd)?;

        if let Some(command) = &self.spec.post_command {
            run_shell(command, &dest_path)?;
        }
        Ok(())
    }
}
