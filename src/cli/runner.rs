use crate::{
    cli::Args,
    config::ConfigStore,
    error::Result,
    feature::{select_feature, FeatureStore},
    generate::{DialoguerInput, Generator, InputProvider, Inputs},
    renderer::ExpressionEngine,
    session::Session,
    source::SourceResolver,
};

/// Main CLI runner that orchestrates the scaffolding workflow.
pub struct Runner {
    args: Args,
}

impl Runner {
    pub fn new(args: Args) -> Self {
        Self { args }
    }

    /// Executes the complete workflow against the process environment and
    /// an interactive terminal.
    pub fn run(self) -> Result<()> {
        let session = Session::from_env(self.args.root.clone(), self.args.dry_run)?;
        run_with(&session, self.args.filter.as_deref(), &DialoguerInput::new())
    }
}

/// Workflow entry with explicit session and input provider, so tests can
/// drive it with private directories and scripted responses.
///
/// Control flow: configuration cascade, feature discovery (resolving
/// remote sources), selection, then sequential generator execution.
pub fn run_with(
    session: &Session,
    filter: Option<&str>,
    provider: &dyn InputProvider,
) -> Result<()> {
    let mut config_store = ConfigStore::new();
    config_store.load_from_path(&session.cwd, &session.global_dir)?;

    let resolver = SourceResolver::new(session);
    let mut feature_store = FeatureStore::new();
    feature_store.initialize(session, &config_store, &resolver)?;

    let selected = select_feature(&feature_store, filter, provider)?;
    let generator = Generator::from_config(selected.config, selected.source)?;

    let engine = ExpressionEngine::new();
    let mut inputs = Inputs::new();
    generator.resolve_and_invoke(session, &engine, provider, &mut inputs)?;

    println!("Feature '{}' generated successfully.", selected.config.name);
    Ok(())
}
