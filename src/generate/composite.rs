//! Composite generator
//!
//! Runs a list of sub-features in order, threading the accumulated inputs
//! forward so later steps can reference earlier steps' collected values.
//! A failing step aborts the remainder; completed steps are not unwound.

use std::path::PathBuf;

use crate::config::types::{FeatureConfig, FeatureInput};
use crate::error::Result;
use crate::generate::input::{InputProvider, Inputs};
use crate::generate::Generator;
use crate::renderer::ExpressionEngine;
use crate::session::Session;

#[derive(Debug)]
pub struct CompositeGenerator {
    pub feature_name: String,
    pub features: Vec<FeatureConfig>,
    /// Sub-features inherit the composite's feature directory.
    pub feature_dir: PathBuf,
    pub inputs: Vec<FeatureInput>,
}

impl CompositeGenerator {
    pub fn invoke(
        &self,
        session: &Session,
        engine: &ExpressionEngine,
        provider: &dyn InputProvider,
        inputs: &mut Inputs,
    ) -> Result<()> {
        let total = self.features.len();
        for (index, sub_feature) in self.features.iter().enumerate() {
            log::info!(
                "Running step {}/{total} of '{}': '{}'",
                index + 1,
                self.feature_name,
                sub_feature.name
            );
            let generator = Generator::from_config(sub_feature, &self.feature_dir)?;
            generator.resolve_and_invoke(session, engine, provider, inputs)?;
        }
        Ok(())
    }
}
