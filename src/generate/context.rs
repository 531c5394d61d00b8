//! Generator invocation context

use serde_json::json;

use crate::generate::input::Inputs;
use crate::session::Session;

/// Builds the context value a generator invocation renders against.
///
/// Rebuilt fresh per invocation; templates reference `cwd`, `feature.name`
/// and the collected `inputs`.
pub fn build_context(session: &Session, feature_name: &str, inputs: &Inputs) -> serde_json::Value {
    json!({
        "cwd": session.cwd.display().to_string(),
        "feature": { "name": feature_name },
        "inputs": inputs,
    })
}
