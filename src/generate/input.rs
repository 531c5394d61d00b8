//! User input collection
//!
//! Prompting sits behind the [`InputProvider`] trait so generator logic
//! never talks to the terminal directly. [`DialoguerInput`] is the human
//! TTY implementation; [`ScriptedInput`] provides predefined responses for
//! automation and tests.

use dialoguer::{Confirm, FuzzySelect, Input};
use std::collections::HashMap;

use crate::config::types::{FeatureInput, InputType};
use crate::error::{Error, Result};
use crate::renderer::parse_truthy;

/// Accumulated input values, threaded through a composite chain.
pub type Inputs = serde_json::Map<String, serde_json::Value>;

/// Abstract interface for collecting user input.
pub trait InputProvider {
    fn text(&self, prompt: &str, default: Option<&str>) -> Result<String>;
    fn confirm(&self, prompt: &str, default: bool) -> Result<bool>;
    /// Fuzzy-filtered selection from a list, returning the chosen index.
    fn fuzzy_select(&self, prompt: &str, items: &[String]) -> Result<usize>;
}

/// Collects values for every declared input that is not already present in
/// the accumulated map. Later composite steps therefore see earlier steps'
/// values without being re-prompted.
pub fn collect_inputs(
    declared: &[FeatureInput],
    provider: &dyn InputProvider,
    collected: &mut Inputs,
) -> Result<()> {
    for input in declared {
        if collected.contains_key(&input.name) {
            log::debug!("Input '{}' already collected, not prompting", input.name);
            continue;
        }

        let value = match input.input_type {
            InputType::String => {
                let default = input.default.as_ref().map(default_text);
                loop {
                    let text = provider.text(input.prompt_label(), default.as_deref())?;
                    if input.required && text.trim().is_empty() {
                        log::warn!("Input '{}' is required.", input.name);
                        continue;
                    }
                    break serde_json::Value::String(text);
                }
            }
            InputType::Boolean => {
                let default = input.default.as_ref().map(parse_truthy).unwrap_or(false);
                serde_json::Value::Bool(provider.confirm(input.prompt_label(), default)?)
            }
        };

        collected.insert(input.name.clone(), value);
    }
    Ok(())
}

fn default_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn from_dialoguer(e: dialoguer::Error) -> Error {
    match e {
        dialoguer::Error::IO(io) if io.kind() == std::io::ErrorKind::Interrupted => {
            Error::PromptCancelledError
        }
        dialoguer::Error::IO(io) => Error::IoError(io),
    }
}

/// Terminal implementation backed by dialoguer.
#[derive(Debug, Default)]
pub struct DialoguerInput;

impl DialoguerInput {
    pub fn new() -> Self {
        Self
    }
}

impl InputProvider for DialoguerInput {
    fn text(&self, prompt: &str, default: Option<&str>) -> Result<String> {
        let mut input = Input::new().with_prompt(prompt);
        if let Some(default) = default {
            input = input.default(default.to_string());
        } else {
            input = input.allow_empty(true);
        }
        input.interact_text().map_err(from_dialoguer)
    }

    fn confirm(&self, prompt: &str, default: bool) -> Result<bool> {
        Confirm::new()
            .with_prompt(prompt)
            .default(default)
            .interact()
            .map_err(from_dialoguer)
    }

    fn fuzzy_select(&self, prompt: &str, items: &[String]) -> Result<usize> {
        FuzzySelect::new()
            .with_prompt(prompt)
            .items(items)
            .default(0)
            .interact()
            .map_err(from_dialoguer)
    }
}

/// Input provider that gives predefined responses without user interaction.
/// Useful for automation and tests.
#[derive(Debug, Default)]
pub struct ScriptedInput {
    text_responses: HashMap<String, String>,
    confirm_responses: HashMap<String, bool>,
    select_responses: HashMap<String, usize>,
}

impl ScriptedInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a predefined text response for a specific prompt
    pub fn with_text(mut self, prompt: &str, response: &str) -> Self {
        self.text_responses.insert(prompt.to_string(), response.to_string());
        self
    }

    /// Add a predefined confirmation response for a specific prompt
    pub fn with_confirm(mut self, prompt: &str, response: bool) -> Self {
        self.confirm_responses.insert(prompt.to_string(), response);
        self
    }

    /// Add a predefined selection response for a specific prompt
    pub fn with_selection(mut self, prompt: &str, index: usize) -> Self {
        self.select_responses.insert(prompt.to_string(), index);
        self
    }
}

impl InputProvider for ScriptedInput {
    fn text(&self, prompt: &str, default: Option<&str>) -> Result<String> {
        if let Some(response) = self.text_responses.get(prompt) {
            return Ok(response.clone());
        }
        Ok(default.unwrap_or_default().to_string())
    }

    fn confirm(&self, prompt: &str, default: bool) -> Result<bool> {
        Ok(self.confirm_responses.get(prompt).copied().unwrap_or(default))
    }

    fn fuzzy_select(&self, prompt: &str, _items: &[String]) -> Result<usize> {
        Ok(self.select_responses.get(prompt).copied().unwrap_or(0))
    }
}
