use minijinja::syntax::SyntaxConfig;
use minijinja::{Environment, UndefinedBehavior};

use super::filters::*;
use crate::error::Result;

/// Expression rendering engine.
///
/// Delimiters are `[[ ]]` / `[% %]` / `[# #]` rather than the default
/// `{{ }}` family, so generated files may carry web-templating markup
/// verbatim. Runs strict: an undefined variable is a render error, which
/// surfaces input-name typos in feature definitions instead of silently
/// producing empty strings.
pub struct ExpressionEngine {
    env: Environment<'static>,
}

impl ExpressionEngine {
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        // Generated files keep their final newline.
        env.set_keep_trailing_newline(true);
        env.set_syntax(
            SyntaxConfig::builder()
                .block_delimiters("[%", "%]")
                .variable_delimiters("[[", "]]")
                .comment_delimiters("[#", "#]")
                .build()
                .expect("static delimiter configuration is valid"),
        );

        env.add_filter("camel_case", to_camel_case);
        env.add_filter("kebab_case", to_kebab_case);
        env.add_filter("pascal_case", to_pascal_case);
        env.add_filter("snake_case", to_snake_case);
        env.add_filter("file_case", file_case);
        env.add_filter("id_case", id_case);
        env.add_filter("class_case", class_case);
        env.add_filter("namespace", namespace);
        env.add_filter("regex", regex_filter);

        Self { env }
    }

    /// Renders a template string with the given context.
    ///
    /// # Arguments
    /// * `template` - Template string to render
    /// * `context` - Context variables for rendering
    ///
    /// # Returns
    /// * `Result<String>` - Rendered template string
    pub fn render(&self, template: &str, context: &serde_json::Value) -> Result<String> {
        Ok(self.env.render_str(template, context)?)
    }

    /// Recursively renders every string inside a structured value.
    ///
    /// Object keys are left untouched; only string leaves go through the
    /// engine.
    pub fn render_value(
        &self,
        value: &serde_json::Value,
        context: &serde_json::Value,
    ) -> Result<serde_json::Value> {
        use serde_json::Value;
        Ok(match value {
            Value::String(s) => Value::String(self.render(s, context)?),
            Value::Array(items) => Value::Array(
                items
                    .iter()
                    .map(|item| self.render_value(item, context))
                    .collect::<Result<_>>()?,
            ),
            Value::Object(map) => {
                let mut rendered = serde_json::Map::with_capacity(map.len());
                for (key, item) in map {
                    rendered.insert(key.clone(), self.render_value(item, context)?);
                }
                Value::Object(rendered)
            }
            other => other.clone(),
        })
    }
}

impl Default for ExpressionEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether a collected or rendered value counts as true.
///
/// Booleans pass through; the strings `"true"` and `"1"` (case-insensitive)
/// are true; every other value is false.
pub fn parse_truthy(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Bool(b) => *b,
        serde_json::Value::String(s) => {
            matches!(s.trim().to_ascii_lowercase().as_str(), "true" | "1")
        }
        _ => false,
    }
}

/// Logical negation of [`parse_truthy`].
pub fn parse_falsy(value: &serde_json::Value) -> bool {
    !parse_truthy(value)
}
