//! Configuration and feature definition types

use serde::Deserialize;

/// A single cascaded configuration file.
///
/// Unknown top-level keys are rejected at parse time.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Configuration {
    /// Locations that may contain feature definitions.
    #[serde(default)]
    pub sources: Vec<SourceSpec>,
    /// Feature definitions embedded directly in this file.
    #[serde(default)]
    pub features: Vec<FeatureConfig>,
}

/// A source entry: a bare string (classified at resolution time) or an
/// object carrying exactly one of `directory`, `git`, `github`.
///
/// Every object arm denies unknown fields, so an entry mixing two of the
/// three keys fails to deserialize.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SourceSpec {
    Directory(DirectorySource),
    Git(GitSource),
    Github(GithubSource),
    Plain(String),
}

/// Local directory source.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct DirectorySource {
    pub directory: String,
    /// Base the directory resolves against when relative. Defaults to the
    /// directory of the configuration that declared the source.
    #[serde(default)]
    pub root: Option<String>,
}

/// Generic Git repository source.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GitSource {
    pub git: GitSpec,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum GitSpec {
    Url(String),
    Detailed(GitDetails),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct GitDetails {
    pub url: String,
    #[serde(default, rename = "ref")]
    pub reference: Option<String>,
    /// Subdirectory within the checkout holding the feature definitions.
    #[serde(default)]
    pub directory: Option<String>,
    /// Staleness threshold override, in seconds.
    #[serde(default)]
    pub update_threshold: Option<u64>,
}

/// GitHub repository source.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GithubSource {
    pub github: GithubSpec,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum GithubSpec {
    /// `"org/repo"` with an optional `#ref` suffix.
    Shorthand(String),
    Detailed(GithubDetails),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct GithubDetails {
    /// `"org/repo"` name. Exactly one of `name` and `url` must be set.
    #[serde(default)]
    pub name: Option<String>,
    /// Full repository URL.
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default, rename = "ref")]
    pub reference: Option<String>,
    #[serde(default)]
    pub directory: Option<String>,
}

/// Generation strategy of a feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeatureType {
    #[default]
    File,
    Repository,
    Composer,
    Composite,
}

impl std::fmt::Display for FeatureType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            FeatureType::File => "file",
            FeatureType::Repository => "repository",
            FeatureType::Composer => "composer",
            FeatureType::Composite => "composite",
        };
        write!(f, "{s}")
    }
}

/// A named, user-selectable unit of code generation.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct FeatureConfig {
    pub name: String,
    /// Which generator variant owns this feature.
    #[serde(rename = "type", default)]
    pub feature_type: FeatureType,
    /// Resolve destinations against the invoking working directory.
    #[serde(default)]
    pub use_cwd: bool,
    #[serde(default)]
    pub inputs: Vec<FeatureInput>,
    #[serde(default)]
    pub files: Option<Vec<FeatureFile>>,
    #[serde(default)]
    pub repository: Option<RepositorySpec>,
    #[serde(default)]
    pub composer: Option<ComposerSpec>,
    #[serde(default)]
    pub composite: Option<CompositeSpec>,
}

impl FeatureConfig {
    /// Validates that the payload matches the declared `type` and that the
    /// payloads are mutually exclusive.
    pub fn validate(&self) -> Result<(), String> {
        let payloads = [
            ("files", self.files.is_some(), FeatureType::File),
            ("repository", self.repository.is_some(), FeatureType::Repository),
            ("composer", self.composer.is_some(), FeatureType::Composer),
            ("composite", self.composite.is_some(), FeatureType::Composite),
        ];

        for (key, present, owner) in payloads {
            if present && owner != self.feature_type {
                return Err(format!(
                    "feature '{}' of type '{}' must not carry a '{}' payload",
                    self.name, self.feature_type, key
                ));
            }
            if !present && owner == self.feature_type {
                return Err(format!(
                    "feature '{}' of type '{}' requires a '{}' payload",
                    self.name, self.feature_type, key
                ));
            }
        }

        if let Some(composite) = &self.composite {
            for sub in &composite.features {
                sub.validate()?;
            }
        }

        Ok(())
    }
}

/// Type of a user-supplied input value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputType {
    #[default]
    String,
    Boolean,
}

/// Declares a value collected from the user before generation.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct FeatureInput {
    pub name: String,
    #[serde(rename = "type", default)]
    pub input_type: InputType,
    /// Prompt text. Falls back to the input name.
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub default: Option<serde_json::Value>,
    #[serde(default)]
    pub required: bool,
}

impl FeatureInput {
    pub fn prompt_label(&self) -> &str {
        self.description.as_deref().unwrap_or(&self.name)
    }
}

/// A file (or glob of files) produced by a file-type feature.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct FeatureFile {
    /// Literal path or glob, relative to `base`.
    pub source: String,
    /// Destination expression, rendered against the generator context.
    pub destination: String,
    /// Base directory for `source`. Defaults to the feature directory.
    #[serde(default)]
    pub base: Option<String>,
    /// Condition expression; the file is skipped when it renders falsy.
    #[serde(default, rename = "if")]
    pub condition: Option<String>,
}

/// Payload of a repository-type feature.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct RepositorySpec {
    /// `org/repo[#ref]` shorthand, HTTPS or SSH URL.
    pub url: String,
    #[serde(default, rename = "ref")]
    pub reference: Option<String>,
    /// Destination expression, rendered against the generator context.
    pub destination: String,
    /// Shell command run inside the destination after the clone.
    #[serde(default)]
    pub post_command: Option<String>,
}

/// Payload of a composer-type feature.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct ComposerSpec {
    pub package: String,
    #[serde(default)]
    pub version: Option<String>,
    /// Destination expression, rendered against the generator context.
    pub destination: String,
    /// Extra arguments appended to the create-project invocation.
    #[serde(default)]
    pub args: Vec<String>,
    #[serde(default)]
    pub post_command: Option<String>,
}

/// Payload of a composite feature: sub-features run in order.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CompositeSpec {
    pub features: Vec<FeatureConfig>,
}
