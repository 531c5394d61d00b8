//! Configuration handling
//!
//! This module contains the configuration system components:
//! - `types`: Configuration, source and feature definition types
//! - `store`: The cascading per-directory configuration store

pub mod store;
pub mod types;

// Re-export commonly used types for convenience
pub use store::ConfigStore;
pub use types::{
    ComposerSpec, CompositeSpec, Configuration, DirectorySource, FeatureConfig,
    FeatureFile, FeatureInput, FeatureType, GitDetails, GitSource, GitSpec,
    GithubDetails, GithubSource, GithubSpec, InputType, RepositorySpec, SourceSpec,
};
