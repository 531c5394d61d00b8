//! Feature discovery and selection
//!
//! - `store`: aggregates feature definitions from configurations and
//!   resolved source directories
//! - `select`: filters and selects a feature to generate

pub mod select;
pub mod store;

pub use select::{filter_features, select_feature, FeatureRef, Selection};
pub use store::FeatureStore;
