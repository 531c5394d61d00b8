/// Handles argument parsing and workflow orchestration.
pub mod cli;

/// Cascading configuration loading and validation.
pub mod config;

/// Constants used throughout the application.
pub mod constants;

/// Defines custom error types.
pub mod error;

/// Feature discovery and selection.
pub mod feature;

/// The generator hierarchy: file, repository, composer and composite.
pub mod generate;

/// A set of helpers for working with the file system.
pub mod ioutils;

/// Expression parsing and rendering functionality.
pub mod renderer;

/// Per-process session state.
pub mod session;

/// Source resolution and the remote checkout cache.
pub mod source;
